//! Runs one stream session until it ends or the user interrupts it.

use anyhow::Context;
use logstream_client::LogStreamClient;
use logstream_protocol::ConnectDescriptor;
use tokio_util::sync::CancellationToken;

use crate::config::Settings;

pub async fn run(url: &str, descriptor: ConnectDescriptor, settings: Settings) -> anyhow::Result<()> {
    let mut config = settings.into_client_config()?;
    if config.log_prefix.is_empty() {
        config.log_prefix = format!("{}.{}", descriptor.site, descriptor.environment);
    }

    let shutdown = CancellationToken::new();
    let interrupt = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("SIGINT received, shutting down");
                shutdown.cancel();
            }
        })
    };

    let mut client = LogStreamClient::new(config, std::io::stdout());
    let result = client.run(url, descriptor, &shutdown).await;
    interrupt.abort();

    result.with_context(|| format!("log stream from {url} failed"))
}
