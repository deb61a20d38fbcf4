fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use logstream_protocol::{Command, ConnectDescriptor, InboundMessage, Offer, Outbound};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture as raw text.
    fn load_text(name: &str) -> String {
        let path = fixtures_dir().join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        serde_json::from_str(&load_text(name))
            .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (key-order independent).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  wire: {fixture}\n  Rust: {reserialized}"
        );
    }

    fn decode(name: &str) -> InboundMessage {
        InboundMessage::decode(load_text(name).trim())
            .unwrap_or_else(|e| panic!("failed to decode {name}: {e}"))
    }

    // --- Outbound ---

    #[test]
    fn fixture_handshake() {
        roundtrip_test::<Outbound>("handshake.json");
    }

    #[test]
    fn fixture_handshake_from_descriptor() {
        let descriptor: ConnectDescriptor =
            serde_json::from_value(load_fixture("connect_descriptor.json")).unwrap();
        let handshake = Outbound::Handshake((&descriptor).into());
        assert_eq!(
            serde_json::to_value(&handshake).unwrap(),
            load_fixture("handshake.json")
        );
    }

    #[test]
    fn fixture_subscribe() {
        roundtrip_test::<Outbound>("subscribe.json");
        roundtrip_test::<Outbound>("subscribe_no_server.json");
    }

    #[test]
    fn fixture_connect_descriptor() {
        roundtrip_test::<ConnectDescriptor>("connect_descriptor.json");
    }

    // --- Inbound ---

    #[test]
    fn fixture_inbound_commands() {
        assert_eq!(decode("ready.json").command(), &Command::Ready);
        assert_eq!(decode("ack.json").command(), &Command::Ack);
        assert_eq!(decode("fault.json").command(), &Command::Fault);
        assert_eq!(decode("offer.json").command(), &Command::Offer);
        assert_eq!(decode("record.json").command(), &Command::Record);
    }

    #[test]
    fn fixture_inbound_passthrough() {
        for name in ["ready.json", "ack.json", "fault.json", "offer.json", "record.json"] {
            roundtrip_test::<InboundMessage>(name);
        }
    }

    #[test]
    fn fixture_offer_view() {
        let offer: Offer = decode("offer.json").parse_fields().unwrap();
        assert_eq!(offer.stream_type.as_deref(), Some("bal-access"));
        assert_eq!(offer.server, Some(serde_json::json!("bal-5678")));
    }

    #[test]
    fn fixture_record_fields() {
        let record = decode("record.json");
        assert_eq!(record.field_str("log_type"), "apache-request");
        assert_eq!(record.field_str("http_status"), "404");
        assert_eq!(record.field_str("extra"), r#"{"request_id":"v-abc","bytes":512}"#);
    }
}
