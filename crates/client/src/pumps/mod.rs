//! Socket pumps: the read loop drives the dispatcher, the write pump owns
//! the sink.

pub(crate) mod read;
pub(crate) mod write;
