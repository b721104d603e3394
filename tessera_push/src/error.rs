// Error types for controller input and hardware-facing outputs.
//
// `PushError` covers things that go wrong on the way *in* (undecodable
// bytes, a closed inbox). `OutputError` covers LED, audio, and MIDI-file
// output. The controller never propagates either out of
// `handle_message`; it logs them with `warn!` and keeps going, so a flaky
// device cannot stall the frame loop.

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("malformed MIDI message {bytes:02x?}: {source}")]
    Decode {
        bytes: Vec<u8>,
        #[source]
        source: midly::Error,
    },
    #[error("controller inbox is closed")]
    InboxClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("LED output failed for pad note {note}: {reason}")]
    Led { note: u8, reason: String },
    #[error("audio output failed: {0}")]
    Audio(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
