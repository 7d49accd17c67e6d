//! Remote structured-parse fallback.
//!
//! Sends raw OCR text to a hosted chat-completion model and coerces its
//! free-text reply into a [`StructuredReceipt`]. Independent of the heuristic
//! item parser; callers pick one result or the other.

pub mod config;
pub mod fallback;
pub mod prompt;
pub mod recover;
pub mod transport;
pub mod types;

pub use config::{ConfigError, RemoteConfig};
pub use fallback::RemoteParser;
pub use prompt::build_prompt;
pub use recover::{coerce_receipt, recover_json};
pub use transport::{ChatReply, ChatTransport, HttpTransport, MockTransport, TransportError};
pub use types::{
    FailureKind, ParseFailure, RemoteOutcome, RemoteState, StructuredLineItem, StructuredReceipt,
};
