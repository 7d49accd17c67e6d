use crate::prompt::build_prompt;
use crate::recover::{coerce_receipt, recover_json};
use crate::transport::{ChatReply, ChatTransport, TransportError};
use crate::types::{FailureKind, ParseFailure, RemoteOutcome, RemoteState};

/// Sends OCR text to a chat model and coerces the reply into a receipt.
///
/// One request per call, no retries. Every failure comes back as a
/// [`ParseFailure`] inside [`RemoteOutcome::Failed`].
pub struct RemoteParser<T: ChatTransport> {
    transport: T,
}

impl<T: ChatTransport> RemoteParser<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn parse(&self, ocr_text: &str) -> RemoteOutcome {
        if ocr_text.trim().is_empty() {
            tracing::warn!(state = %RemoteState::NotSent, "empty OCR text, request not sent");
            return RemoteOutcome::Failed(ParseFailure::new(
                FailureKind::InvalidInput,
                "Invalid OCR text provided",
            ));
        }

        tracing::info!(state = %RemoteState::AwaitingResponse, chars = ocr_text.len(), "sending receipt text");
        let outcome = match self.transport.complete(&build_prompt(ocr_text)).await {
            Ok(reply) => Self::interpret(reply),
            Err(err) => RemoteOutcome::Failed(Self::transport_failure(err)),
        };

        match outcome.failure() {
            None => tracing::info!(state = %outcome.state(), "receipt parsed by remote model"),
            Some(f) => tracing::warn!(state = %outcome.state(), error = %f.error, "remote parse failed"),
        }
        outcome
    }

    fn interpret(reply: ChatReply) -> RemoteOutcome {
        let Some(value) = recover_json(&reply.content) else {
            return RemoteOutcome::Failed(
                ParseFailure::new(FailureKind::Format, "Could not parse JSON from response")
                    .with_raw_text(reply.content)
                    .with_raw_response(reply.raw_body),
            );
        };

        match coerce_receipt(value) {
            Ok(receipt) => RemoteOutcome::Parsed(receipt),
            Err(reason) => RemoteOutcome::Failed(
                ParseFailure::new(FailureKind::Format, "Response does not match the receipt schema")
                    .with_message(reason)
                    .with_raw_text(reply.content)
                    .with_raw_response(reply.raw_body),
            ),
        }
    }

    fn transport_failure(err: TransportError) -> ParseFailure {
        match err {
            TransportError::Status { status, body } => {
                ParseFailure::new(FailureKind::Api, format!("API Error: {status}"))
                    .with_message(body.clone())
                    .with_raw_response(body)
            }
            TransportError::Network(message) => {
                ParseFailure::new(FailureKind::Network, "Network or parsing error").with_message(message)
            }
            TransportError::UnexpectedEnvelope { body } => {
                ParseFailure::new(FailureKind::Format, "Unexpected response format").with_raw_response(body)
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
