use chrono::NaiveDate;
use rust_decimal::serde::float_option;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One purchased line as reported by the language model.
///
/// Amounts are read leniently: numbers, numeric strings and currency-prefixed
/// strings parse, anything else becomes `None`. They are written as JSON numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredLineItem {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::amount", serialize_with = "float_option::serialize")]
    pub quantity: Option<Decimal>,
    #[serde(deserialize_with = "lenient::amount", serialize_with = "float_option::serialize")]
    pub price: Option<Decimal>,
}

/// Receipt in the schema the model is asked to produce.
///
/// Every field is optional on the wire; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredReceipt {
    pub store: Option<String>,
    /// `YYYY-MM-DD` as written by the model.
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub items: Vec<StructuredLineItem>,
    #[serde(deserialize_with = "lenient::amount", serialize_with = "float_option::serialize")]
    pub total: Option<Decimal>,
    pub currency: Option<String>,
}

impl StructuredReceipt {
    /// The receipt date, if the model produced a valid `YYYY-MM-DD` value.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

/// Field readers that tolerate the usual model-output quirks.
mod lenient {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `null` reads as the default value.
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => parse_amount(&n.to_string()),
            Value::String(s) => parse_amount(&s),
            _ => None,
        })
    }

    /// "12.5", "RM12.50", "$ 1,234.50", "12.50 MYR".
    pub fn parse_amount(raw: &str) -> Option<Decimal> {
        let trimmed = raw.trim_matches(|c: char| c.is_alphabetic() || c.is_whitespace() || c == '$');
        let cleaned = trimmed.replace(',', "");
        Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Nothing was sent: the OCR text was empty.
    InvalidInput,
    /// The service answered with a non-success status.
    Api,
    /// The request never completed.
    Network,
    /// A reply arrived but could not be coerced into a receipt.
    Format,
}

/// Diagnostic record returned instead of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFailure {
    pub kind: FailureKind,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ParseFailure {
    pub fn new(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            error: error.into(),
            message: None,
            raw_text: None,
            raw_response: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = Some(raw_text.into());
        self
    }

    pub fn with_raw_response(mut self, raw_response: impl Into<String>) -> Self {
        self.raw_response = Some(raw_response.into());
        self
    }
}

/// Lifecycle of one fallback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteState {
    NotSent,
    AwaitingResponse,
    Success,
    ApiError,
    FormatError,
    NetworkError,
}

impl fmt::Display for RemoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteState::NotSent => write!(f, "not_sent"),
            RemoteState::AwaitingResponse => write!(f, "awaiting_response"),
            RemoteState::Success => write!(f, "success"),
            RemoteState::ApiError => write!(f, "api_error"),
            RemoteState::FormatError => write!(f, "format_error"),
            RemoteState::NetworkError => write!(f, "network_error"),
        }
    }
}

/// Terminal result of a fallback request. Failures are values, never panics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteOutcome {
    Parsed(StructuredReceipt),
    Failed(ParseFailure),
}

impl RemoteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RemoteOutcome::Parsed(_))
    }

    pub fn receipt(&self) -> Option<&StructuredReceipt> {
        match self {
            RemoteOutcome::Parsed(r) => Some(r),
            RemoteOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            RemoteOutcome::Parsed(_) => None,
            RemoteOutcome::Failed(f) => Some(f),
        }
    }

    pub fn state(&self) -> RemoteState {
        match self {
            RemoteOutcome::Parsed(_) => RemoteState::Success,
            RemoteOutcome::Failed(f) => match f.kind {
                FailureKind::InvalidInput => RemoteState::NotSent,
                FailureKind::Api => RemoteState::ApiError,
                FailureKind::Network => RemoteState::NetworkError,
                FailureKind::Format => RemoteState::FormatError,
            },
        }
    }
}
