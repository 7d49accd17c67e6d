pub mod item;
pub mod money;
pub mod valuation;

pub use item::{ItemId, ParsedItem};
pub use money::Money;
pub use valuation::{calculate_total, format_currency, share_summary, Selection, ValuationError};
