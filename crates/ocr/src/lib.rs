pub mod classify;
pub mod config;
pub mod extract;
pub mod group;
mod patterns;
pub mod pipeline;
pub mod types;

pub use classify::{classify, classify_fragment, FragmentClass};
pub use config::{ConfigError, ParserConfig, DEFAULT_BOILERPLATE_KEYWORDS};
pub use extract::{ExtractedFields, FieldExtractor};
pub use group::{attach_figures, group_fragments};
pub use pipeline::{assemble_items, parse_receipt, ReceiptParser};
pub use types::{joined_text, Bounding, CandidateGroup, OcrFragment};
