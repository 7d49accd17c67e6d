use billsplit_core::ParsedItem;
use rust_decimal::Decimal;

use crate::classify::classify;
use crate::config::ParserConfig;
use crate::extract::FieldExtractor;
use crate::group::{attach_figures, figures, group_fragments};
use crate::types::{CandidateGroup, OcrFragment};

/// Orchestrates: classify → group → attach figures → extract → assemble.
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    config: ParserConfig,
}

impl ReceiptParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Turn raw OCR fragments into the ordered list of purchasable items.
    pub fn parse(&self, fragments: &[OcrFragment]) -> Vec<ParsedItem> {
        if fragments.is_empty() {
            return Vec::new();
        }
        let groups = self.candidate_groups(fragments);
        let items = assemble_items(&groups, self.config.qty_price_threshold);
        tracing::debug!(
            fragments = fragments.len(),
            groups = groups.len(),
            items = items.len(),
            "receipt parsed"
        );
        items
    }

    /// The candidate lines the assembler will see, figures included.
    pub fn candidate_groups<'a>(&self, fragments: &'a [OcrFragment]) -> Vec<CandidateGroup<'a>> {
        let item_lines = classify(fragments, &self.config);
        let mut groups = group_fragments(&item_lines, &self.config);
        if self.config.attach_figures {
            attach_figures(&mut groups, &figures(fragments, &self.config));
        }
        groups
    }
}

/// Parse with the default thresholds.
pub fn parse_receipt(fragments: &[OcrFragment]) -> Vec<ParsedItem> {
    ReceiptParser::default().parse(fragments)
}

/// Extract every group and keep the ones with both a name and a price.
///
/// Ids are assigned over kept items only, so they stay dense.
pub fn assemble_items(groups: &[CandidateGroup], qty_price_threshold: Decimal) -> Vec<ParsedItem> {
    let mut items: Vec<ParsedItem> = Vec::new();

    for group in groups {
        let fields = FieldExtractor::extract(group, qty_price_threshold);
        if fields.name.is_empty() || fields.price.is_zero() {
            tracing::debug!(name = %fields.name, price = %fields.price, "unresolvable candidate dropped");
            continue;
        }

        let qty = if fields.qty > Decimal::ZERO { fields.qty } else { Decimal::ONE };
        let id = items.len() as u32 + 1;
        items.push(ParsedItem::new(id, fields.name, qty, fields.price));
    }

    items
}

// ── Tests ─────────────────────────────────────────────────────────────────────
