use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use crate::patterns::*;
use crate::types::CandidateGroup;

/// Name, quantity and unit price read from one candidate group.
///
/// `price` of zero means no price could be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub name: String,
    pub qty: Decimal,
    pub price: Decimal,
}

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct FieldExtractor;

impl FieldExtractor {
    /// Derive name, quantity and price from a group via ordered heuristics.
    ///
    /// `qty_price_threshold` separates a trailing bare number read as a
    /// quantity (at or below) from one read as a price (above).
    pub fn extract(group: &CandidateGroup, qty_price_threshold: Decimal) -> ExtractedFields {
        let sorted = group.sorted_by_left();
        let full_text = sorted
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        let mut price = Self::extract_price(&full_text).unwrap_or(Decimal::ZERO);
        let mut qty = Self::extract_qty(&full_text).unwrap_or(Decimal::ONE);
        let name = Self::extract_name(&full_text);

        // Column layout: qty and price often arrive as separate trailing boxes.
        if let [.., second_last, last] = sorted.as_slice() {
            let last_text = last.text.trim();
            if re_bare_number().is_match(last_text) {
                if let Some(value) = parse_number(last_text).filter(|v| *v > Decimal::ZERO) {
                    if value <= qty_price_threshold && price.is_zero() {
                        qty = value;
                    } else if value > qty_price_threshold || price.is_zero() {
                        price = value;
                    }
                }
            }

            let second_text = second_last.text.trim();
            if re_bare_integer().is_match(second_text) {
                if let Some(value) = parse_number(second_text) {
                    if !value.is_zero() && value <= qty_price_threshold {
                        qty = value.normalize();
                    }
                }
            }
        }

        if price.is_zero() {
            if let Some(value) = first_capture(re_price_fallback(), &full_text) {
                price = value;
            }
        }

        ExtractedFields { name, qty, price }
    }

    // ── Price ─────────────────────────────────────────────────────────────────

    fn extract_price(text: &str) -> Option<Decimal> {
        [re_price_rm(), re_price_dollar(), re_price_trailing(), re_price_anywhere()]
            .into_iter()
            .find_map(|re| first_capture(re, text))
    }

    // ── Quantity ──────────────────────────────────────────────────────────────

    fn extract_qty(text: &str) -> Option<Decimal> {
        [re_qty_times(), re_qty_x(), re_qty_leading()]
            .into_iter()
            .find_map(|re| first_capture(re, text))
    }

    // ── Name ──────────────────────────────────────────────────────────────────

    fn extract_name(text: &str) -> String {
        let stripped = re_strip_rm().replace_all(text, "");
        let stripped = re_strip_dollar().replace_all(&stripped, "");
        let stripped = re_strip_decimal().replace_all(&stripped, "");
        let stripped = re_strip_x().replace_all(&stripped, "");
        let stripped = re_strip_leading().replace(&stripped, "");
        re_whitespace().replace_all(&stripped, " ").trim().to_string()
    }
}

// ── Number parsing ────────────────────────────────────────────────────────────

fn first_capture(re: &Regex, text: &str) -> Option<Decimal> {
    let c = re.captures(text)?;
    parse_number(c.get(1)?.as_str())
}

/// Parse an OCR numeral; a dangling decimal point ("150.") is tolerated.
fn parse_number(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim_end_matches('.')).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
