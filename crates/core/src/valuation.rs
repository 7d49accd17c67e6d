use std::collections::BTreeSet;
use std::fmt::Write;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::item::{ItemId, ParsedItem};
use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    #[error("No items selected")]
    NothingSelected,
}

/// Render an amount with the currency symbol and exactly two decimals.
pub fn format_currency(amount: Decimal) -> String {
    Money::new(amount).to_string()
}

/// Sum of `price * qty` over the items whose id is in `selected_ids`.
pub fn calculate_total(items: &[ParsedItem], selected_ids: &[ItemId]) -> Money {
    items
        .iter()
        .filter(|item| selected_ids.contains(&item.id))
        .map(ParsedItem::line_total)
        .sum()
}

/// The set of items a person has ticked on the checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn select_all(&mut self, items: &[ParsedItem]) {
        self.ids.extend(items.iter().map(|item| item.id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.ids.iter().copied().collect()
    }

    pub fn total(&self, items: &[ParsedItem]) -> Money {
        calculate_total(items, &self.ids())
    }
}

impl FromIterator<ItemId> for Selection {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self { ids: iter.into_iter().collect() }
    }
}

/// Build the plain-text message shared with the people splitting the bill.
pub fn share_summary(items: &[ParsedItem], selection: &Selection) -> Result<String, ValuationError> {
    let chosen: Vec<&ParsedItem> = items.iter().filter(|item| selection.contains(item.id)).collect();
    if chosen.is_empty() {
        return Err(ValuationError::NothingSelected);
    }

    let mut message = String::from("Items to split:\n");
    for item in &chosen {
        // Writing into a String cannot fail.
        let _ = writeln!(
            message,
            "- {} x{} = {}",
            item.name,
            item.qty.normalize(),
            item.line_total()
        );
    }
    let _ = write!(message, "Total = {}", selection.total(items));
    Ok(message)
}
