use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

/// 1-based position of an item among the items kept from one receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchasable line item recovered from a receipt.
///
/// `name` is never empty and `price` is never zero for items produced by the
/// parser; both kinds of candidate are dropped before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedItem {
    pub id: ItemId,
    pub name: String,
    pub qty: Decimal,
    pub price: Decimal,
}

impl ParsedItem {
    pub fn new(id: u32, name: impl Into<String>, qty: Decimal, price: Decimal) -> Self {
        Self { id: ItemId(id), name: name.into(), qty, price }
    }

    pub fn unit_price(&self) -> Money {
        Money::new(self.price)
    }

    pub fn line_total(&self) -> Money {
        self.unit_price() * self.qty
    }
}
