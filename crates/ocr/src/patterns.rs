use std::sync::OnceLock;

use regex::Regex;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        pub(crate) fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Whole-fragment shapes.
re!(re_bare_number, r"^\d+\.?\d*$");
re!(re_bare_integer, r"^\d+(?:\.0+)?$");

// Price, most explicit first.
re!(re_price_rm, r"(?i)RM\s*(\d+\.?\d*)");
re!(re_price_dollar, r"\$\s*(\d+\.?\d*)");
re!(re_price_trailing, r"(\d+\.\d{2})\s*$");
re!(re_price_anywhere, r"(\d+\.\d{2})");
re!(re_price_fallback, r"(\d+\.\d{2})$");

// Quantity.
re!(re_qty_times, r"(?i)(\d+)\s*x\s*\d+");
re!(re_qty_x, r"(?i)x\s*(\d+)");
re!(re_qty_leading, r"^(\d+)\s+");

// Name cleanup.
re!(re_strip_rm, r"(?i)RM\s*\d+\.?\d*");
re!(re_strip_dollar, r"\$\s*\d+\.?\d*");
re!(re_strip_decimal, r"\d+\.\d{2}");
re!(re_strip_x, r"(?i)x\s*\d+");
re!(re_strip_leading, r"^\d+\s+");
re!(re_whitespace, r"\s+");
