use crate::config::ParserConfig;
use crate::patterns::re_bare_number;
use crate::types::OcrFragment;

/// Why a fragment was or wasn't kept as item-line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentClass {
    /// Plausible item text.
    Item,
    /// A bare number with no surrounding text (a quantity or price column).
    Figure,
    /// Contains a header/footer keyword.
    Boilerplate,
    /// Shorter than the minimum length.
    TooShort,
}

pub fn classify_fragment(fragment: &OcrFragment, config: &ParserConfig) -> FragmentClass {
    let text = fragment.text.to_lowercase();

    if re_bare_number().is_match(text.trim()) {
        return FragmentClass::Figure;
    }
    if text.chars().count() < config.min_text_len {
        return FragmentClass::TooShort;
    }
    if config
        .boilerplate_keywords
        .iter()
        .any(|keyword| text.contains(keyword.as_str()))
    {
        return FragmentClass::Boilerplate;
    }
    FragmentClass::Item
}

/// Keep only fragments that could be part of an item line, in input order.
pub fn classify<'a>(fragments: &'a [OcrFragment], config: &ParserConfig) -> Vec<&'a OcrFragment> {
    fragments
        .iter()
        .filter(|f| classify_fragment(f, config) == FragmentClass::Item)
        .collect()
}
