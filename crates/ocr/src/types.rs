use serde::{Deserialize, Serialize};

/// Pixel bounding box of a recognized text span.
///
/// OCR engines occasionally omit fields; anything missing deserializes to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounding {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounding {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Length of the shared vertical extent, or 0 when the boxes do not overlap.
    pub fn vertical_overlap(&self, other: &Bounding) -> f64 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }
}

/// One recognized text span as delivered by the OCR collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrFragment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub bounding: Bounding,
}

impl OcrFragment {
    pub fn new(text: impl Into<String>, bounding: Bounding) -> Self {
        Self { text: text.into(), bounding }
    }
}

/// All fragment texts joined with single spaces, in input order.
pub fn joined_text(fragments: &[OcrFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fragments believed to describe a single receipt line item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateGroup<'a> {
    pub fragments: Vec<&'a OcrFragment>,
}

impl<'a> CandidateGroup<'a> {
    pub fn seeded(seed: &'a OcrFragment) -> Self {
        Self { fragments: vec![seed] }
    }

    pub fn push(&mut self, fragment: &'a OcrFragment) {
        self.fragments.push(fragment);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Members ordered left to right; ties keep their group order.
    pub fn sorted_by_left(&self) -> Vec<&'a OcrFragment> {
        let mut sorted = self.fragments.clone();
        sorted.sort_by(|a, b| a.bounding.left.total_cmp(&b.bounding.left));
        sorted
    }
}
