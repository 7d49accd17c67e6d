use crate::classify::{classify_fragment, FragmentClass};
use crate::config::ParserConfig;
use crate::types::{CandidateGroup, OcrFragment};

/// Greedy single-pass grouping of classified fragments into candidate lines.
///
/// Each unassigned fragment, in input order, seeds a group and pulls in every
/// other unassigned fragment on the same printed line or within the
/// horizontal proximity threshold. Membership depends on scan order: the
/// relation is neither symmetric across seeds nor transitive.
pub fn group_fragments<'a>(
    fragments: &[&'a OcrFragment],
    config: &ParserConfig,
) -> Vec<CandidateGroup<'a>> {
    let mut assigned = vec![false; fragments.len()];
    let mut groups = Vec::new();

    for (idx, &seed) in fragments.iter().enumerate() {
        if assigned[idx] {
            continue;
        }
        assigned[idx] = true;
        let mut group = CandidateGroup::seeded(seed);

        for (other_idx, &other) in fragments.iter().enumerate() {
            if assigned[other_idx] {
                continue;
            }
            if is_same_line(seed, other, config) || is_nearby(seed, other, config) {
                group.push(other);
                assigned[other_idx] = true;
            }
        }

        groups.push(group);
    }

    groups
}

fn is_same_line(a: &OcrFragment, b: &OcrFragment, config: &ParserConfig) -> bool {
    let y_diff = (a.bounding.top - b.bounding.top).abs();
    y_diff < a.bounding.height.max(b.bounding.height) * config.same_line_ratio
}

fn is_nearby(a: &OcrFragment, b: &OcrFragment, config: &ParserConfig) -> bool {
    (a.bounding.left - b.bounding.left).abs() < config.proximity_px
}

/// Append bare-number fragments to the group they sit beside vertically.
///
/// A figure joins the group holding the member with the largest positive
/// vertical overlap; ties go to the earlier group. Figures that overlap no
/// group are discarded.
pub fn attach_figures<'a>(groups: &mut [CandidateGroup<'a>], figures: &[&'a OcrFragment]) {
    for &figure in figures {
        let mut best: Option<(usize, f64)> = None;
        for (group_idx, group) in groups.iter().enumerate() {
            let overlap = group
                .fragments
                .iter()
                .map(|member| member.bounding.vertical_overlap(&figure.bounding))
                .fold(0.0, f64::max);
            if overlap > 0.0 && best.map_or(true, |(_, top)| overlap > top) {
                best = Some((group_idx, overlap));
            }
        }

        match best {
            Some((group_idx, _)) => groups[group_idx].push(figure),
            None => tracing::debug!(text = %figure.text, "figure beside no item line, dropped"),
        }
    }
}

/// Bare-number fragments from the raw OCR list, in input order.
pub fn figures<'a>(fragments: &'a [OcrFragment], config: &ParserConfig) -> Vec<&'a OcrFragment> {
    fragments
        .iter()
        .filter(|f| classify_fragment(f, config) == FragmentClass::Figure)
        .collect()
}
