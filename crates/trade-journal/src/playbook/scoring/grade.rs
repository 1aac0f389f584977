use super::super::rubric::{GradeCutoff, GradeCutoffs};

/// Grade for scores below every configured cutoff.
pub const FALLBACK_GRADE: &str = "F";

/// Map a final score onto the rubric's cutoff table. Total over `[0, 1]`.
pub fn map_grade(score: f64, cutoffs: &GradeCutoffs) -> String {
    let ranked = cutoffs.ranked();
    match reached(score, &ranked) {
        Some(entry) => entry.label.clone(),
        None => FALLBACK_GRADE.to_string(),
    }
}

/// Lowest configured grade, if any cutoff is reachable at all.
pub fn lowest_grade(cutoffs: &GradeCutoffs) -> Option<&str> {
    cutoffs.ranked().last().map(|entry| entry.label.as_str())
}

/// Grade forced when too few items were checked: the lowest configured grade whatever the
/// score. Only a table without reachable cutoffs yields the fallback grade.
pub(crate) fn floor_grade(cutoffs: &GradeCutoffs) -> String {
    lowest_grade(cutoffs).unwrap_or(FALLBACK_GRADE).to_string()
}

fn reached<'a>(score: f64, ranked: &[&'a GradeCutoff]) -> Option<&'a GradeCutoff> {
    ranked
        .iter()
        .copied()
        .find(|entry| score >= entry.cutoff)
}
