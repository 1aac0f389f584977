use serde::{Deserialize, Serialize};

/// Semantic color tier for a grade badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTier {
    Good,
    Pass,
    Warn,
    Fail,
}

impl GradeTier {
    pub fn label(self) -> &'static str {
        match self {
            GradeTier::Good => "good",
            GradeTier::Pass => "pass",
            GradeTier::Warn => "warn",
            GradeTier::Fail => "fail",
        }
    }
}

pub fn grade_color(grade: &str) -> GradeTier {
    match grade.trim_start().chars().next() {
        Some('A') => GradeTier::Good,
        Some('B') => GradeTier::Pass,
        Some('C') => GradeTier::Warn,
        _ => GradeTier::Fail,
    }
}

/// Render a `[0, 1]` score as a whole percentage, e.g. `"85%"`.
pub fn format_score(score: f64) -> String {
    let score = if score.is_finite() { score } else { 0.0 };
    format!("{:.0}%", score * 100.0)
}
