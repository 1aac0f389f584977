use clap::Args;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use trade_journal::config::AppConfig;
use trade_journal::error::AppError;
use trade_journal::playbook::{
    default_rubric, format_score, grade_color, CheckState, Confluence, PlaybookId, Rubric, Rule,
    RuleKind, ScoreInput, ScoreResult, ScoringEngine, SetupServiceError,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding rules, confluences, check state, and an optional rubric
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the raw score result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RubricArgs {
    /// JSON file holding a playbook rubric
    #[arg(long)]
    pub(crate) input: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let input: ScoreInput = load_json(&args.input)?;
    let result = ScoringEngine::new(config.scoring).score(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in describe_score(&result) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn run_rubric_validate(args: RubricArgs) -> Result<(), AppError> {
    let rubric: Rubric = load_json(&args.input)?;

    for warning in rubric.weight_warnings() {
        println!("warning: {warning}");
    }

    rubric.validate().map_err(SetupServiceError::from)?;
    println!("rubric for playbook '{}' is valid", rubric.playbook_id.0);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let engine = ScoringEngine::default();

    println!("Setup scoring demo: London breakout playbook");
    println!("Rubric: 70% rules, 30% confluences, 0.40 must-rule penalty\n");

    for (step, input) in demo_steps() {
        let result = engine.score(&input);
        println!("{step}");
        for line in describe_score(&result) {
            println!("  {line}");
        }
        println!();
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn describe_score(result: &ScoreResult) -> Vec<String> {
    let parts = &result.parts;
    let mut lines = vec![
        format!(
            "Score {} | grade {} ({})",
            format_score(result.score),
            result.grade,
            grade_color(&result.grade).label()
        ),
        format!(
            "Rules: must {}/{}, should {}/{}, optional {}/{}",
            parts.must_hit,
            parts.must_count,
            parts.should_hit,
            parts.should_count,
            parts.optional_hit,
            parts.optional_count
        ),
        format!(
            "Confluences: {}/{} checked ({}/{} primary)",
            parts.conf_hit, parts.conf_count, parts.primary_conf_hit, parts.primary_conf_count
        ),
    ];

    if parts.missed_must {
        lines.push("Missed a must rule: penalty applied".to_string());
    }
    if parts.below_min_checks {
        lines.push(format!(
            "Only {} item(s) checked: grade capped by minimum checks",
            parts.total_checked
        ));
    }
    lines
}

fn demo_playbook() -> (Vec<Rule>, Vec<Confluence>, Rubric) {
    let rules = vec![
        Rule::new("htf-trend-aligned", RuleKind::Must, 2.0),
        Rule::new("asia-range-swept", RuleKind::Must, 1.0),
        Rule::new("displacement-candle", RuleKind::Should, 1.0),
        Rule::new("no-red-folder-news", RuleKind::Optional, 0.5),
    ];
    let confluences = vec![
        Confluence::new("fair-value-gap", 1.0, true),
        Confluence::new("vwap-reclaim", 1.0, false),
        Confluence::new("volume-spike", 0.5, false),
    ];
    let rubric = default_rubric().for_playbook(PlaybookId("london-breakout".to_string()));
    (rules, confluences, rubric)
}

fn demo_steps() -> Vec<(&'static str, ScoreInput)> {
    let (rules, confluences, rubric) = demo_playbook();
    let scenarios: [(&'static str, &[&str], &[&str]); 3] = [
        (
            "1. Everything lined up",
            &[
                "htf-trend-aligned",
                "asia-range-swept",
                "displacement-candle",
                "no-red-folder-news",
            ],
            &["fair-value-gap", "vwap-reclaim", "volume-spike"],
        ),
        (
            "2. Skipped the optional news check and the volume spike",
            &["htf-trend-aligned", "asia-range-swept", "displacement-candle"],
            &["fair-value-gap", "vwap-reclaim"],
        ),
        (
            "3. Took the trade without the Asia range sweep",
            &["htf-trend-aligned", "displacement-candle", "no-red-folder-news"],
            &["fair-value-gap", "vwap-reclaim", "volume-spike"],
        ),
    ];

    scenarios
        .into_iter()
        .map(|(label, rule_ids, confluence_ids)| {
            let mut checks = CheckState::default();
            for id in rule_ids {
                checks.rules_checked.insert(id.to_string(), true);
            }
            for id in confluence_ids {
                checks.confluences_checked.insert(id.to_string(), true);
            }
            let input = ScoreInput::new(rules.clone(), confluences.clone(), checks, rubric.clone());
            (label, input)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_grades_degrade_as_checks_are_skipped() {
        let engine = ScoringEngine::default();
        let grades: Vec<String> = demo_steps()
            .iter()
            .map(|(_, input)| engine.score(input).grade)
            .collect();

        assert_eq!(grades[0], "A+");
        assert_ne!(grades[1], "A+");
        assert_eq!(grades[2], "F");
    }

    #[test]
    fn describe_score_flags_penalties() {
        let steps = demo_steps();
        let result = ScoringEngine::default().score(&steps[2].1);

        let lines = describe_score(&result);
        assert!(lines[0].starts_with("Score "));
        assert!(lines.iter().any(|line| line.contains("penalty applied")));
    }

    #[test]
    fn load_json_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!(
            "trade-journal-demo-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").expect("temp file writes");

        let result: Result<Rubric, AppError> = load_json(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[test]
    fn load_json_reports_missing_files() {
        let result: Result<Rubric, AppError> =
            load_json(Path::new("/definitely/not/here/rubric.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
