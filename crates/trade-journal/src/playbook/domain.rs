use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for playbooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybookId(pub String);

/// Identifier wrapper for journaled trades.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub String);

/// Check-state keyed by rule or confluence id. Absent keys read as unchecked.
pub type CheckMap = BTreeMap<String, bool>;

/// Severity of a playbook rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    Must,
    Should,
    Optional,
}

impl RuleKind {
    /// Parse a loosely typed label from a persisted row. Unknown labels fall back to
    /// `Optional` so a typo can never trigger the must-rule penalty.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "must" => Self::Must,
            "should" => Self::Should,
            _ => Self::Optional,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleKind::Must => "MUST",
            RuleKind::Should => "SHOULD",
            RuleKind::Optional => "OPTIONAL",
        }
    }
}

/// One entry criterion of a playbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RuleKind,
    #[serde(default)]
    pub weight: f64,
}

impl Rule {
    pub fn new(id: impl Into<String>, kind: RuleKind, weight: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            weight,
        }
    }
}

/// Supporting signal for a setup. Primary confluences carry extra weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confluence {
    pub id: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub primary: bool,
}

impl Confluence {
    pub fn new(id: impl Into<String>, weight: f64, primary: bool) -> Self {
        Self {
            id: id.into(),
            weight,
            primary,
        }
    }
}

/// Row shape of `playbook_rules` as it comes back from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybookRuleRow {
    pub id: String,
    #[serde(default)]
    pub rule_type: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl From<PlaybookRuleRow> for Rule {
    fn from(row: PlaybookRuleRow) -> Self {
        let kind = row
            .rule_type
            .as_deref()
            .map(RuleKind::from_label)
            .unwrap_or(RuleKind::Optional);
        Rule {
            id: row.id,
            kind,
            weight: non_negative(row.weight),
        }
    }
}

/// Row shape of `playbook_confluences` as it comes back from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybookConfluenceRow {
    pub id: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

impl From<PlaybookConfluenceRow> for Confluence {
    fn from(row: PlaybookConfluenceRow) -> Self {
        Confluence {
            id: row.id,
            weight: non_negative(row.weight),
            primary: row.is_primary.unwrap_or(false),
        }
    }
}

/// Missing, non-finite, and negative numbers all collapse to zero.
pub(crate) fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(number) if number.is_finite() && number > 0.0 => number,
        _ => 0.0,
    }
}

/// Both checklists of a setup as toggled by the trader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckState {
    #[serde(default)]
    pub rules_checked: CheckMap,
    #[serde(default)]
    pub confluences_checked: CheckMap,
}

impl CheckState {
    pub fn is_rule_checked(&self, id: &str) -> bool {
        is_checked(&self.rules_checked, id)
    }

    pub fn is_confluence_checked(&self, id: &str) -> bool {
        is_checked(&self.confluences_checked, id)
    }
}

pub(crate) fn is_checked(map: &CheckMap, id: &str) -> bool {
    map.get(id).copied().unwrap_or(false)
}
