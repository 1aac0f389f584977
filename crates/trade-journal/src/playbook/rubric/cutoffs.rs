use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minimum normalized score required to earn `label`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeCutoff {
    pub label: String,
    pub cutoff: f64,
}

/// Grade cutoffs in declaration order.
///
/// Serialized as a JSON object. Declaration order is kept on both sides because it breaks
/// ties between equal cutoffs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeCutoffs(Vec<GradeCutoff>);

impl GradeCutoffs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, cutoff: f64) {
        self.0.push(GradeCutoff {
            label: label.into(),
            cutoff,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GradeCutoff> {
        self.0.iter()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.cutoff)
    }

    /// Entries from best to worst grade. The sort is stable, so the first declared of two
    /// equal cutoffs ranks higher. Non-finite cutoffs can never be reached and are dropped.
    pub fn ranked(&self) -> Vec<&GradeCutoff> {
        let mut ranked: Vec<&GradeCutoff> =
            self.0.iter().filter(|entry| entry.cutoff.is_finite()).collect();
        ranked.sort_by(|a, b| b.cutoff.total_cmp(&a.cutoff));
        ranked
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for GradeCutoffs {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut cutoffs = GradeCutoffs::new();
        for (label, cutoff) in iter {
            cutoffs.push(label, cutoff);
        }
        cutoffs
    }
}

impl Serialize for GradeCutoffs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.label, &entry.cutoff)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GradeCutoffs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CutoffsVisitor)
    }
}

struct CutoffsVisitor;

impl<'de> Visitor<'de> for CutoffsVisitor {
    type Value = GradeCutoffs;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of grade labels to cutoff scores")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut cutoffs = GradeCutoffs::new();
        while let Some((label, cutoff)) = access.next_entry::<String, f64>()? {
            cutoffs.push(label, cutoff);
        }
        Ok(cutoffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_objects_keep_declaration_order() {
        let cutoffs: GradeCutoffs =
            serde_json::from_str(r#"{"D":0.6,"A":0.9,"B":0.8}"#).expect("cutoffs parse");
        let labels: Vec<&str> = cutoffs.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, vec!["D", "A", "B"]);

        let encoded = serde_json::to_string(&cutoffs).expect("cutoffs serialize");
        assert_eq!(encoded, r#"{"D":0.6,"A":0.9,"B":0.8}"#);
    }

    #[test]
    fn ranking_is_descending_and_stable_on_ties() {
        let cutoffs =
            GradeCutoffs::from_iter([("B", 0.8), ("A", 0.9), ("B+", 0.8), ("X", f64::NAN)]);
        let labels: Vec<&str> = cutoffs
            .ranked()
            .into_iter()
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(labels, vec!["A", "B", "B+"]);
    }
}
