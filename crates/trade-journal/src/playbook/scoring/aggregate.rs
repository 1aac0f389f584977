use super::super::domain::{is_checked, non_negative, CheckMap, Confluence, Rule, RuleKind};

/// Ceiling for a single effective weight, so summing a whole checklist stays finite.
const MAX_ITEM_WEIGHT: f64 = 1e12;

/// Display bucket an item is tallied under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TallyBucket {
    Must,
    Should,
    Optional,
    PrimaryConfluence,
    Confluence,
}

/// Anything that can sit on a weighted checklist.
pub(crate) trait ChecklistItem {
    fn id(&self) -> &str;
    fn weight(&self) -> f64;
    fn bucket(&self) -> TallyBucket;
}

impl ChecklistItem for Rule {
    fn id(&self) -> &str {
        &self.id
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn bucket(&self) -> TallyBucket {
        match self.kind {
            RuleKind::Must => TallyBucket::Must,
            RuleKind::Should => TallyBucket::Should,
            RuleKind::Optional => TallyBucket::Optional,
        }
    }
}

impl ChecklistItem for Confluence {
    fn id(&self) -> &str {
        &self.id
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn bucket(&self) -> TallyBucket {
        if self.primary {
            TallyBucket::PrimaryConfluence
        } else {
            TallyBucket::Confluence
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub hit: u32,
    pub count: u32,
}

impl Tally {
    fn record(&mut self, checked: bool) {
        self.count += 1;
        if checked {
            self.hit += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tallies {
    pub must: Tally,
    pub should: Tally,
    pub optional: Tally,
    pub primary_confluence: Tally,
    pub confluence: Tally,
}

impl Tallies {
    fn bucket_mut(&mut self, bucket: TallyBucket) -> &mut Tally {
        match bucket {
            TallyBucket::Must => &mut self.must,
            TallyBucket::Should => &mut self.should,
            TallyBucket::Optional => &mut self.optional,
            TallyBucket::PrimaryConfluence => &mut self.primary_confluence,
            TallyBucket::Confluence => &mut self.confluence,
        }
    }

    pub fn hits(&self) -> u32 {
        self.must.hit
            + self.should.hit
            + self.optional.hit
            + self.primary_confluence.hit
            + self.confluence.hit
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Aggregate {
    /// `None` when nothing on the list carries weight.
    pub sub_score: Option<f64>,
    pub tallies: Tallies,
}

/// Weighted share of checked items. Tallies ignore weights entirely.
pub(crate) fn aggregate<I: ChecklistItem>(
    items: &[I],
    checked: &CheckMap,
    primary_multiplier: f64,
) -> Aggregate {
    let mut tallies = Tallies::default();
    let mut earned = 0.0;
    let mut available = 0.0;

    for item in items {
        let bucket = item.bucket();
        let hit = is_checked(checked, item.id());
        tallies.bucket_mut(bucket).record(hit);

        let mut weight = non_negative(Some(item.weight()));
        if bucket == TallyBucket::PrimaryConfluence {
            weight *= primary_multiplier;
        }
        let weight = weight.min(MAX_ITEM_WEIGHT);

        available += weight;
        if hit {
            earned += weight;
        }
    }

    let sub_score = if available.is_finite() && available > 0.0 {
        Some((earned / available).clamp(0.0, 1.0))
    } else {
        None
    };

    Aggregate { sub_score, tallies }
}
