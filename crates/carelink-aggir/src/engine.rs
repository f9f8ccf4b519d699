use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::combine::combine;
use crate::config::{MissingItemPolicy, ScoringConfig};
use crate::error::AggirError;
use crate::evaluation::Evaluation;
use crate::item::{Item, ItemKind};
use crate::rating::{Rating, classify};
use crate::tables::{ALGORITHM_VERSION, Outcome, RuleGroup};

/// GIR, from 1 (most dependent) to 6 (most autonomous).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(try_from = "u8")]
#[ts(export)]
pub struct DependencyLevel(u8);

impl DependencyLevel {
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DependencyLevel {
    type Error = AggirError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or(AggirError::InvalidLevel(level))
    }
}

impl std::fmt::Display for DependencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GIR {}", self.0)
    }
}

/// Outcome of one scoring run, kept whole for the legal audit of how a GIR
/// was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringResult {
    pub level: DependencyLevel,
    pub terminating_group: RuleGroup,
    /// Row of the official threshold grid that matched (1–13).
    pub rank: u8,
    /// Score of the terminating group.
    pub score: i32,
    /// Score of every group visited, up to and including the terminating one.
    pub score_per_group: BTreeMap<RuleGroup, i32>,
    /// Ratings of the six composite and four simple items.
    pub rating_per_item: BTreeMap<Item, Rating>,
    pub rating_per_subitem: BTreeMap<Item, Rating>,
    pub algorithm_version: String,
}

/// Letters derived from an [`Evaluation`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ratings {
    /// Composite and simple items.
    pub items: BTreeMap<Item, Rating>,
    pub sub_items: BTreeMap<Item, Rating>,
}

/// Classify every leaf, then combine sub-items into their composite items.
///
/// A composite item is only rated when all of its sub-items are.
pub fn rate(evaluation: &Evaluation) -> Ratings {
    let sub_items: BTreeMap<Item, Rating> = evaluation
        .iter()
        .filter(|(item, _)| matches!(item.kind(), ItemKind::SubItem(_)))
        .map(|(item, response)| (item, classify(response)))
        .collect();

    let mut items = BTreeMap::new();
    for composite in Item::COMPOSITES {
        let letters: Option<Vec<Rating>> = composite
            .sub_items()
            .iter()
            .map(|sub| sub_items.get(sub).copied())
            .collect();
        if let Some(letters) = letters
            && let Some(rating) = combine(composite, &letters)
        {
            items.insert(composite, rating);
        }
    }
    for simple in Item::SIMPLE {
        if let Some(response) = evaluation.get(simple) {
            items.insert(simple, classify(response));
        }
    }

    Ratings { items, sub_items }
}

/// Weighted score of `group`. Items absent from `ratings` count as B.
pub fn score_group(ratings: &BTreeMap<Item, Rating>, group: RuleGroup) -> i32 {
    group
        .table()
        .weights
        .iter()
        .map(|weight| {
            let rating = ratings.get(&weight.item).copied().unwrap_or(Rating::Partial);
            weight.for_rating(rating)
        })
        .sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub group: RuleGroup,
    pub rank: u8,
    pub gir: u8,
    pub score: i32,
    pub scores: BTreeMap<RuleGroup, i32>,
}

/// Visit `order` until a threshold row assigns a GIR.
pub(crate) fn resolve(
    ratings: &BTreeMap<Item, Rating>,
    order: &[RuleGroup],
) -> Option<Resolution> {
    let mut scores = BTreeMap::new();
    for group in order {
        let score = score_group(ratings, *group);
        scores.insert(*group, score);

        let row = group.table().lookup(score)?;
        debug!(group = %group, score, "scored AGGIR group");
        if let Outcome::Level { rank, gir } = row.outcome {
            return Some(Resolution {
                group: *group,
                rank,
                gir,
                score,
                scores,
            });
        }
    }
    None
}

/// Compute the GIR of `evaluation`, counting unrated items as B.
///
/// # Panics
///
/// Panics if no threshold row matches, which can only happen if the static
/// tables in [`crate::tables`] stop covering every score.
pub fn evaluate(evaluation: &Evaluation) -> ScoringResult {
    let missing = evaluation.missing_leaves();
    if !missing.is_empty() {
        debug!(count = missing.len(), ?missing, "unrated items scored as B");
    }

    let ratings = rate(evaluation);
    let resolution = resolve(&ratings.items, &RuleGroup::ORDER)
        .unwrap_or_else(|| panic!("AGGIR threshold tables do not cover every score"));
    let level = DependencyLevel::new(resolution.gir)
        .unwrap_or_else(|| panic!("AGGIR threshold table assigns GIR {}", resolution.gir));

    info!(
        gir = level.get(),
        group = %resolution.group,
        rank = resolution.rank,
        score = resolution.score,
        "computed GIR"
    );

    ScoringResult {
        level,
        terminating_group: resolution.group,
        rank: resolution.rank,
        score: resolution.score,
        score_per_group: resolution.scores,
        rating_per_item: ratings.items,
        rating_per_subitem: ratings.sub_items,
        algorithm_version: ALGORITHM_VERSION.to_string(),
    }
}

/// Scoring entry point carrying a [`ScoringConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: ScoringConfig,
}

impl Engine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(ScoringConfig::from_env())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate(&self, evaluation: &Evaluation) -> Result<ScoringResult, AggirError> {
        if self.config.missing_items == MissingItemPolicy::Reject {
            let missing = evaluation.missing_leaves();
            if !missing.is_empty() {
                return Err(AggirError::IncompleteEvaluation { missing });
            }
        }
        Ok(evaluate(evaluation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Response;

    fn all_rated(rating: Rating) -> BTreeMap<Item, Rating> {
        Item::COMPOSITES
            .into_iter()
            .chain(Item::SIMPLE)
            .map(|item| (item, rating))
            .collect()
    }

    #[test]
    fn full_autonomy_scores_zero_everywhere() {
        let ratings = all_rated(Rating::Full);
        for group in RuleGroup::ORDER {
            assert_eq!(score_group(&ratings, group), 0, "group {group}");
        }
    }

    #[test]
    fn group_a_score_for_no_autonomy() {
        let ratings = all_rated(Rating::NoAutonomy);
        assert_eq!(score_group(&ratings, RuleGroup::A), 4440);
        assert_eq!(score_group(&ratings, RuleGroup::B), 3660);
    }

    #[test]
    fn unrated_items_count_as_partial() {
        let empty = BTreeMap::new();
        let partial = all_rated(Rating::Partial);
        for group in RuleGroup::ORDER {
            assert_eq!(score_group(&empty, group), score_group(&partial, group));
        }
        assert_eq!(score_group(&empty, RuleGroup::A), 220);
    }

    #[test]
    fn group_b_can_score_below_zero() {
        let mut ratings = all_rated(Rating::Full);
        ratings.insert(Item::IndoorMobility, Rating::NoAutonomy);
        assert_eq!(score_group(&ratings, RuleGroup::B), -80);

        // the negative score continues past B instead of failing to match
        let resolution = resolve(&ratings, &RuleGroup::ORDER).unwrap();
        assert!(resolution.scores[&RuleGroup::B] < 0);
        assert_eq!(resolution.group, RuleGroup::H);
        assert_eq!(resolution.gir, 6);
    }

    #[test]
    fn visiting_order_matters() {
        let ratings = all_rated(Rating::NoAutonomy);

        let forward = resolve(&ratings, &RuleGroup::ORDER).unwrap();
        assert_eq!((forward.group, forward.gir), (RuleGroup::A, 1));

        let mut reversed = RuleGroup::ORDER;
        reversed.reverse();
        let backward = resolve(&ratings, &reversed).unwrap();
        assert_eq!((backward.group, backward.gir), (RuleGroup::H, 4));
    }

    #[test]
    fn swapping_d_and_h_changes_the_level() {
        // Eating C and transfers C: A=860, B=860 and C=1060 continue,
        // D=4000 stops at GIR 2 while H=4000 would give GIR 4.
        let mut ratings = all_rated(Rating::Full);
        ratings.insert(Item::Eating, Rating::NoAutonomy);
        ratings.insert(Item::Transfers, Rating::NoAutonomy);

        let forward = resolve(&ratings, &RuleGroup::ORDER).unwrap();
        assert_eq!((forward.group, forward.gir, forward.rank), (RuleGroup::D, 2, 7));
        assert_eq!(forward.scores.len(), 4);

        let swapped = [
            RuleGroup::A,
            RuleGroup::B,
            RuleGroup::C,
            RuleGroup::H,
            RuleGroup::E,
            RuleGroup::F,
            RuleGroup::G,
            RuleGroup::D,
        ];
        let other = resolve(&ratings, &swapped).unwrap();
        assert_eq!((other.group, other.gir, other.rank), (RuleGroup::H, 4, 11));
    }

    #[test]
    fn every_group_is_visited_before_h() {
        // Transfers C and washing B continue through A..G and land on
        // H=3000, rank 12.
        let mut ratings = all_rated(Rating::Full);
        ratings.insert(Item::Transfers, Rating::NoAutonomy);
        ratings.insert(Item::Washing, Rating::Partial);

        let resolution = resolve(&ratings, &RuleGroup::ORDER).unwrap();
        assert_eq!(
            resolution.scores.into_iter().collect::<Vec<_>>(),
            vec![
                (RuleGroup::A, 816),
                (RuleGroup::B, 816),
                (RuleGroup::C, 1016),
                (RuleGroup::D, 2000),
                (RuleGroup::E, 900),
                (RuleGroup::F, 600),
                (RuleGroup::G, 600),
                (RuleGroup::H, 3000),
            ]
        );
        assert_eq!((resolution.gir, resolution.rank), (5, 12));
    }

    #[test]
    fn strict_engine_rejects_missing_leaves() {
        let mut evaluation = Evaluation::uniform(Response::uniform(true));
        evaluation.remove(Item::Fecal);
        evaluation.remove(Item::Alerting);

        let err = Engine::new(ScoringConfig::strict())
            .evaluate(&evaluation)
            .unwrap_err();
        match err {
            AggirError::IncompleteEvaluation { missing } => {
                assert_eq!(missing, vec![Item::Fecal, Item::Alerting]);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(Engine::default().evaluate(&evaluation).is_ok());
    }

    #[test]
    fn composite_needs_every_sub_item() {
        let mut evaluation = Evaluation::uniform(Response::uniform(false));
        evaluation.remove(Item::DressingMiddle);

        let ratings = rate(&evaluation);
        assert!(!ratings.items.contains_key(&Item::Dressing));
        assert_eq!(ratings.items[&Item::Washing], Rating::NoAutonomy);
        assert_eq!(ratings.sub_items.len(), 12);
    }

    #[test]
    fn dependency_level_bounds() {
        assert!(DependencyLevel::new(0).is_none());
        assert!(DependencyLevel::new(7).is_none());
        assert_eq!(DependencyLevel::new(3).map(DependencyLevel::get), Some(3));
    }

    #[test]
    fn dependency_level_out_of_range_does_not_deserialize() {
        assert_eq!(
            serde_json::from_str::<DependencyLevel>("4").unwrap(),
            DependencyLevel::new(4).unwrap()
        );
        assert!(serde_json::from_str::<DependencyLevel>("9").is_err());
        assert!(serde_json::from_str::<DependencyLevel>("0").is_err());
        assert!(matches!(
            DependencyLevel::try_from(7),
            Err(AggirError::InvalidLevel(7))
        ));
    }
}
