//! Coefficient and threshold tables of the AGGIR algorithm
//! (decree n°97-427 of 28 April 1997).
//!
//! Groups are visited A to H. Each group weighs the ten scored items; the
//! group score is then matched against the group's thresholds, which either
//! assign a GIR or hand over to the next group.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::item::Item;
use crate::rating::Rating;

/// Version tag recorded with every result.
pub const ALGORITHM_VERSION: &str = "1997-04-28";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum RuleGroup {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl RuleGroup {
    /// Evaluation order.
    pub const ORDER: [RuleGroup; 8] = [
        RuleGroup::A,
        RuleGroup::B,
        RuleGroup::C,
        RuleGroup::D,
        RuleGroup::E,
        RuleGroup::F,
        RuleGroup::G,
        RuleGroup::H,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleGroup::A => "A",
            RuleGroup::B => "B",
            RuleGroup::C => "C",
            RuleGroup::D => "D",
            RuleGroup::E => "E",
            RuleGroup::F => "F",
            RuleGroup::G => "G",
            RuleGroup::H => "H",
        }
    }

    pub fn table(self) -> &'static GroupTable {
        &GROUPS[self as usize]
    }
}

impl std::fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Contribution of one item to a group score. A always contributes zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weight {
    pub item: Item,
    pub partial: i32,
    pub no_autonomy: i32,
}

impl Weight {
    pub fn for_rating(&self, rating: Rating) -> i32 {
        match rating {
            Rating::Full => 0,
            Rating::Partial => self.partial,
            Rating::NoAutonomy => self.no_autonomy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Terminal: `rank` is the row number of the official grid (1–13).
    Level { rank: u8, gir: u8 },
    Continue,
}

/// A threshold row matches every score `>= min` not claimed by an earlier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    pub min: i32,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub struct GroupTable {
    pub group: RuleGroup,
    pub weights: [Weight; 10],
    /// Rows sorted by descending `min`; the last row starts at `i32::MIN`.
    pub thresholds: &'static [Threshold],
}

impl GroupTable {
    /// First threshold row covering `score`.
    pub fn lookup(&self, score: i32) -> Option<&Threshold> {
        self.thresholds.iter().find(|t| score >= t.min)
    }
}

const fn w(item: Item, no_autonomy: i32, partial: i32) -> Weight {
    Weight {
        item,
        partial,
        no_autonomy,
    }
}

const fn level(min: i32, rank: u8, gir: u8) -> Threshold {
    Threshold {
        min,
        outcome: Outcome::Level { rank, gir },
    }
}

const fn next(min: i32) -> Threshold {
    Threshold {
        min,
        outcome: Outcome::Continue,
    }
}

// Negative group scores are possible (group B weighs indoor mobility
// negatively); they fall into the lowest row.
const FLOOR: i32 = i32::MIN;

use Item::{
    Alerting, Coherence, Continence, Dressing, Eating, IndoorMobility, Orientation,
    OutdoorMobility, Transfers, Washing,
};

// Columns: item, weight for C, weight for B.
pub static GROUPS: [GroupTable; 8] = [
    GroupTable {
        group: RuleGroup::A,
        weights: [
            w(Coherence, 2000, 0),
            w(Orientation, 1200, 0),
            w(Washing, 40, 16),
            w(Dressing, 40, 16),
            w(Eating, 60, 20),
            w(Continence, 100, 16),
            w(Transfers, 800, 120),
            w(IndoorMobility, 200, 32),
            w(OutdoorMobility, 0, 0),
            w(Alerting, 0, 0),
        ],
        thresholds: &[
            level(4380, 1, 1),
            level(4140, 2, 2),
            level(3390, 3, 2),
            next(FLOOR),
        ],
    },
    GroupTable {
        group: RuleGroup::B,
        weights: [
            w(Coherence, 1500, 320),
            w(Orientation, 1200, 120),
            w(Washing, 40, 16),
            w(Dressing, 40, 16),
            w(Eating, 60, 0),
            w(Continence, 100, 16),
            w(Transfers, 800, 120),
            w(IndoorMobility, -80, -40),
            w(OutdoorMobility, 0, 0),
            w(Alerting, 0, 0),
        ],
        thresholds: &[level(2016, 4, 2), next(FLOOR)],
    },
    GroupTable {
        group: RuleGroup::C,
        weights: [
            w(Coherence, 0, 0),
            w(Orientation, 0, 0),
            w(Washing, 40, 16),
            w(Dressing, 40, 16),
            w(Eating, 60, 20),
            w(Continence, 160, 20),
            w(Transfers, 1000, 200),
            w(IndoorMobility, 400, 40),
            w(OutdoorMobility, 0, 0),
            w(Alerting, 0, 0),
        ],
        thresholds: &[level(1700, 5, 2), level(1432, 6, 2), next(FLOOR)],
    },
    GroupTable {
        group: RuleGroup::D,
        weights: [
            w(Coherence, 0, 0),
            w(Orientation, 0, 0),
            w(Washing, 0, 0),
            w(Dressing, 0, 0),
            w(Eating, 2000, 200),
            w(Continence, 400, 200),
            w(Transfers, 2000, 200),
            w(IndoorMobility, 200, 0),
            w(OutdoorMobility, 0, 0),
            w(Alerting, 0, 0),
        ],
        thresholds: &[level(2400, 7, 2), next(FLOOR)],
    },
    GroupTable {
        group: RuleGroup::E,
        weights: [
            w(Coherence, 400, 0),
            w(Orientation, 400, 0),
            w(Washing, 400, 100),
            w(Dressing, 400, 100),
            w(Eating, 400, 100),
            w(Continence, 800, 100),
            w(Transfers, 800, 100),
            w(IndoorMobility, 200, 0),
            w(OutdoorMobility, 0, 0),
            w(Alerting, 0, 0),
        ],
        thresholds: &[level(1200, 8, 3), next(FLOOR)],
    },
    GroupTable {
        group: RuleGroup::F,
        weights: [
            w(Coherence, 200, 100),
            w(Orientation, 200, 100),
            w(Washing, 500, 100),
            w(Dressing, 500, 100),
            w(Eating, 500, 100),
            w(Continence, 500, 100),
            w(Transfers, 500, 100),
            w(IndoorMobility, 200, 0),
            w(OutdoorMobility, 0, 0),
            w(Alerting, 0, 0),
        ],
        thresholds: &[level(800, 9, 3), next(FLOOR)],
    },
    GroupTable {
        group: RuleGroup::G,
        weights: [
            w(Coherence, 150, 0),
            w(Orientation, 150, 0),
            w(Washing, 300, 200),
            w(Dressing, 300, 200),
            w(Eating, 500, 200),
            w(Continence, 500, 200),
            w(Transfers, 400, 200),
            w(IndoorMobility, 200, 100),
            w(OutdoorMobility, 0, 0),
            w(Alerting, 0, 0),
        ],
        thresholds: &[level(650, 10, 4), next(FLOOR)],
    },
    GroupTable {
        group: RuleGroup::H,
        weights: [
            w(Coherence, 0, 0),
            w(Orientation, 0, 0),
            w(Washing, 3000, 2000),
            w(Dressing, 3000, 2000),
            w(Eating, 3000, 2000),
            w(Continence, 3000, 2000),
            w(Transfers, 1000, 2000),
            w(IndoorMobility, 1000, 1000),
            w(OutdoorMobility, 0, 0),
            w(Alerting, 0, 0),
        ],
        thresholds: &[level(4000, 11, 4), level(2000, 12, 5), level(FLOOR, 13, 6)],
    },
];
