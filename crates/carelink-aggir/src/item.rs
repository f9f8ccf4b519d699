use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The 23 variables of the AGGIR grid.
///
/// Declared in the official numbering of the grid, so `Ord` sorts a sub-item
/// right after its composite item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Item {
    Coherence,
    Communication,
    Behavior,
    Orientation,
    Time,
    Space,
    Washing,
    WashingUpper,
    WashingLower,
    Dressing,
    DressingUpper,
    DressingMiddle,
    DressingLower,
    Eating,
    SelfService,
    Feeding,
    Continence,
    Urinary,
    Fecal,
    Transfers,
    IndoorMobility,
    OutdoorMobility,
    Alerting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Rated by combining its sub-items.
    Composite,
    /// Leaf feeding the given composite item.
    SubItem(Item),
    /// Leaf rated directly, never combined.
    Simple,
}

impl Item {
    pub const ALL: [Item; 23] = [
        Item::Coherence,
        Item::Communication,
        Item::Behavior,
        Item::Orientation,
        Item::Time,
        Item::Space,
        Item::Washing,
        Item::WashingUpper,
        Item::WashingLower,
        Item::Dressing,
        Item::DressingUpper,
        Item::DressingMiddle,
        Item::DressingLower,
        Item::Eating,
        Item::SelfService,
        Item::Feeding,
        Item::Continence,
        Item::Urinary,
        Item::Fecal,
        Item::Transfers,
        Item::IndoorMobility,
        Item::OutdoorMobility,
        Item::Alerting,
    ];

    pub const COMPOSITES: [Item; 6] = [
        Item::Coherence,
        Item::Orientation,
        Item::Washing,
        Item::Dressing,
        Item::Eating,
        Item::Continence,
    ];

    pub const SIMPLE: [Item; 4] = [
        Item::Transfers,
        Item::IndoorMobility,
        Item::OutdoorMobility,
        Item::Alerting,
    ];

    /// The 17 leaves that receive a response: 13 sub-items and 4 simple items.
    pub const LEAVES: [Item; 17] = [
        Item::Communication,
        Item::Behavior,
        Item::Time,
        Item::Space,
        Item::WashingUpper,
        Item::WashingLower,
        Item::DressingUpper,
        Item::DressingMiddle,
        Item::DressingLower,
        Item::SelfService,
        Item::Feeding,
        Item::Urinary,
        Item::Fecal,
        Item::Transfers,
        Item::IndoorMobility,
        Item::OutdoorMobility,
        Item::Alerting,
    ];

    /// Official grid number (1–23).
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn kind(self) -> ItemKind {
        match self {
            Item::Coherence
            | Item::Orientation
            | Item::Washing
            | Item::Dressing
            | Item::Eating
            | Item::Continence => ItemKind::Composite,
            Item::Communication | Item::Behavior => ItemKind::SubItem(Item::Coherence),
            Item::Time | Item::Space => ItemKind::SubItem(Item::Orientation),
            Item::WashingUpper | Item::WashingLower => ItemKind::SubItem(Item::Washing),
            Item::DressingUpper | Item::DressingMiddle | Item::DressingLower => {
                ItemKind::SubItem(Item::Dressing)
            }
            Item::SelfService | Item::Feeding => ItemKind::SubItem(Item::Eating),
            Item::Urinary | Item::Fecal => ItemKind::SubItem(Item::Continence),
            Item::Transfers | Item::IndoorMobility | Item::OutdoorMobility | Item::Alerting => {
                ItemKind::Simple
            }
        }
    }

    pub fn is_leaf(self) -> bool {
        !matches!(self.kind(), ItemKind::Composite)
    }

    /// Sub-items of a composite item, in grid order. Empty for leaves.
    pub fn sub_items(self) -> &'static [Item] {
        match self {
            Item::Coherence => &[Item::Communication, Item::Behavior],
            Item::Orientation => &[Item::Time, Item::Space],
            Item::Washing => &[Item::WashingUpper, Item::WashingLower],
            Item::Dressing => &[
                Item::DressingUpper,
                Item::DressingMiddle,
                Item::DressingLower,
            ],
            Item::Eating => &[Item::SelfService, Item::Feeding],
            Item::Continence => &[Item::Urinary, Item::Fecal],
            _ => &[],
        }
    }

    /// Code written into newly created documents.
    pub fn code(self) -> &'static str {
        match self {
            Item::Coherence => "COHERENCE",
            Item::Communication => "COMMUNICATION",
            Item::Behavior => "COMPORTEMENT",
            Item::Orientation => "ORIENTATION",
            Item::Time => "TEMPS",
            Item::Space => "ESPACE",
            Item::Washing => "TOILETTE",
            Item::WashingUpper => "TOILETTE_HAUT",
            Item::WashingLower => "TOILETTE_BAS",
            Item::Dressing => "HABILLAGE",
            Item::DressingUpper => "HABILLAGE_HAUT",
            Item::DressingMiddle => "HABILLAGE_MOYEN",
            Item::DressingLower => "HABILLAGE_BAS",
            Item::Eating => "ALIMENTATION",
            Item::SelfService => "SE_SERVIR",
            Item::Feeding => "MANGER",
            Item::Continence => "ELIMINATION",
            Item::Urinary => "URINAIRE",
            Item::Fecal => "FECALE",
            Item::Transfers => "TRANSFERTS",
            Item::IndoorMobility => "DEPLACEMENT_INTERIEUR",
            Item::OutdoorMobility => "DEPLACEMENT_EXTERIEUR",
            Item::Alerting => "ALERTER",
        }
    }

    /// Display name as shown on the paper grid.
    pub fn label(self) -> &'static str {
        match self {
            Item::Coherence => "Cohérence",
            Item::Communication => "Communication",
            Item::Behavior => "Comportement",
            Item::Orientation => "Orientation",
            Item::Time => "Temps",
            Item::Space => "Espace",
            Item::Washing => "Toilette",
            Item::WashingUpper => "Toilette du haut",
            Item::WashingLower => "Toilette du bas",
            Item::Dressing => "Habillage",
            Item::DressingUpper => "Habillage du haut",
            Item::DressingMiddle => "Habillage du moyen",
            Item::DressingLower => "Habillage du bas",
            Item::Eating => "Alimentation",
            Item::SelfService => "Se servir",
            Item::Feeding => "Manger",
            Item::Continence => "Élimination",
            Item::Urinary => "Élimination urinaire",
            Item::Fecal => "Élimination fécale",
            Item::Transfers => "Transferts",
            Item::IndoorMobility => "Déplacements à l'intérieur",
            Item::OutdoorMobility => "Déplacements à l'extérieur",
            Item::Alerting => "Alerter",
        }
    }

    /// Resolve a stored code. Accepts the codes written by every version of
    /// the evaluation forms as well as the English identifiers.
    pub fn from_code(code: &str) -> Option<Item> {
        CODE_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, item)| *item)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

static CODE_TABLE: &[(&str, Item)] = &[
    ("COHERENCE", Item::Coherence),
    ("ORIENTATION", Item::Orientation),
    ("TOILETTE", Item::Washing),
    ("HABILLAGE", Item::Dressing),
    ("ALIMENTATION", Item::Eating),
    ("ELIMINATION", Item::Continence),
    ("TRANSFERTS", Item::Transfers),
    ("DEPLACEMENT_INTERIEUR", Item::IndoorMobility),
    ("DEPLACEMENTS_INTERNES", Item::IndoorMobility),
    ("DEPLACEMENT_EXTERIEUR", Item::OutdoorMobility),
    ("DEPLACEMENTS_EXTERNES", Item::OutdoorMobility),
    ("ALERTER", Item::Alerting),
    ("COMMUNICATION", Item::Communication),
    ("COMPORTEMENT", Item::Behavior),
    ("TEMPS", Item::Time),
    ("ORIENTATION_TEMPS", Item::Time),
    ("ESPACE", Item::Space),
    ("ORIENTATION_ESPACE", Item::Space),
    ("TOILETTE_HAUT", Item::WashingUpper),
    ("TOILETTE_BAS", Item::WashingLower),
    ("HABILLAGE_HAUT", Item::DressingUpper),
    ("HABILLAGE_MOYEN", Item::DressingMiddle),
    ("HABILLAGE_BAS", Item::DressingLower),
    ("SE_SERVIR", Item::SelfService),
    ("MANGER", Item::Feeding),
    ("URINAIRE", Item::Urinary),
    ("ELIMINATION_URINAIRE", Item::Urinary),
    ("FECALE", Item::Fecal),
    ("ELIMINATION_FECALE", Item::Fecal),
    // English identifiers
    ("WASHING", Item::Washing),
    ("DRESSING", Item::Dressing),
    ("EATING", Item::Eating),
    ("CONTINENCE", Item::Continence),
    ("TRANSFERS", Item::Transfers),
    ("INDOOR_MOBILITY", Item::IndoorMobility),
    ("OUTDOOR_MOBILITY", Item::OutdoorMobility),
    ("ALERTING", Item::Alerting),
    ("BEHAVIOR", Item::Behavior),
    ("TIME", Item::Time),
    ("SPACE", Item::Space),
    ("WASHING_UPPER", Item::WashingUpper),
    ("WASHING_LOWER", Item::WashingLower),
    ("DRESSING_UPPER", Item::DressingUpper),
    ("DRESSING_MIDDLE", Item::DressingMiddle),
    ("DRESSING_LOWER", Item::DressingLower),
    ("SELF_SERVICE", Item::SelfService),
    ("FEEDING", Item::Feeding),
    ("URINARY", Item::Urinary),
    ("FECAL", Item::Fecal),
];
