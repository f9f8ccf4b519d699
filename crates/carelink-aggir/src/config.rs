use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable selecting the [`MissingItemPolicy`].
pub const MISSING_ITEMS_ENV: &str = "CARELINK_AGGIR_MISSING_ITEMS";

/// How the engine treats a leaf item with no response.
///
/// The grid itself does not define a value for an unrated item. Historical
/// scores were computed with unrated items counted as B, so that stays the
/// default until the policy is confirmed with the medical team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingItemPolicy {
    #[default]
    AssumePartial,
    Reject,
}

impl FromStr for MissingItemPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assume_partial" | "partial" => Ok(MissingItemPolicy::AssumePartial),
            "reject" | "strict" => Ok(MissingItemPolicy::Reject),
            other => Err(format!("unknown missing item policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub missing_items: MissingItemPolicy,
}

impl ScoringConfig {
    pub fn strict() -> Self {
        Self {
            missing_items: MissingItemPolicy::Reject,
        }
    }

    /// Read the configuration from the process environment. Unset or
    /// unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let missing_items = env::var(MISSING_ITEMS_ENV)
            .ok()
            .and_then(|raw| {
                raw.parse()
                    .inspect_err(|e| warn!(variable = MISSING_ITEMS_ENV, "{e}, using default"))
                    .ok()
            })
            .unwrap_or_default();
        Self { missing_items }
    }
}
