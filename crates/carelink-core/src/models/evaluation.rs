//! Stored patient evaluation documents.
//!
//! These types mirror the JSON persisted by the evaluation service. Field
//! names follow the stored keys exactly, and any key this crate does not know
//! about is kept in `extra` so a document survives a read/modify/write cycle
//! untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// A complete evaluation document. Only the `aggir` section is modelled; the
/// other sections (`usager`, health, social...) are carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggir: Option<AggirGrid>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EvaluationDocument {
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_value(&self) -> Result<Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    /// The AGGIR section, inserting an empty one if the document has none.
    pub fn grid_mut(&mut self) -> &mut AggirGrid {
        self.aggir.get_or_insert_with(AggirGrid::default)
    }

    /// Every leaf node of the grid, in document order.
    ///
    /// A node carrying sub-items contributes its sub-items only; a node without
    /// sub-items is itself a leaf.
    pub fn leaves(&self) -> impl Iterator<Item = &AggirNode> {
        self.aggir
            .iter()
            .flat_map(|grid| grid.variables.iter())
            .flat_map(|node| {
                if node.sub_items.is_empty() {
                    std::slice::from_ref(node).iter()
                } else {
                    node.sub_items.iter()
                }
            })
    }
}

/// The AGGIR section of an evaluation document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggirGrid {
    #[serde(rename = "GIR", default)]
    pub gir: Option<u8>,

    #[serde(rename = "dateValidation", default)]
    pub validated_at: Option<String>,

    #[serde(rename = "dateCalcul", default)]
    pub computed_at: Option<String>,

    #[serde(rename = "groupeAlgorithme", default)]
    pub algorithm_group: Option<String>,

    #[serde(rename = "scoreAlgorithme", default)]
    pub algorithm_score: Option<i32>,

    #[serde(rename = "AggirVariable", default, deserialize_with = "null_as_empty")]
    pub variables: Vec<AggirNode>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An item or sub-item node. Composite items carry `sub_items`; leaves carry
/// the four tagged `answers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggirNode {
    #[serde(rename = "Nom", default)]
    pub name: Option<String>,

    #[serde(rename = "Code", default)]
    pub code: Option<String>,

    /// Result letter (`A`, `B` or `C`), null until rated.
    #[serde(rename = "Resultat", default)]
    pub result: Option<String>,

    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "RecordedAt", default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,

    #[serde(
        rename = "RecordedByUserId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recorded_by_user_id: Option<i64>,

    #[serde(rename = "SessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,

    #[serde(rename = "Commentaires", default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(
        rename = "AggirSousVariable",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_items: Vec<AggirNode>,

    #[serde(
        rename = "AggirAdverbes",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub answers: Vec<TaggedAnswer>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AggirNode {
    pub fn is_composite(&self) -> bool {
        !self.sub_items.is_empty()
    }
}

/// One yes/no answer, tagged by its question (`S`, `T`, `C` or `H`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggedAnswer {
    #[serde(rename = "Question", default)]
    pub question: Option<String>,

    /// Older forms stored `0`/`1`; any other non-boolean reads as unanswered.
    #[serde(rename = "Reponse", default, deserialize_with = "truthy")]
    pub answer: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaggedAnswer {
    pub fn new(question: impl Into<String>, answer: Option<bool>) -> Self {
        Self {
            question: Some(question.into()),
            answer,
            extra: Map::new(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(value) => Some(value),
        Value::Number(n) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
        _ => None,
    })
}
