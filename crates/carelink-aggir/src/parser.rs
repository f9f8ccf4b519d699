//! Conversion between stored evaluation documents and the engine.
//!
//! Reading is tolerant: nodes with an unknown code or an incomplete set of
//! answers are skipped, so documents written by newer forms, or still being
//! filled in, can always be scored. Writing goes through [`apply_result`] and
//! [`record_response`], which only touch the fields they own.

use std::collections::BTreeMap;

use carelink_core::models::evaluation::{AggirGrid, AggirNode, EvaluationDocument, TaggedAnswer};
use tracing::debug;

use crate::engine::ScoringResult;
use crate::error::AggirError;
use crate::evaluation::Evaluation;
use crate::item::Item;
use crate::rating::{Adverb, Rating, Response};

/// Activities recorded on the grid for context only; they never affect the GIR.
pub const ILLUSTRATIVE_ACTIVITIES: [(&str, &str); 7] = [
    ("CUISINE", "Cuisine"),
    ("MENAGE", "Ménage"),
    ("TRANSPORTS", "Transports"),
    ("ACHATS", "Achats"),
    ("SUIVI_TRAITEMENT", "Suivi du traitement"),
    ("ACTIVITES_TEMPS_LIBRE", "Activités du temps libre"),
    ("GESTION", "Gestion"),
];

const STATUS_PENDING: &str = "PENDING";
const STATUS_COMPLETED: &str = "COMPLETED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingCode,
    UnknownCode,
    /// The code names a composite item but the node has no sub-items.
    NotALeaf,
    /// One of the four answers is absent or null.
    IncompleteAnswers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    pub code: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub evaluation: Evaluation,
    pub skipped: Vec<SkippedNode>,
}

/// Build the engine input from a stored document.
pub fn parse(document: &EvaluationDocument) -> Evaluation {
    parse_with_report(document).evaluation
}

/// Parse a raw JSON document.
pub fn parse_value(value: serde_json::Value) -> Result<Evaluation, AggirError> {
    let document = EvaluationDocument::from_value(value)?;
    Ok(parse(&document))
}

/// Like [`parse`], also listing every leaf node that was left out.
pub fn parse_with_report(document: &EvaluationDocument) -> ParseReport {
    let mut report = ParseReport::default();
    for node in document.leaves() {
        match read_leaf(node) {
            Ok((item, response)) => {
                report.evaluation.insert(item, response);
            }
            Err(reason) => {
                debug!(code = ?node.code, ?reason, "skipping AGGIR node");
                report.skipped.push(SkippedNode {
                    code: node.code.clone(),
                    reason,
                });
            }
        }
    }
    report
}

fn read_leaf(node: &AggirNode) -> Result<(Item, Response), SkipReason> {
    let code = node.code.as_deref().ok_or(SkipReason::MissingCode)?;
    let item = Item::from_code(code).ok_or(SkipReason::UnknownCode)?;
    if !item.is_leaf() {
        return Err(SkipReason::NotALeaf);
    }
    let response = read_answers(&node.answers).ok_or(SkipReason::IncompleteAnswers)?;
    Ok((item, response))
}

/// All four adverbs must be answered; unknown questions are ignored.
fn read_answers(answers: &[TaggedAnswer]) -> Option<Response> {
    let mut response = Response::default();
    let mut seen = [false; 4];
    for answer in answers {
        let Some(adverb) = answer.question.as_deref().and_then(Adverb::from_tag) else {
            continue;
        };
        let Some(value) = answer.answer else {
            continue;
        };
        response.set(adverb, value);
        seen[adverb as usize] = true;
    }
    seen.iter().all(|s| *s).then_some(response)
}

/// Whether every one of the 17 leaf items carries four answers.
pub fn is_complete(document: &EvaluationDocument) -> bool {
    let answered = answered_leaves(document);
    Item::LEAVES.iter().all(|item| answered.contains(item))
}

/// Share of the 17 leaf items fully answered, 0–100.
pub fn completion_percent(document: &EvaluationDocument) -> u8 {
    let answered = answered_leaves(document).len();
    (answered * 100 / Item::LEAVES.len()) as u8
}

/// Codes of leaf nodes still missing at least one of the four tagged
/// answers, in document order. Illustrative activities are included.
pub fn incomplete_items(document: &EvaluationDocument) -> Vec<String> {
    document
        .leaves()
        .filter(|node| read_answers(&node.answers).is_none())
        .filter_map(|node| node.code.clone())
        .collect()
}

fn answered_leaves(document: &EvaluationDocument) -> Vec<Item> {
    let mut answered: Vec<Item> = document
        .leaves()
        .filter_map(|node| read_leaf(node).ok())
        .map(|(item, _)| item)
        .collect();
    answered.sort();
    answered.dedup();
    answered
}

/// Write a computed GIR back into the document: the grid header and the
/// result letter of every rated item.
pub fn apply_result(
    document: &mut EvaluationDocument,
    result: &ScoringResult,
    computed_at: jiff::Timestamp,
) {
    let grid = document.grid_mut();
    grid.gir = Some(result.level.get());
    grid.computed_at = Some(computed_at.to_string());
    grid.algorithm_group = Some(result.terminating_group.name().to_string());
    grid.algorithm_score = Some(result.score);

    for node in &mut grid.variables {
        write_letter(node, &result.rating_per_item);
        for sub in &mut node.sub_items {
            write_letter(sub, &result.rating_per_subitem);
        }
    }
}

fn write_letter(node: &mut AggirNode, ratings: &BTreeMap<Item, Rating>) {
    if let Some(rating) = node
        .code
        .as_deref()
        .and_then(Item::from_code)
        .and_then(|item| ratings.get(&item))
    {
        node.result = Some(rating.letter().to_string());
    }
}

/// Who recorded a response, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    pub at: jiff::Timestamp,
    pub user_id: Option<i64>,
    pub session_id: Option<i64>,
}

impl Recorded {
    pub fn at(at: jiff::Timestamp) -> Self {
        Self {
            at,
            user_id: None,
            session_id: None,
        }
    }
}

/// Store the answers for the node named `code` and mark it completed.
///
/// Sub-items are searched before their parent.
pub fn record_response(
    document: &mut EvaluationDocument,
    code: &str,
    response: Response,
    recorded: Recorded,
) -> Result<(), AggirError> {
    let node = document
        .aggir
        .as_mut()
        .and_then(|grid| find_node_mut(&mut grid.variables, code))
        .ok_or_else(|| AggirError::UnknownItem(code.to_string()))?;

    node.answers = Adverb::ALL
        .iter()
        .map(|adverb| TaggedAnswer::new(adverb.tag(), Some(response.get(*adverb))))
        .collect();
    node.result = Some(response.rating().letter().to_string());
    node.status = Some(STATUS_COMPLETED.to_string());
    node.recorded_at = Some(recorded.at.to_string());
    if let Some(user_id) = recorded.user_id {
        node.recorded_by_user_id = Some(user_id);
    }
    if let Some(session_id) = recorded.session_id {
        node.session_id = Some(session_id);
    }
    Ok(())
}

fn find_node_mut<'a>(nodes: &'a mut [AggirNode], code: &str) -> Option<&'a mut AggirNode> {
    for node in nodes {
        if let Some(pos) = node
            .sub_items
            .iter()
            .position(|sub| sub.code.as_deref() == Some(code))
        {
            return Some(&mut node.sub_items[pos]);
        }
        if node.code.as_deref() == Some(code) {
            return Some(node);
        }
    }
    None
}

/// A blank grid: the six composite items with their sub-items, the four
/// simple items, then the illustrative activities, all unanswered.
pub fn empty_grid() -> AggirGrid {
    let mut variables: Vec<AggirNode> = Item::COMPOSITES
        .iter()
        .map(|composite| AggirNode {
            sub_items: composite
                .sub_items()
                .iter()
                .map(|sub| blank_leaf(sub.code(), sub.label()))
                .collect(),
            ..blank_node(composite.code(), composite.label())
        })
        .collect();
    variables.extend(
        Item::SIMPLE
            .iter()
            .map(|item| blank_leaf(item.code(), item.label())),
    );
    variables.extend(
        ILLUSTRATIVE_ACTIVITIES
            .iter()
            .map(|(code, name)| blank_leaf(code, name)),
    );

    AggirGrid {
        variables,
        ..AggirGrid::default()
    }
}

fn blank_node(code: &str, name: &str) -> AggirNode {
    AggirNode {
        name: Some(name.to_string()),
        code: Some(code.to_string()),
        status: Some(STATUS_PENDING.to_string()),
        ..AggirNode::default()
    }
}

fn blank_leaf(code: &str, name: &str) -> AggirNode {
    AggirNode {
        comments: Some(String::new()),
        answers: Adverb::ALL
            .iter()
            .map(|adverb| TaggedAnswer::new(adverb.tag(), None))
            .collect(),
        ..blank_node(code, name)
    }
}
