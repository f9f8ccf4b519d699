use std::collections::BTreeMap;

use crate::item::Item;
use crate::rating::Response;

/// Engine input: one [`Response`] per rated leaf item.
///
/// Entries for composite items are ignored by the engine; their rating is
/// always derived from their sub-items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    responses: BTreeMap<Item, Response>,
}

impl Evaluation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every leaf item answered with `response`.
    pub fn uniform(response: Response) -> Self {
        Item::LEAVES.iter().map(|item| (*item, response)).collect()
    }

    pub fn insert(&mut self, item: Item, response: Response) -> Option<Response> {
        self.responses.insert(item, response)
    }

    pub fn remove(&mut self, item: Item) -> Option<Response> {
        self.responses.remove(&item)
    }

    pub fn get(&self, item: Item) -> Option<&Response> {
        self.responses.get(&item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Item, &Response)> {
        self.responses.iter().map(|(item, response)| (*item, response))
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Leaf items with no response, in grid order.
    pub fn missing_leaves(&self) -> Vec<Item> {
        Item::LEAVES
            .into_iter()
            .filter(|item| !self.responses.contains_key(item))
            .collect()
    }
}

impl FromIterator<(Item, Response)> for Evaluation {
    fn from_iter<T: IntoIterator<Item = (Item, Response)>>(iter: T) -> Self {
        Self {
            responses: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<Item, Response>> for Evaluation {
    fn from(responses: BTreeMap<Item, Response>) -> Self {
        Self { responses }
    }
}
