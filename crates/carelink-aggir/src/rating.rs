use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tri-state rating of an item, written as the letters of the paper grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Rating {
    /// Does it alone, completely, correctly and habitually.
    #[serde(rename = "A")]
    Full,
    /// Does it partially.
    #[serde(rename = "B")]
    Partial,
    /// Does not do it.
    #[serde(rename = "C")]
    NoAutonomy,
}

impl Rating {
    pub fn letter(self) -> &'static str {
        match self {
            Rating::Full => "A",
            Rating::Partial => "B",
            Rating::NoAutonomy => "C",
        }
    }

    pub fn from_letter(letter: &str) -> Option<Rating> {
        match letter {
            "A" => Some(Rating::Full),
            "B" => Some(Rating::Partial),
            "C" => Some(Rating::NoAutonomy),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

/// The four questions asked for every leaf item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adverb {
    /// S: spontanément
    Unprompted,
    /// T: totalement
    Complete,
    /// C: correctement
    Correct,
    /// H: habituellement
    Consistent,
}

impl Adverb {
    /// Storage order of the answers.
    pub const ALL: [Adverb; 4] = [
        Adverb::Unprompted,
        Adverb::Complete,
        Adverb::Correct,
        Adverb::Consistent,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Adverb::Unprompted => "S",
            Adverb::Complete => "T",
            Adverb::Correct => "C",
            Adverb::Consistent => "H",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Adverb> {
        match tag {
            "S" | "spontanement" | "unprompted" => Some(Adverb::Unprompted),
            "T" | "totalement" | "complete" => Some(Adverb::Complete),
            "C" | "correctement" | "correct" => Some(Adverb::Correct),
            "H" | "habituellement" | "consistent" => Some(Adverb::Consistent),
            _ => None,
        }
    }
}

/// Raw observation for a single leaf item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub unprompted: bool,
    pub complete: bool,
    pub correct: bool,
    pub consistent: bool,
}

impl Response {
    pub fn new(unprompted: bool, complete: bool, correct: bool, consistent: bool) -> Self {
        Self {
            unprompted,
            complete,
            correct,
            consistent,
        }
    }

    /// All four answers set to `value`.
    pub fn uniform(value: bool) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, adverb: Adverb) -> bool {
        match adverb {
            Adverb::Unprompted => self.unprompted,
            Adverb::Complete => self.complete,
            Adverb::Correct => self.correct,
            Adverb::Consistent => self.consistent,
        }
    }

    pub fn set(&mut self, adverb: Adverb, value: bool) {
        match adverb {
            Adverb::Unprompted => self.unprompted = value,
            Adverb::Complete => self.complete = value,
            Adverb::Correct => self.correct = value,
            Adverb::Consistent => self.consistent = value,
        }
    }

    pub fn rating(&self) -> Rating {
        classify(self)
    }
}

/// A when all four answers are yes, C when all are no, B otherwise.
pub fn classify(response: &Response) -> Rating {
    let yes = Adverb::ALL.iter().filter(|a| response.get(**a)).count();
    match yes {
        4 => Rating::Full,
        0 => Rating::NoAutonomy,
        _ => Rating::Partial,
    }
}
