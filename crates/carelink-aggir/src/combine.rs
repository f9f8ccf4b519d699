//! Sub-item combination rules.
//!
//! Each family has its own rule. Coherence, orientation, eating and
//! continence are pulled down to C by any single C sub-item; washing and
//! dressing only reach C when every sub-item is C.

use crate::item::Item;
use crate::rating::Rating;

/// Rating of a composite item from its sub-item ratings, given in the order of
/// [`Item::sub_items`].
///
/// Returns `None` if `composite` is not a composite item or if the number of
/// ratings does not match its sub-items.
pub fn combine(composite: Item, sub_ratings: &[Rating]) -> Option<Rating> {
    if composite.sub_items().len() != sub_ratings.len() {
        return None;
    }
    match composite {
        Item::Coherence | Item::Orientation => Some(any_c_is_c(sub_ratings)),
        Item::Eating => Some(any_c_is_c(sub_ratings)),
        Item::Continence => Some(any_c_is_c(sub_ratings)),
        Item::Washing | Item::Dressing => Some(all_c_is_c(sub_ratings)),
        _ => None,
    }
}

// AA = A; any C = C; else B
fn any_c_is_c(ratings: &[Rating]) -> Rating {
    if ratings.iter().all(|r| *r == Rating::Full) {
        Rating::Full
    } else if ratings.contains(&Rating::NoAutonomy) {
        Rating::NoAutonomy
    } else {
        Rating::Partial
    }
}

// AA = A; CC = C; else B
fn all_c_is_c(ratings: &[Rating]) -> Rating {
    if ratings.iter().all(|r| *r == Rating::Full) {
        Rating::Full
    } else if ratings.iter().all(|r| *r == Rating::NoAutonomy) {
        Rating::NoAutonomy
    } else {
        Rating::Partial
    }
}
