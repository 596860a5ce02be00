pub mod grouping;

pub use grouping::{
    group_sessions, group_validation_sessions, par_group_sessions, try_group_sessions,
    try_group_validation_sessions,
};

use hashbrown::HashSet;
use itertools::Itertools;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// A browsing session together with the items bought in it.
///
/// An empty item set means "visited, nothing bought". Sessions are built once
/// by the grouping functions and never change afterwards.
#[derive(Clone)]
pub struct Session<S, I> {
    id: S,
    item_ids: HashSet<I>,
}

impl<S, I> Session<S, I> {
    pub fn new(id: S, item_ids: HashSet<I>) -> Session<S, I> {
        Session { id, item_ids }
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    pub fn item_ids(&self) -> &HashSet<I> {
        &self.item_ids
    }

    pub fn has_bought(&self) -> bool {
        !self.item_ids.is_empty()
    }
}

impl<S: Display, I: Display> Session<S, I> {
    /// Submission line `"{id};{item},{item},...\n"`. Item order is unspecified.
    ///
    /// Nothing is escaped, so ids must not contain `;`, `,` or a newline.
    pub fn to_csv_line(&self) -> String {
        format!("{};{}\n", self.id, self.item_ids.iter().join(","))
    }
}

impl<S: PartialEq, I: Eq + Hash> PartialEq for Session<S, I> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.item_ids == other.item_ids
    }
}

impl<S: Eq, I: Eq + Hash> Eq for Session<S, I> {}

impl<S: Debug, I: Debug + Eq + Hash> Debug for Session<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("item_ids", &self.item_ids)
            .finish()
    }
}
