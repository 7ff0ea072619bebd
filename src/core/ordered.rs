use std::collections::HashSet;

use crate::models::ProfileId;

/// Set of profile ids that remembers insertion order
///
/// The first insertion wins: inserting an id that is already present neither
/// moves it nor replaces it. Tier-priority deduplication relies on this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedIdSet {
    order: Vec<ProfileId>,
    members: HashSet<ProfileId>,
}

impl OrderedIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id`, returning `false` when it was already present
    pub fn insert(&mut self, id: ProfileId) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.insert(id.clone());
        self.order.push(id);
        true
    }

    #[inline]
    pub fn contains(&self, id: &ProfileId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ProfileId> {
        self.order.iter()
    }

    pub fn into_vec(self) -> Vec<ProfileId> {
        self.order
    }
}

impl Extend<ProfileId> for OrderedIdSet {
    fn extend<I: IntoIterator<Item = ProfileId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<ProfileId> for OrderedIdSet {
    fn from_iter<I: IntoIterator<Item = ProfileId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a OrderedIdSet {
    type Item = &'a ProfileId;
    type IntoIter = std::slice::Iter<'a, ProfileId>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
