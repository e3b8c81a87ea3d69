//! The name-keyed result of parsing.

use crate::record::CookieRecord;
use std::collections::HashMap;

/// Cookies keyed by name, in first-seen order.
///
/// Names are unique: inserting a name that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieCollection {
    cookies: Vec<CookieRecord>,
    // Name to position in `cookies`.
    index: HashMap<String, usize>,
}

impl CookieCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` unless its name is already taken. Returns whether it was added.
    pub fn insert(&mut self, record: CookieRecord) -> bool {
        if self.contains(&record.name) {
            return false;
        }
        self.index.insert(record.name.clone(), self.cookies.len());
        self.cookies.push(record);
        true
    }

    /// The cookie named `name`.
    pub fn get(&self, name: &str) -> Option<&CookieRecord> {
        self.index.get(name).map(|&i| &self.cookies[i])
    }

    /// Mutable access to the cookie named `name`.
    ///
    /// Renaming the returned record leaves it indexed under its old name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut CookieRecord> {
        let i = *self.index.get(name)?;
        self.cookies.get_mut(i)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of distinct cookies.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Cookies in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, CookieRecord> {
        self.cookies.iter()
    }

    /// Cookie names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.iter().map(|c| c.name.as_str())
    }
}

impl IntoIterator for CookieCollection {
    type Item = CookieRecord;
    type IntoIter = std::vec::IntoIter<CookieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cookies.into_iter()
    }
}

impl<'a> IntoIterator for &'a CookieCollection {
    type Item = &'a CookieRecord;
    type IntoIter = std::slice::Iter<'a, CookieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cookies.iter()
    }
}
