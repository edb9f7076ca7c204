//! Read-only credential mapping injected by the host.

use indexmap::IndexMap;
use std::fmt;

/// Secret substituted for a credential the mapping does not contain. This is
/// a soft failure: the request is still made and the server rejects it.
pub const MISSING_CREDENTIAL: &str = "MISSING_KEY";

/// Credential name to secret value. `Debug` lists names only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    entries: IndexMap<String, String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a credential, returning the previous secret.
    pub fn insert(&mut self, name: impl Into<String>, secret: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), secret.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Credentials {
            entries: iter
                .into_iter()
                .map(|(name, secret)| (name.into(), secret.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Credentials {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, secret) in iter {
            self.insert(name, secret);
        }
    }
}
