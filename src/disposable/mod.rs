//! Disposable-domain store and its optional background refresher.
//!
//! The store is a cheap-to-clone handle over a copy-on-write snapshot: a write
//! builds a new set and swaps it in whole, so a reader sees either the old or
//! the new set and only holds the lock long enough to clone an `Arc`.

mod error;
mod refresher;

pub use error::RefreshError;
pub use refresher::{DEFAULT_SOURCE_URL, DisposableRefresher};

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::classify::tables::DISPOSABLE_SEED;
use crate::validator::domain_to_ascii;

#[derive(Debug, Clone)]
pub struct DisposableDomains {
    inner: Arc<RwLock<Arc<HashSet<String>>>>,
}

impl DisposableDomains {
    /// Store seeded with the built-in list of throwaway-mail domains.
    pub fn new() -> Self {
        Self::from_domains(DISPOSABLE_SEED.iter().copied())
    }

    /// Empty store, mostly useful in tests.
    pub fn empty() -> Self {
        Self::from_domains(std::iter::empty::<&str>())
    }

    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = domains.into_iter().filter_map(normalize).collect();
        Self {
            inner: Arc::new(RwLock::new(Arc::new(set))),
        }
    }

    pub fn contains(&self, domain: &str) -> bool {
        match normalize(domain) {
            Some(key) => self.snapshot().contains(&key),
            None => false,
        }
    }

    /// Extend the store with `domains`. Already known entries are ignored.
    pub fn add<I, S>(&self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let additions: Vec<String> = domains.into_iter().filter_map(normalize).collect();
        if additions.is_empty() {
            return;
        }
        let mut guard = self.inner.write();
        let mut next = HashSet::clone(&guard);
        next.extend(additions);
        *guard = Arc::new(next);
    }

    /// Replace the whole set with `domains`.
    pub fn replace<I, S>(&self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let next: HashSet<String> = domains.into_iter().filter_map(normalize).collect();
        *self.inner.write() = Arc::new(next);
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    fn snapshot(&self) -> Arc<HashSet<String>> {
        Arc::clone(&self.inner.read())
    }
}

impl Default for DisposableDomains {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize<S: AsRef<str>>(domain: S) -> Option<String> {
    let ascii = domain_to_ascii(domain.as_ref());
    if ascii.is_empty() { None } else { Some(ascii) }
}
