//! Time-bounded memoization of the last generated plan.

use std::sync::Arc;

use jiff::{civil, SignedDuration};

use crate::models::{DailyPlan, PlannerPreferences};

/// How long a generated plan stays valid.
pub const DEFAULT_CACHE_VALIDITY: SignedDuration = SignedDuration::from_secs(5 * 60);

/// A cached plan, the moment it was generated for and the preferences it
/// honours.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCacheEntry {
    pub plan: Arc<DailyPlan>,
    pub cached_at: civil::DateTime,
    pub preferences: PlannerPreferences,
}

/// Single-entry plan cache.
///
/// Entries are replaced wholesale, never edited. An entry is fresh while the
/// caller's `now` is within the validity window of its timestamp and the
/// caller asks with the same preferences.
#[derive(Debug, Clone)]
pub struct PlanCache {
    entry: Option<PlanCacheEntry>,
    validity: SignedDuration,
}

impl PlanCache {
    pub fn new(validity: SignedDuration) -> Self {
        Self {
            entry: None,
            validity,
        }
    }

    /// Returns the cached plan if it is still fresh at `now` and was made
    /// for `preferences`.
    pub fn get(
        &self,
        now: civil::DateTime,
        preferences: &PlannerPreferences,
    ) -> Option<Arc<DailyPlan>> {
        self.entry
            .as_ref()
            .filter(|entry| self.is_fresh(entry, now) && entry.preferences == *preferences)
            .map(|entry| Arc::clone(&entry.plan))
    }

    /// Replaces the cached entry.
    pub fn store(
        &mut self,
        plan: Arc<DailyPlan>,
        now: civil::DateTime,
        preferences: PlannerPreferences,
    ) {
        self.entry = Some(PlanCacheEntry {
            plan,
            cached_at: now,
            preferences,
        });
    }

    /// Drops the cached entry.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// The current entry, fresh or not.
    pub fn entry(&self) -> Option<&PlanCacheEntry> {
        self.entry.as_ref()
    }

    pub fn validity(&self) -> SignedDuration {
        self.validity
    }

    fn is_fresh(&self, entry: &PlanCacheEntry, now: civil::DateTime) -> bool {
        now.duration_since(entry.cached_at).abs() < self.validity
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_VALIDITY)
    }
}
