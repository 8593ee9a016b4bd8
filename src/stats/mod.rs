//! Per-person attendance statistics for a period.
//!
//! Everything here is a pure function of its inputs: no I/O, no shared
//! state. Each call recomputes from the full record list.

pub mod daily;
pub mod presence;
pub mod ranking;
pub mod summary;


use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

pub use daily::{DailyOverview, daily_overview};
pub use presence::{DecidingCriterion, PresenceSummary, PresenceWinner, pick_top_performer, summarize_presence};
pub use ranking::{MemberStats, rank_members, rank_members_with_roster};
pub use summary::{DEFAULT_RECENT_LIMIT, DashboardSummary, TopPerformer, recent_records};

/// How names are normalized before they become grouping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NameCase {
    /// Group byte-for-byte; "Alice" and "ALICE" are two people.
    #[default]
    Preserve,
    /// Trim and upper-case; "alice " and "ALICE" are one person.
    Upper,
}

impl NameCase {
    pub fn normalize<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            NameCase::Preserve => Cow::Borrowed(name),
            NameCase::Upper => Cow::Owned(name.trim().to_uppercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    pub name_case: NameCase,
    /// Check-ins strictly after this time count as late.
    pub standard_start: NaiveTime,
}

pub const STANDARD_START: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            name_case: NameCase::default(),
            standard_start: STANDARD_START,
        }
    }
}

/// Final tie-break between two names: case-folded order first, then exact
/// byte order so distinct names never compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Round to two decimals, half away from zero. A result of zero is always
/// `+0.0` so equal scores compare equal under `total_cmp`.
pub(crate) fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Insertion-ordered groups keyed by normalized name. The first record seen
/// for a key creates its group.
pub(crate) struct Groups<T> {
    index: HashMap<String, usize>,
    groups: Vec<T>,
}

impl<T> Groups<T> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn entry(&mut self, key: Cow<'_, str>, make: impl FnOnce(String) -> T) -> &mut T {
        let slot = match self.index.get(key.as_ref()) {
            Some(&slot) => slot,
            None => {
                let key = key.into_owned();
                self.groups.push(make(key.clone()));
                self.index.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[slot]
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.groups
    }
}
