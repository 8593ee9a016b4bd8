use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::AggregationOptions;
use crate::model::{AttendanceRecord, AttendanceStatus, Member};

/// Who has checked in on a single day, against the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyOverview {
    #[schema(example = "2024-03-04", format = "date", value_type = String)]
    pub date: NaiveDate,
    /// In order of first appearance
    pub present: Vec<String>,
    pub present_count: usize,
    pub roster_size: usize,
    /// Roster members without a present row, in roster order
    pub not_present: Vec<String>,
}

pub fn daily_overview(
    date: NaiveDate,
    records: &[AttendanceRecord],
    roster: &[Member],
    options: &AggregationOptions,
) -> DailyOverview {
    let mut seen = HashSet::new();
    let present: Vec<String> = records
        .iter()
        .filter(|r| r.date == date && r.status == AttendanceStatus::Present)
        .map(|r| options.name_case.normalize(&r.name).into_owned())
        .filter(|name| seen.insert(name.clone()))
        .collect();

    let not_present: Vec<String> = roster
        .iter()
        .map(|m| options.name_case.normalize(&m.name).into_owned())
        .filter(|name| !seen.contains(name))
        .collect();

    DailyOverview {
        date,
        present_count: present.len(),
        present,
        roster_size: roster.len(),
        not_present,
    }
}
