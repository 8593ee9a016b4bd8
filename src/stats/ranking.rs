use std::cmp::Ordering;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use tracing::{debug, warn};
use utoipa::ToSchema;

use super::{AggregationOptions, Groups, compare_names, round2};
use crate::model::{AttendanceRecord, AttendanceStatus, Member, Period};

const ATTENDANCE_WEIGHT: f64 = 0.40;
const PUNCTUALITY_WEIGHT: f64 = 0.30;
const CONSISTENCY_WEIGHT: f64 = 0.30;

/// Shown when a person has no usable check-in.
pub const NO_CHECK_IN: &str = "00:00";

/// Monthly statistics for one person, ranked against everyone else in the
/// same period.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "name": "Alice",
    "present_count": 20,
    "late_count": 3,
    "absent_count": 2,
    "excused_count": 0,
    "sick_count": 1,
    "ignored_count": 0,
    "attendance_rate": 86.96,
    "avg_check_in_time": "7:58",
    "expected_working_days": 23,
    "performance_score": 87.67,
    "rank": 1
}))]
pub struct MemberStats {
    pub name: String,
    pub present_count: u32,
    /// Subset of `present_count`
    pub late_count: u32,
    pub absent_count: u32,
    pub excused_count: u32,
    pub sick_count: u32,
    /// Rows whose status is outside the known set
    pub ignored_count: u32,
    pub attendance_rate: f64,
    pub avg_check_in_time: String,
    pub expected_working_days: u32,
    pub performance_score: f64,
    pub rank: u32,
}

#[derive(Debug)]
struct Tally {
    name: String,
    present: u32,
    late: u32,
    absent: u32,
    excused: u32,
    sick: u32,
    ignored: u32,
    check_in_hours: f64,
    check_in_count: u32,
}

impl Tally {
    fn new(name: String) -> Self {
        Self {
            name,
            present: 0,
            late: 0,
            absent: 0,
            excused: 0,
            sick: 0,
            ignored: 0,
            check_in_hours: 0.0,
            check_in_count: 0,
        }
    }

    fn add(&mut self, record: &AttendanceRecord, standard_start: NaiveTime) {
        match &record.status {
            AttendanceStatus::Present => {
                self.present += 1;
                if let Some(raw) = record.check_in.as_deref() {
                    match parse_check_in(raw) {
                        Some(time) => {
                            if time > standard_start {
                                self.late += 1;
                            }
                            self.check_in_hours += time.hour() as f64 + time.minute() as f64 / 60.0;
                            self.check_in_count += 1;
                        }
                        None => warn!(
                            name = %record.name,
                            date = %record.date,
                            check_in = raw,
                            "Unparseable check-in time, skipped for punctuality"
                        ),
                    }
                }
            }
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Excused => self.excused += 1,
            AttendanceStatus::Sick => self.sick += 1,
            AttendanceStatus::Unrecognized(_) => self.ignored += 1,
        }
    }

    fn into_stats(self, expected_working_days: u32) -> MemberStats {
        let expected = expected_working_days as f64;

        let attendance_rate = if expected_working_days > 0 {
            self.present as f64 / expected * 100.0
        } else {
            0.0
        };

        let avg_check_in_time = if self.check_in_count > 0 {
            format_clock(self.check_in_hours / self.check_in_count as f64)
        } else {
            NO_CHECK_IN.to_string()
        };

        let attendance_score = attendance_rate * ATTENDANCE_WEIGHT;
        let punctuality_score = if self.present > 0 {
            (self.present - self.late) as f64 / self.present as f64 * 100.0 * PUNCTUALITY_WEIGHT
        } else {
            0.0
        };
        let consistency_score = if expected_working_days > 0 {
            (expected - self.absent as f64) / expected * 100.0 * CONSISTENCY_WEIGHT
        } else {
            0.0
        };

        MemberStats {
            name: self.name,
            present_count: self.present,
            late_count: self.late,
            absent_count: self.absent,
            excused_count: self.excused,
            sick_count: self.sick,
            ignored_count: self.ignored,
            attendance_rate: round2(attendance_rate),
            avg_check_in_time,
            expected_working_days,
            performance_score: round2(attendance_score + punctuality_score + consistency_score),
            rank: 0,
        }
    }
}

/// Accepts `HH:MM:SS`, `HH:MM:SS.fff` and `HH:MM`.
pub fn parse_check_in(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// `H:MM` from fractional hours. A minute part that rounds up to 60 carries
/// into the hour.
pub fn format_clock(hours: f64) -> String {
    let mut whole = hours.floor() as u32;
    let mut minutes = (hours.fract() * 60.0).round() as u32;
    if minutes == 60 {
        whole += 1;
        minutes = 0;
    }
    format!("{whole}:{minutes:02}")
}

/// Ranking order: score desc, rate desc, late asc, then name.
pub fn compare_ranking(a: &MemberStats, b: &MemberStats) -> Ordering {
    b.performance_score
        .total_cmp(&a.performance_score)
        .then_with(|| b.attendance_rate.total_cmp(&a.attendance_rate))
        .then_with(|| a.late_count.cmp(&b.late_count))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Aggregates `records` (already limited to `period` by the caller) into one
/// ranked row per person found in the records.
///
/// Records are not deduplicated: two rows for the same person and date both
/// count.
pub fn rank_members(
    records: &[AttendanceRecord],
    period: Period,
    options: &AggregationOptions,
) -> Vec<MemberStats> {
    rank_members_with_roster(records, &[], period, options)
}

/// Like [`rank_members`], but every roster member gets a row even without
/// records, with all counters at zero.
pub fn rank_members_with_roster(
    records: &[AttendanceRecord],
    roster: &[Member],
    period: Period,
    options: &AggregationOptions,
) -> Vec<MemberStats> {
    let expected_working_days = period.expected_working_days();

    let mut groups = Groups::new();
    for member in roster {
        groups.entry(options.name_case.normalize(&member.name), Tally::new);
    }
    for record in records {
        groups
            .entry(options.name_case.normalize(&record.name), Tally::new)
            .add(record, options.standard_start);
    }

    let mut stats: Vec<MemberStats> = groups
        .into_vec()
        .into_iter()
        .map(|tally| tally.into_stats(expected_working_days))
        .collect();

    stats.sort_by(compare_ranking);
    for (index, row) in stats.iter_mut().enumerate() {
        row.rank = index as u32 + 1;
    }

    debug!(
        year = period.year(),
        month = period.month(),
        records = records.len(),
        members = stats.len(),
        expected_working_days,
        "Ranked attendance"
    );

    stats
}
