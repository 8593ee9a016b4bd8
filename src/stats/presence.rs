use std::cmp::Ordering;

use serde::Serialize;
use utoipa::ToSchema;

use super::{AggregationOptions, Groups, compare_names};
use crate::model::{AttendanceRecord, AttendanceStatus, Member};

/// Present/absent counts for one person. Lateness is not tracked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PresenceSummary {
    #[schema(example = "ALICE")]
    pub name: String,
    #[schema(example = 18)]
    pub present_count: u32,
    /// Every recognized non-present status
    #[schema(example = 2)]
    pub absent_count: u32,
    /// `present / (present + absent)` as a whole percentage
    #[schema(example = 90)]
    pub attendance_percentage: u32,
}

impl PresenceSummary {
    fn empty(name: String) -> Self {
        Self {
            name,
            present_count: 0,
            absent_count: 0,
            attendance_percentage: 0,
        }
    }

    fn finish(mut self) -> Self {
        let total = self.present_count + self.absent_count;
        self.attendance_percentage = if total > 0 {
            (self.present_count as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        self
    }
}

/// Which comparison separated the winner from the runner-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DecidingCriterion {
    /// Nobody else to compare against
    Sole,
    Percentage,
    PresentDays,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PresenceWinner {
    pub summary: PresenceSummary,
    pub decided_by: DecidingCriterion,
    #[schema(example = "Highest attendance percentage (95%)")]
    pub explanation: String,
}

fn compare_presence(a: &PresenceSummary, b: &PresenceSummary) -> Ordering {
    b.attendance_percentage
        .cmp(&a.attendance_percentage)
        .then_with(|| b.present_count.cmp(&a.present_count))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Per-person presence counts, merged against the roster so members with
/// no records still appear. Returned best first.
pub fn summarize_presence(
    records: &[AttendanceRecord],
    roster: &[Member],
    options: &AggregationOptions,
) -> Vec<PresenceSummary> {
    let mut groups = Groups::new();
    for member in roster {
        groups.entry(options.name_case.normalize(&member.name), PresenceSummary::empty);
    }
    for record in records {
        let summary = groups.entry(options.name_case.normalize(&record.name), PresenceSummary::empty);
        match record.status {
            AttendanceStatus::Present => summary.present_count += 1,
            AttendanceStatus::Absent | AttendanceStatus::Excused | AttendanceStatus::Sick => {
                summary.absent_count += 1
            }
            AttendanceStatus::Unrecognized(_) => {}
        }
    }

    let mut summaries: Vec<PresenceSummary> = groups
        .into_vec()
        .into_iter()
        .map(PresenceSummary::finish)
        .collect();
    summaries.sort_by(compare_presence);
    summaries
}

/// Picks the single best person and explains which criterion decided it.
pub fn pick_top_performer(summaries: &[PresenceSummary]) -> Option<PresenceWinner> {
    let mut ordered: Vec<&PresenceSummary> = summaries.iter().collect();
    ordered.sort_by(|a, b| compare_presence(a, b));

    let winner = *ordered.first()?;
    let (decided_by, explanation) = match ordered.get(1) {
        None => (
            DecidingCriterion::Sole,
            format!(
                "Only candidate ({}% attendance, {} present days)",
                winner.attendance_percentage, winner.present_count
            ),
        ),
        Some(runner_up) if runner_up.attendance_percentage != winner.attendance_percentage => (
            DecidingCriterion::Percentage,
            format!(
                "Highest attendance percentage ({}%)",
                winner.attendance_percentage
            ),
        ),
        Some(runner_up) if runner_up.present_count != winner.present_count => (
            DecidingCriterion::PresentDays,
            format!(
                "Tied at {}% attendance; most present days ({})",
                winner.attendance_percentage, winner.present_count
            ),
        ),
        Some(_) => (
            DecidingCriterion::Name,
            format!(
                "Tied at {}% attendance and {} present days; first alphabetically",
                winner.attendance_percentage, winner.present_count
            ),
        ),
    };

    Some(PresenceWinner {
        summary: winner.clone(),
        decided_by,
        explanation,
    })
}
