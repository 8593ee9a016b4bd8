use serde::Serialize;
use utoipa::ToSchema;

use super::MemberStats;
use crate::model::AttendanceRecord;

pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardSummary {
    #[schema(example = 12)]
    pub total_members: usize,
    /// Mean attendance rate, rounded to a whole percentage
    #[schema(example = 81)]
    pub average_attendance_rate: u32,
    #[schema(example = 17)]
    pub total_late: u32,
    #[schema(example = 4)]
    pub total_absent: u32,
}

impl DashboardSummary {
    pub fn from_stats(stats: &[MemberStats]) -> Self {
        let average_attendance_rate = if stats.is_empty() {
            0
        } else {
            let sum: f64 = stats.iter().map(|s| s.attendance_rate).sum();
            (sum / stats.len() as f64).round() as u32
        };

        Self {
            total_members: stats.len(),
            average_attendance_rate,
            total_late: stats.iter().map(|s| s.late_count).sum(),
            total_absent: stats.iter().map(|s| s.absent_count).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopPerformer {
    pub stats: MemberStats,
    #[schema(example = "Selected by: performance score 87.67, attendance 86.96%, late 3 day(s)")]
    pub explanation: String,
}

impl TopPerformer {
    /// Rank 1 of an already ranked list.
    pub fn from_ranking(ranked: &[MemberStats]) -> Option<Self> {
        let top = ranked.first()?;
        Some(Self {
            explanation: format!(
                "Selected by: performance score {}, attendance {}%, late {} day(s)",
                top.performance_score, top.attendance_rate, top.late_count
            ),
            stats: top.clone(),
        })
    }
}

/// Head of a list that is already ordered newest first.
pub fn recent_records(records: &[AttendanceRecord], limit: usize) -> &[AttendanceRecord] {
    &records[..limit.min(records.len())]
}
