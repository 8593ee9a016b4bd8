use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use utoipa::ToSchema;

/// Status of a single attendance row.
///
/// Labels are matched case-insensitively; anything outside the known set
/// lands in `Unrecognized` and is skipped by the aggregation.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
    #[strum(serialize = "hadir", serialize = "present")]
    Present,
    #[strum(serialize = "alpha", serialize = "absent")]
    Absent,
    #[strum(serialize = "izin", serialize = "excused")]
    Excused,
    #[strum(serialize = "sakit", serialize = "sick")]
    Sick,
    #[strum(default)]
    Unrecognized(String),
}

impl AttendanceStatus {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse()
            .unwrap_or_else(|_| AttendanceStatus::Unrecognized(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "hadir",
            AttendanceStatus::Absent => "alpha",
            AttendanceStatus::Excused => "izin",
            AttendanceStatus::Sick => "sakit",
            AttendanceStatus::Unrecognized(raw) => raw,
        }
    }
}

/// Row as stored in the attendance table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub status: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub note: Option<String>,
    pub recorded_at: Option<NaiveDateTime>,
}

/// Attendance row after ingestion: status parsed, blanks collapsed and the
/// display check-in resolved once.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "id": 42,
    "name": "Alice",
    "date": "2024-03-04",
    "status": "hadir",
    "check_in": "08:12:00",
    "check_out": "16:05:00",
    "note": null,
    "display_check_in": "08:12:00"
}))]
pub struct AttendanceRecord {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "2024-03-04", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[serde(skip)]
    pub status: AttendanceStatus,
    /// Status label exactly as stored
    #[serde(rename = "status")]
    #[schema(example = "hadir")]
    pub status_label: String,
    #[schema(example = "08:12:00", nullable = true)]
    pub check_in: Option<String>,
    #[schema(example = "16:05:00", nullable = true)]
    pub check_out: Option<String>,
    #[schema(nullable = true)]
    pub note: Option<String>,
    /// `check_in`, else the time the row was recorded. Display only.
    #[schema(example = "08:12:00", nullable = true)]
    pub display_check_in: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AttendanceRecord {
    pub fn from_row(row: AttendanceRow) -> Self {
        let check_in = non_blank(row.check_in);
        let display_check_in = check_in.clone().or_else(|| {
            row.recorded_at
                .map(|ts| ts.time().format("%H:%M:%S").to_string())
        });

        Self {
            id: row.id,
            name: row.name,
            date: row.date,
            status: AttendanceStatus::parse(&row.status),
            status_label: row.status,
            check_in,
            check_out: non_blank(row.check_out),
            note: non_blank(row.note),
            display_check_in,
        }
    }

    /// Builds an in-memory record without a storage row.
    pub fn new(name: &str, date: NaiveDate, status: &str, check_in: Option<&str>) -> Self {
        Self::from_row(AttendanceRow {
            id: 0,
            name: name.to_string(),
            date,
            status: status.to_string(),
            check_in: check_in.map(str::to_string),
            check_out: None,
            note: None,
            recorded_at: None,
        })
    }
}
