use crate::api::attendance::{
    MembersResponse, PeriodQuery, RecordsQuery, RecordsResponse, StatsResponse,
};
use crate::model::{AttendanceRecord, Member, Period};
use crate::stats::{
    DailyOverview, DashboardSummary, DecidingCriterion, MemberStats, PresenceSummary,
    PresenceWinner, TopPerformer,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Presensi Dashboard API",
        version = "0.1.0",
        description = r#"
## Attendance Dashboard

Read-only API over the attendance table that ranks people by a monthly
performance score.

### Key Features
- **Monthly ranking**
  - Present, late, absent, excused and sick counts per person
  - Attendance rate against `floor(days in month × 0.75)` working days
  - Performance score: 40% attendance, 30% punctuality, 30% consistency
- **Top performer** with the criteria that selected them
- **Recent rows** for the period, newest first
- **Daily view** of who is present today against the roster

### Response Format
- JSON
- `400` for an invalid period, `503` when the attendance store cannot be read
"#,
    ),
    paths(
        crate::api::attendance::attendance_stats,
        crate::api::attendance::attendance_records,
        crate::api::attendance::attendance_today,
        crate::api::attendance::member_presence
    ),
    components(
        schemas(
            PeriodQuery,
            RecordsQuery,
            StatsResponse,
            RecordsResponse,
            MembersResponse,
            Period,
            AttendanceRecord,
            Member,
            MemberStats,
            DashboardSummary,
            TopPerformer,
            PresenceSummary,
            PresenceWinner,
            DecidingCriterion,
            DailyOverview
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance statistics APIs"),
    )
)]
pub struct ApiDoc;
