use crate::{
    config::Config,
    error::AppError,
    model::{AttendanceRecord, Period},
    stats::{
        self, DEFAULT_RECENT_LIMIT, DashboardSummary, MemberStats,
        PresenceSummary, PresenceWinner, TopPerformer,
    },
    utils::attendance_store::{fetch_period_records, fetch_present_on, fetch_roster},
};
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

const MAX_RECORDS_LIMIT: usize = 500;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    #[schema(example = 2024)]
    /// Calendar year; defaults to the current month when both are omitted
    pub year: Option<i32>,
    #[schema(example = 3)]
    /// Month 1-12
    pub month: Option<u32>,
}

impl PeriodQuery {
    pub fn resolve(&self) -> Result<Period, AppError> {
        match (self.year, self.month) {
            (None, None) => Ok(Period::current()),
            (Some(year), Some(month)) => Period::new(year, month),
            _ => Err(AppError::InvalidQuery(
                "year and month must be given together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RecordsQuery {
    #[schema(example = 2024)]
    pub year: Option<i32>,
    #[schema(example = 3)]
    pub month: Option<u32>,
    #[schema(example = 10)]
    /// Number of rows, newest first (1-500, default 10)
    pub limit: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub period: Period,
    #[schema(example = 23)]
    pub expected_working_days: u32,
    pub summary: DashboardSummary,
    pub top_performer: Option<TopPerformer>,
    pub ranking: Vec<MemberStats>,
    /// Latest rows of the period
    pub recent: Vec<AttendanceRecord>,
}

#[derive(Serialize, ToSchema)]
pub struct RecordsResponse {
    pub period: Period,
    pub data: Vec<AttendanceRecord>,
    #[schema(example = 134)]
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct MembersResponse {
    pub period: Period,
    pub members: Vec<PresenceSummary>,
    pub top_performer: Option<PresenceWinner>,
}

/// Ranked monthly statistics
#[utoipa::path(
    get,
    path = "/api/attendance/stats",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Ranked statistics for the period", body = StatsResponse),
        (status = 400, description = "Invalid period", body = Object, example = json!({
            "message": "Invalid period: month must be between 1 and 12, got 13"
        })),
        (status = 503, description = "Attendance store unavailable", body = Object, example = json!({
            "message": "Failed to load attendance records"
        }))
    ),
    tag = "Attendance"
)]
pub async fn attendance_stats(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<PeriodQuery>,
) -> Result<impl Responder, AppError> {
    let period = query.resolve()?;
    let records = fetch_period_records(pool.get_ref(), &config.attendance_table, period).await?;

    let ranking = stats::rank_members(&records, period, &config.aggregation_options());
    info!(
        year = period.year(),
        month = period.month(),
        records = records.len(),
        members = ranking.len(),
        "Attendance stats computed"
    );

    Ok(HttpResponse::Ok().json(StatsResponse {
        period,
        expected_working_days: period.expected_working_days(),
        summary: DashboardSummary::from_stats(&ranking),
        top_performer: TopPerformer::from_ranking(&ranking),
        recent: stats::recent_records(&records, DEFAULT_RECENT_LIMIT).to_vec(),
        ranking,
    }))
}

/// Attendance rows of a period, newest first
#[utoipa::path(
    get,
    path = "/api/attendance/records",
    params(RecordsQuery),
    responses(
        (status = 200, description = "Attendance rows", body = RecordsResponse),
        (status = 400, description = "Invalid period or limit"),
        (status = 503, description = "Attendance store unavailable")
    ),
    tag = "Attendance"
)]
pub async fn attendance_records(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<RecordsQuery>,
) -> Result<impl Responder, AppError> {
    let period = PeriodQuery {
        year: query.year,
        month: query.month,
    }
    .resolve()?;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    if !(1..=MAX_RECORDS_LIMIT).contains(&limit) {
        return Err(AppError::InvalidQuery(format!(
            "limit must be between 1 and {MAX_RECORDS_LIMIT}"
        )));
    }

    let records = fetch_period_records(pool.get_ref(), &config.attendance_table, period).await?;
    let total = records.len();

    Ok(HttpResponse::Ok().json(RecordsResponse {
        period,
        data: stats::recent_records(&records, limit).to_vec(),
        total,
    }))
}

/// Who is present today
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses(
        (status = 200, description = "Today's presence against the roster", body = crate::stats::DailyOverview),
        (status = 503, description = "Attendance store unavailable")
    ),
    tag = "Attendance"
)]
pub async fn attendance_today(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<impl Responder, AppError> {
    let today = Local::now().date_naive();

    let (records, roster) = futures::try_join!(
        fetch_present_on(pool.get_ref(), &config.attendance_table, today),
        fetch_roster(pool.get_ref(), &config.roster_table),
    )?;

    Ok(HttpResponse::Ok().json(stats::daily_overview(
        today,
        &records,
        &roster,
        &config.aggregation_options(),
    )))
}

/// Roster-wide presence summary and single top performer
#[utoipa::path(
    get,
    path = "/api/attendance/members",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Presence per roster member", body = MembersResponse),
        (status = 400, description = "Invalid period"),
        (status = 503, description = "Attendance store unavailable")
    ),
    tag = "Attendance"
)]
pub async fn member_presence(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<PeriodQuery>,
) -> Result<impl Responder, AppError> {
    let period = query.resolve()?;

    let (records, roster) = futures::try_join!(
        fetch_period_records(pool.get_ref(), &config.attendance_table, period),
        fetch_roster(pool.get_ref(), &config.roster_table),
    )?;

    let members = stats::summarize_presence(&records, &roster, &config.aggregation_options());
    let top_performer = stats::pick_top_performer(&members);

    Ok(HttpResponse::Ok().json(MembersResponse {
        period,
        members,
        top_performer,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_period_defaults_to_current_month() {
        let query = PeriodQuery {
            year: None,
            month: None,
        };
        assert_eq!(query.resolve().unwrap(), Period::current());
    }

    #[test]
    fn explicit_period_is_validated() {
        let ok = PeriodQuery {
            year: Some(2024),
            month: Some(3),
        };
        assert_eq!(ok.resolve().unwrap(), Period::new(2024, 3).unwrap());

        let bad = PeriodQuery {
            year: Some(2024),
            month: Some(13),
        };
        assert!(matches!(bad.resolve(), Err(AppError::InvalidPeriod(_))));
    }

    #[test]
    fn half_a_period_is_rejected() {
        let query = PeriodQuery {
            year: Some(2024),
            month: None,
        };
        assert!(matches!(query.resolve(), Err(AppError::InvalidQuery(_))));
    }
}
