use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::{debug, error};

use crate::model::{AttendanceRecord, AttendanceRow, Member, Period};

/// ===============================
/// Column mapping for the attendance table
/// ===============================
fn select_attendance(table: &str) -> String {
    format!(
        r#"
        SELECT
            id,
            nama AS name,
            tanggal AS date,
            status,
            CAST(jam_masuk AS CHAR) AS check_in,
            CAST(jam_keluar AS CHAR) AS check_out,
            keterangan AS note,
            created_at AS recorded_at
        FROM {table}
        "#
    )
}

/// ===============================
/// All rows of one month, newest first
/// ===============================
pub async fn fetch_period_records(
    pool: &MySqlPool,
    table: &str,
    period: Period,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let (start, end) = period.bounds();
    let sql = format!(
        "{} WHERE tanggal >= ? AND tanggal < ? ORDER BY tanggal DESC, id DESC",
        select_attendance(table)
    );
    debug!(%start, %end, table, "Fetching attendance for period");

    let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, table, year = period.year(), month = period.month(), "Failed to fetch attendance");
            e
        })?;

    Ok(rows.into_iter().map(AttendanceRecord::from_row).collect())
}

/// ===============================
/// Present rows for a single day
/// ===============================
pub async fn fetch_present_on(
    pool: &MySqlPool,
    table: &str,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let sql = format!(
        "{} WHERE tanggal = ? AND LOWER(TRIM(status)) = 'hadir' ORDER BY jam_masuk ASC, id ASC",
        select_attendance(table)
    );
    debug!(%date, table, "Fetching present rows");

    let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
        .bind(date)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, table, %date, "Failed to fetch present rows");
            e
        })?;

    Ok(rows.into_iter().map(AttendanceRecord::from_row).collect())
}

/// ===============================
/// Roster, ordered by name
/// ===============================
pub async fn fetch_roster(pool: &MySqlPool, table: &str) -> Result<Vec<Member>, sqlx::Error> {
    let sql = format!("SELECT id, nama AS name FROM {table} ORDER BY nama ASC");

    sqlx::query_as::<_, Member>(&sql)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, table, "Failed to fetch roster");
            e
        })
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 64
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(is_valid_table_name("presensi"));
        assert!(is_valid_table_name("absensi_2024"));
    }

    #[test]
    fn rejects_anything_that_could_escape_the_query() {
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("presensi; DROP TABLE x"));
        assert!(!is_valid_table_name("a.b"));
        assert!(!is_valid_table_name("1presensi"));
        assert!(!is_valid_table_name("`presensi`"));
    }

    #[test]
    fn period_query_selects_renamed_columns() {
        let sql = select_attendance("presensi");
        assert!(sql.contains("FROM presensi"));
        assert!(sql.contains("nama AS name"));
        assert!(sql.contains("CAST(jam_masuk AS CHAR) AS check_in"));
    }
}
