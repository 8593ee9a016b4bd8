use std::env;

use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use dotenvy::dotenv;

use crate::stats::{AggregationOptions, NameCase, STANDARD_START};
use crate::utils::attendance_store::is_valid_table_name;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,

    // Source tables
    pub attendance_table: String,
    pub roster_table: String,

    // Aggregation
    pub name_case: NameCase,
    pub standard_start: NaiveTime,

    // Rate limiting
    pub rate_dashboard_per_min: u32,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            server_addr: env::var("SERVER_ADDR").context("SERVER_ADDR must be set")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            api_prefix: var_or("API_PREFIX", "/api"),

            attendance_table: var_or("ATTENDANCE_TABLE", "presensi"),
            roster_table: var_or("ROSTER_TABLE", "anggota"),

            name_case: var_or("NAME_CASE", "preserve")
                .parse()
                .context("NAME_CASE must be `preserve` or `upper`")?,
            standard_start: match env::var("STANDARD_START_TIME") {
                Ok(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S")
                    .with_context(|| format!("STANDARD_START_TIME must be HH:MM:SS, got {raw}"))?,
                Err(_) => STANDARD_START,
            },

            rate_dashboard_per_min: var_or("RATE_DASHBOARD_PER_MIN", "120")
                .parse()
                .context("RATE_DASHBOARD_PER_MIN must be a number")?,
        };

        for table in [&config.attendance_table, &config.roster_table] {
            if !is_valid_table_name(table) {
                bail!("invalid table name: {table}");
            }
        }

        Ok(config)
    }

    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            name_case: self.name_case,
            standard_start: self.standard_start,
        }
    }
}
