use crate::{api::attendance, config::Config};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer limiter settings; 0 is treated as 1 request per minute.
pub fn limiter_config(requests_per_min: u32) -> Result<LimiterConfig> {
    let requests_per_min = requests_per_min.max(1);
    GovernorConfigBuilder::default()
        .per_millisecond((60_000 / requests_per_min as u64).max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .with_context(|| format!("invalid rate limit: {requests_per_min} requests per minute"))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &LimiterConfig) {
    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/attendance")
                .wrap(Governor::new(limiter))
                // /attendance/stats?year&month
                .service(web::resource("/stats").route(web::get().to(attendance::attendance_stats)))
                // /attendance/records?year&month&limit
                .service(
                    web::resource("/records").route(web::get().to(attendance::attendance_records)),
                )
                // /attendance/today
                .service(web::resource("/today").route(web::get().to(attendance::attendance_today)))
                // /attendance/members?year&month
                .service(
                    web::resource("/members").route(web::get().to(attendance::member_presence)),
                ),
        ),
    );
}

// DASHBOARD
//  ├─ GET stats    → ranking + summary + top performer + 10 recent rows
//  ├─ GET records  → raw rows, newest first
//  ├─ GET today    → present today vs roster
//  └─ GET members  → roster presence + single winner
