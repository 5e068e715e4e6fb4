//! Default configuration for a fresh installation.

use barberbook_core::models::settings::BusinessSettings;
use chrono::{NaiveTime, Weekday};
use eyre::{Result, eyre};
use tracing::info;

use crate::{
    DbPool,
    models::weekday_to_db,
    repositories::{service, settings, work_interval},
};

const DEFAULT_SERVICES: [(&str, i32); 3] = [("Corte", 30), ("Barba", 30), ("Corte e Barba", 60)];

const OPEN_DAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Morning and afternoon shifts.
const SHIFTS: [((u32, u32), (u32, u32)); 2] = [((9, 0), (12, 0)), ((13, 0), (18, 0))];

fn time(hour: u32, minute: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| eyre!("invalid time {}:{}", hour, minute))
}

/// Seeds settings, a few services and Monday-Saturday hours. Tables that
/// already hold data are left alone.
pub async fn seed_defaults(pool: &DbPool) -> Result<()> {
    if settings::insert_business_settings_if_missing(pool, &BusinessSettings::default()).await? {
        info!("Seeded default business settings");
    }

    if service::count_services(pool).await? == 0 {
        for (name, duration) in DEFAULT_SERVICES {
            service::create_service(pool, name, duration).await?;
        }
        info!("Seeded {} default services", DEFAULT_SERVICES.len());
    }

    if work_interval::count_work_intervals(pool).await? == 0 {
        for weekday in OPEN_DAYS {
            for ((start_h, start_m), (end_h, end_m)) in SHIFTS {
                work_interval::create_work_interval(
                    pool,
                    weekday_to_db(weekday),
                    time(start_h, start_m)?,
                    time(end_h, end_m)?,
                )
                .await?;
            }
        }
        info!("Seeded work intervals for {} weekdays", OPEN_DAYS.len());
    }

    Ok(())
}
