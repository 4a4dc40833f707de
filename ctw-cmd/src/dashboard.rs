//! Home dashboard for the active data source.

use crate::GlobalArgs;
use chrono::Utc;
use ctw_data::dashboard::DashboardSnapshot;
use ctw_data::source::{DataSource, DataSourceController, ReadingSource, AUTO_REFRESH_INTERVAL};
use ctw_store::AppConfig;
use log::{info, warn};

/// Resolve the data source: explicit override first, then the persisted
/// toggle.
pub fn resolve_source(globals: &GlobalArgs, source: Option<DataSource>) -> anyhow::Result<DataSource> {
    match source {
        Some(source) => Ok(source),
        None => {
            let db = globals.open_db()?;
            Ok(DataSource::from_flag(AppConfig::load(&db)?.use_real_time_data))
        }
    }
}

/// A controller for `source` with its first fetch cycle already applied.
pub async fn load_controller(globals: &GlobalArgs, source: DataSource) -> anyhow::Result<DataSourceController> {
    let mut controller = DataSourceController::new(source);
    if let Some(ticket) = controller.start() {
        let client = globals.openaq_client()?;
        let readings = client.fetch_readings().await;
        if readings.is_empty() {
            warn!("live fetch returned no readings");
        }
        controller.apply(ticket, readings, Utc::now());
    }
    Ok(controller)
}

pub async fn run_dashboard(
    globals: &GlobalArgs,
    source: Option<DataSource>,
    watch: bool,
    json: bool,
) -> anyhow::Result<()> {
    let source = resolve_source(globals, source)?;
    let mut controller = load_controller(globals, source).await?;
    print_snapshot(&controller.snapshot(&Utc::now(), &mut rand::thread_rng()), json)?;

    if !watch || !source.is_live() {
        return Ok(());
    }

    let client = globals.openaq_client()?;
    let mut interval = tokio::time::interval(AUTO_REFRESH_INTERVAL);
    // the first tick completes immediately
    interval.tick().await;
    loop {
        interval.tick().await;
        if let Some(ticket) = controller.refresh() {
            let readings = client.fetch_readings().await;
            if controller.apply(ticket, readings, Utc::now()) {
                info!("refreshed at {}", Utc::now().format("%H:%M:%S"));
                print_snapshot(&controller.snapshot(&Utc::now(), &mut rand::thread_rng()), json)?;
            }
        }
    }
}

pub fn print_snapshot(snapshot: &DashboardSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    println!("Nagpur CO2 twin ({})", snapshot.source.label());
    println!();
    for stat in &snapshot.city_stats {
        println!("{:<20} {:>8} {:<4} {:>6}", stat.title, stat.value, stat.unit, stat.change);
    }
    println!();
    println!(
        "{:<22} {:>6} {:>5} {:<9} {:>10}",
        "ZONE", "CO2", "AQI", "STATUS", "POPULATION"
    );
    for zone in &snapshot.zones {
        println!(
            "{:<22} {:>6} {:>5} {:<9} {:>10}",
            zone.name,
            zone.co2,
            zone.aqi,
            zone.status.as_str(),
            zone.population
        );
    }
    println!();
    if snapshot.realtime_alerts.is_empty() {
        println!("No active alerts.");
    }
    for alert in &snapshot.realtime_alerts {
        println!(
            "[{:<8}] {:<16} {} ({})",
            alert.severity.as_str(),
            alert.zone,
            alert.message,
            alert.time
        );
    }
    println!();
    let trend: Vec<String> = snapshot
        .trend_data
        .iter()
        .map(|p| format!("{} {}", p.time, p.co2))
        .collect();
    println!("Trend: {}", trend.join(" | "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctw_store::{keys, SettingsStore};
    use std::path::PathBuf;

    fn globals(db: PathBuf) -> GlobalArgs {
        GlobalArgs {
            db,
            api_key: None,
            api_url: None,
            timeout_secs: 5,
        }
    }

    #[test]
    fn source_follows_persisted_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let g = globals(dir.path().join("ctw.sqlite"));
        assert_eq!(resolve_source(&g, None).unwrap(), DataSource::Demo);

        g.open_db()
            .unwrap()
            .set(keys::USE_REAL_TIME_DATA, "true")
            .unwrap();
        assert_eq!(resolve_source(&g, None).unwrap(), DataSource::Live);
        assert_eq!(
            resolve_source(&g, Some(DataSource::Demo)).unwrap(),
            DataSource::Demo
        );
    }

    #[tokio::test]
    async fn live_without_key_falls_back_to_demo_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let g = globals(dir.path().join("ctw.sqlite"));
        let controller = load_controller(&g, DataSource::Live).await.unwrap();
        assert!(!controller.is_refreshing());
        assert!(controller.readings().is_empty());
        let snapshot = controller.snapshot(&Utc::now(), &mut rand::thread_rng());
        assert_eq!(snapshot, DashboardSnapshot::demo());
    }
}
