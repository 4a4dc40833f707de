//! JSON exports written to disk.

use crate::dashboard::{load_controller, resolve_source};
use crate::demo::build_dataset;
use crate::GlobalArgs;
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use ctw_data::alerts::alert_catalogue;
use ctw_data::detail::{alert_impact_series, sensor_hourly_series, sensor_weekly_series};
use ctw_data::export::{
    alert_export, analytics_export, report_export, sensor_export, simulation_export, zone_export,
    ExportFile,
};
use ctw_data::reports::find_report;
use ctw_data::simulation::{compute_impact, projection, InterventionInputs};
use ctw_data::source::DataSource;
use ctw_data::zones::zone_weekly_series;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug, Clone)]
pub enum ExportKind {
    /// Alert detail; a catalogue id, or the first live alert when omitted
    Alert { id: Option<u32> },

    /// Sensor detail by station id
    Sensor { id: u64 },

    /// Zone detail by name (case-insensitive prefix)
    Zone { name: String },

    /// Simulation results and projection
    Simulation {
        #[arg(long, default_value_t = 100)]
        trees: i64,
        #[arg(long, default_value_t = 20)]
        traffic: i64,
        #[arg(long, default_value_t = 5)]
        scrubbers: i64,
    },

    /// Analytics dataset for a range
    Analytics {
        #[arg(short, long, default_value = "7days")]
        range: String,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Report from the catalogue, by id or title
    Report { report: String },
}

/// Export names embed zone and station names; path separators in them
/// become `-` so the file always lands directly in the output directory.
fn disk_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

pub fn write_export(out_dir: &Path, file: &ExportFile) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let path = out_dir.join(disk_file_name(&file.file_name));
    std::fs::write(&path, &file.contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub async fn run_export(
    globals: &GlobalArgs,
    out_dir: &Path,
    source: Option<DataSource>,
    kind: ExportKind,
) -> anyhow::Result<()> {
    let now = Utc::now();
    let mut rng = rand::thread_rng();
    let file = match kind {
        ExportKind::Simulation {
            trees,
            traffic,
            scrubbers,
        } => {
            let inputs = InterventionInputs::new(trees, traffic, scrubbers);
            let result = compute_impact(&inputs);
            simulation_export(&inputs, &result, &projection(&result), &now)?
        }
        ExportKind::Analytics { range, seed } => analytics_export(&build_dataset(&range, seed), &now)?,
        ExportKind::Report { report } => {
            let report = find_report(&report).with_context(|| format!("no report matches '{}'", report))?;
            report_export(&report, &now)?
        }
        ExportKind::Alert { id: Some(id) } => {
            let alert = alert_catalogue()
                .find(id)
                .map(|a| a.to_alert())
                .with_context(|| format!("no alert with id {}", id))?;
            alert_export(&alert, &alert_impact_series(&mut rng), &now)?
        }
        kind => {
            let source = resolve_source(globals, source)?;
            let controller = load_controller(globals, source).await?;
            match kind {
                ExportKind::Sensor { id } => {
                    let sensor = controller
                        .readings()
                        .into_iter()
                        .find(|r| r.id == id)
                        .with_context(|| format!("no sensor with id {} in {}", id, source.label()))?;
                    sensor_export(
                        &sensor,
                        &sensor_hourly_series(&mut rng),
                        &sensor_weekly_series(&mut rng),
                        &now,
                    )?
                }
                ExportKind::Zone { name } => {
                    let snapshot = controller.snapshot(&now, &mut rng);
                    let needle = name.to_lowercase();
                    let zone = snapshot
                        .zones
                        .iter()
                        .find(|z| z.name.to_lowercase().starts_with(&needle))
                        .with_context(|| format!("no zone matches '{}'", name))?;
                    zone_export(zone, &zone_weekly_series(zone), &now)?
                }
                _ => {
                    let snapshot = controller.snapshot(&now, &mut rng);
                    let alert = snapshot
                        .realtime_alerts
                        .first()
                        .context("no active alerts to export")?;
                    alert_export(alert, &alert_impact_series(&mut rng), &now)?
                }
            }
        }
    };

    let path = write_export(out_dir, &file)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals(dir: &Path) -> GlobalArgs {
        GlobalArgs {
            db: dir.join("ctw.sqlite"),
            api_key: None,
            api_url: None,
            timeout_secs: 5,
        }
    }

    fn written(dir: &Path, prefix: &str) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|n| n.starts_with(prefix))
            .collect()
    }

    #[tokio::test]
    async fn exports_report_and_catalogue_alert() {
        let dir = tempfile::tempdir().unwrap();
        let g = globals(dir.path());
        let out = dir.path().join("out");

        run_export(&g, &out, None, ExportKind::Report { report: "1".into() })
            .await
            .unwrap();
        let reports = written(&out, "weekly-emission-report-");
        assert_eq!(reports.len(), 1);

        run_export(&g, &out, None, ExportKind::Alert { id: Some(3) })
            .await
            .unwrap();
        assert_eq!(written(&out, "alert-3.json").len(), 1);
    }

    #[test]
    fn separators_in_names_stay_in_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = ExportFile {
            file_name: "zone-Civil Lines/MPCB\\East-1700000000000.json".to_string(),
            contents: "{}".to_string(),
        };
        let path = write_export(dir.path(), &file).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "zone-Civil Lines-MPCB-East-1700000000000.json"
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn exports_demo_sensor_and_zone() {
        let dir = tempfile::tempdir().unwrap();
        let g = globals(dir.path());
        run_export(&g, dir.path(), Some(DataSource::Demo), ExportKind::Sensor { id: 3 })
            .await
            .unwrap();
        assert_eq!(written(dir.path(), "sensor-3-").len(), 1);

        run_export(&g, dir.path(), Some(DataSource::Demo), ExportKind::Zone { name: "mihan".into() })
            .await
            .unwrap();
        assert_eq!(written(dir.path(), "zone-MIHAN (Airport)-").len(), 1);

        let missing = run_export(&g, dir.path(), Some(DataSource::Demo), ExportKind::Sensor { id: 99 }).await;
        assert!(missing.is_err());
    }
}
