//! Pretty-printed JSON exports. Every payload carries an `exportedAt`
//! timestamp; file names follow the download names of the dashboard.

use crate::alerts::Alert;
use crate::demo::DemoDataset;
use crate::detail::{ImpactPoint, SensorDayPoint, SensorHourPoint};
use crate::reports::{Report, ReportDocument};
use crate::simulation::{InterventionInputs, InterventionResult, ProjectionPoint};
use crate::zones::{ZoneDayPoint, ZoneSummary};
use chrono::{DateTime, Utc};
use ctw_sensor::SensorReading;
use ctw_utils::dates::{date_suffix, epoch_millis, export_timestamp};
use ctw_utils::text::slugify;
use serde::Serialize;

/// A file ready to be downloaded or written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

impl ExportFile {
    fn new<T: Serialize>(file_name: String, payload: &T) -> serde_json::Result<Self> {
        Ok(ExportFile {
            file_name,
            contents: serde_json::to_string_pretty(payload)?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertExport<'a> {
    alert: &'a Alert,
    impact_data: &'a [ImpactPoint],
    exported_at: String,
}

pub fn alert_export(alert: &Alert, impact_data: &[ImpactPoint], at: &DateTime<Utc>) -> serde_json::Result<ExportFile> {
    let id = alert
        .id
        .clone()
        .unwrap_or_else(|| epoch_millis(at).to_string());
    ExportFile::new(
        format!("alert-{}.json", id),
        &AlertExport {
            alert,
            impact_data,
            exported_at: export_timestamp(at),
        },
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SensorExport<'a> {
    sensor: &'a SensorReading,
    hourly_data: &'a [SensorHourPoint],
    weekly_data: &'a [SensorDayPoint],
    exported_at: String,
}

pub fn sensor_export(
    sensor: &SensorReading,
    hourly_data: &[SensorHourPoint],
    weekly_data: &[SensorDayPoint],
    at: &DateTime<Utc>,
) -> serde_json::Result<ExportFile> {
    ExportFile::new(
        format!("sensor-{}-{}.json", sensor.id, epoch_millis(at)),
        &SensorExport {
            sensor,
            hourly_data,
            weekly_data,
            exported_at: export_timestamp(at),
        },
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ZoneExport<'a> {
    zone: &'a ZoneSummary,
    weekly_data: &'a [ZoneDayPoint],
    exported_at: String,
}

pub fn zone_export(zone: &ZoneSummary, weekly_data: &[ZoneDayPoint], at: &DateTime<Utc>) -> serde_json::Result<ExportFile> {
    ExportFile::new(
        format!("zone-{}-{}.json", zone.name, epoch_millis(at)),
        &ZoneExport {
            zone,
            weekly_data,
            exported_at: export_timestamp(at),
        },
    )
}

#[derive(Serialize)]
struct InterventionLevels {
    trees: u32,
    traffic: u32,
    tech: u32,
}

/// Run results as the result view presents them.
#[derive(Serialize)]
struct SimulationResults {
    impact: i64,
    cost: f64,
    roi: String,
    timeline: i64,
    interventions: InterventionLevels,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationExport<'a> {
    results: SimulationResults,
    projection_data: &'a [ProjectionPoint],
    exported_at: String,
}

pub fn simulation_export(
    inputs: &InterventionInputs,
    result: &InterventionResult,
    projection_data: &[ProjectionPoint],
    at: &DateTime<Utc>,
) -> serde_json::Result<ExportFile> {
    let roi = if result.cost_lakh > 0.0 {
        format!("{:.1}", result.roi)
    } else {
        "0".to_string()
    };
    ExportFile::new(
        format!("simulation-{}.json", epoch_millis(at)),
        &SimulationExport {
            results: SimulationResults {
                impact: result.impact_pct,
                cost: result.cost_lakh,
                roi,
                timeline: result.timeline_months,
                interventions: InterventionLevels {
                    trees: inputs.tree_count,
                    traffic: inputs.traffic_reduction_pct,
                    tech: inputs.scrubber_count,
                },
            },
            projection_data,
            exported_at: export_timestamp(at),
        },
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsExport<'a> {
    range: &'static str,
    dataset: &'a DemoDataset,
    exported_at: String,
}

pub fn analytics_export(dataset: &DemoDataset, at: &DateTime<Utc>) -> serde_json::Result<ExportFile> {
    ExportFile::new(
        format!("analytics-{}-{}.json", dataset.range.as_str(), epoch_millis(at)),
        &AnalyticsExport {
            range: dataset.range.as_str(),
            dataset,
            exported_at: export_timestamp(at),
        },
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportExport {
    #[serde(flatten)]
    document: ReportDocument,
    exported_at: String,
}

pub fn report_export(report: &Report, at: &DateTime<Utc>) -> serde_json::Result<ExportFile> {
    let stamp = export_timestamp(at);
    ExportFile::new(
        format!("{}-{}.json", slugify(&report.title), date_suffix(at)),
        &ReportExport {
            document: ReportDocument::new(report, stamp.clone()),
            exported_at: stamp,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{alert_catalogue, demo_alerts};
    use crate::demo::{generate_demo_data_with, RangeKey};
    use crate::reports::find_report;
    use crate::simulation::{compute_impact, projection};
    use crate::zones::{demo_zones, zone_weekly_series};
    use crate::{detail, seeded_rng};
    use chrono::TimeZone;
    use serde_json::Value;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap() + chrono::Duration::milliseconds(250)
    }

    fn parse(file: &ExportFile) -> Value {
        serde_json::from_str(&file.contents).unwrap()
    }

    #[test]
    fn test_alert_file_names() {
        let mut rng = seeded_rng(1);
        let impact = detail::alert_impact_series(&mut rng);
        let with_id = alert_catalogue().find(2).unwrap().to_alert();
        let file = alert_export(&with_id, &impact, &at()).unwrap();
        assert_eq!(file.file_name, "alert-2.json");

        let file = alert_export(&demo_alerts()[0], &impact, &at()).unwrap();
        assert_eq!(file.file_name, "alert-1709647629250.json");
        let json = parse(&file);
        assert_eq!(json["exportedAt"], "2024-03-05T14:07:09.250Z");
        assert_eq!(json["impactData"].as_array().unwrap().len(), 24);
    }

    #[test]
    fn test_sensor_and_zone_exports() {
        let mut rng = seeded_rng(1);
        let sensor = SensorReading::get_demo_readings().remove(1);
        let file = sensor_export(
            &sensor,
            &detail::sensor_hourly_series(&mut rng),
            &detail::sensor_weekly_series(&mut rng),
            &at(),
        )
        .unwrap();
        assert_eq!(file.file_name, "sensor-2-1709647629250.json");
        assert_eq!(parse(&file)["sensor"]["zone"], "MIHAN");

        let zone = demo_zones().remove(2);
        let file = zone_export(&zone, &zone_weekly_series(&zone), &at()).unwrap();
        assert_eq!(file.file_name, "zone-Seminary Hills-1709647629250.json");
        let json = parse(&file);
        assert_eq!(json["weeklyData"][0]["co2"], 400);
        assert_eq!(json["zone"]["status"], "good");
    }

    #[test]
    fn test_simulation_export() {
        let inputs = InterventionInputs::default();
        let result = compute_impact(&inputs);
        let file = simulation_export(&inputs, &result, &projection(&result), &at()).unwrap();
        assert_eq!(file.file_name, "simulation-1709647629250.json");
        let json = parse(&file);
        assert_eq!(json["results"]["impact"], 31);
        assert_eq!(json["results"]["cost"], 127.5);
        assert_eq!(json["results"]["roi"], "2.4");
        assert_eq!(json["results"]["interventions"]["tech"], 5);
        assert_eq!(json["projectionData"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_analytics_export() {
        let dataset = generate_demo_data_with(RangeKey::Days30, &mut seeded_rng(3));
        let file = analytics_export(&dataset, &at()).unwrap();
        assert_eq!(file.file_name, "analytics-30days-1709647629250.json");
        let json = parse(&file);
        assert_eq!(json["range"], "30days");
        assert_eq!(json["dataset"]["weekData"].as_array().unwrap().len(), 30);
    }

    #[test]
    fn test_report_export() {
        let report = find_report("Monthly Environmental Analysis").unwrap();
        let file = report_export(&report, &at()).unwrap();
        assert_eq!(file.file_name, "monthly-environmental-analysis-2024-03-05.json");
        let json = parse(&file);
        assert_eq!(json["title"], "Monthly Environmental Analysis");
        assert_eq!(json["generated"], json["exportedAt"]);
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
        assert!(file.contents.contains("\n  \"title\""));
    }
}
