//! Domain series to chart JSON.
//!
//! Both chart scripts take the same shape: a list of labelled points with
//! one value per series key, plus a config naming the series.

use ctw_data::dashboard::TrendPoint;
use ctw_data::demo::{
    EmissionSource, HourlyPattern, PredictionPoint, RadarMetric, RangeKey, WeekPoint, ZoneComparison,
};
use ctw_data::detail::{ImpactPoint, SensorDayPoint, SensorHourPoint, ALERT_THRESHOLD_PPM};
use ctw_data::simulation::{BreakdownEntry, CostEntry, ProjectionPoint, PROJECTION_TARGET};
use ctw_data::zones::ZoneDayPoint;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub values: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ChartPoint {
    fn new(label: impl Into<String>, values: &[(&str, Option<f64>)]) -> Self {
        ChartPoint {
            label: label.into(),
            values: values
                .iter()
                .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
                .collect(),
            color: None,
        }
    }

    fn colored(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub key: String,
    pub label: String,
    pub color: String,
    pub dashed: bool,
}

fn series(key: &str, label: &str, color: &str) -> Series {
    Series {
        key: key.to_string(),
        label: label.to_string(),
        color: color.to_string(),
        dashed: false,
    }
}

fn dashed(key: &str, label: &str, color: &str) -> Series {
    Series {
        dashed: true,
        ..series(key, label, color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub title: String,
    pub y_axis_label: String,
    pub y_unit: String,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl ChartConfig {
    fn new(title: &str, y_axis_label: &str, y_unit: &str, series: Vec<Series>) -> Self {
        ChartConfig {
            title: title.to_string(),
            y_axis_label: y_axis_label.to_string(),
            y_unit: y_unit.to_string(),
            series,
            threshold: None,
        }
    }

    fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

/// Serialized data and config, ready for `js_bridge::render_*`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPayload {
    pub data_json: String,
    pub config_json: String,
}

fn payload(points: &[ChartPoint], config: &ChartConfig) -> serde_json::Result<ChartPayload> {
    Ok(ChartPayload {
        data_json: serde_json::to_string(points)?,
        config_json: serde_json::to_string(config)?,
    })
}

const SITABULDI_COLOR: &str = "#ef4444";
const MIHAN_COLOR: &str = "#f59e0b";
const SEMINARY_COLOR: &str = "#10b981";
const PRIMARY_COLOR: &str = "#3b82f6";
const MUTED_COLOR: &str = "#9ca3af";

pub fn week_chart(range: RangeKey, week: &[WeekPoint]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = week
        .iter()
        .map(|p| {
            ChartPoint::new(
                p.day.as_str(),
                &[
                    ("sitabuldi", Some(p.sitabuldi as f64)),
                    ("mihan", Some(p.mihan as f64)),
                    ("seminary", Some(p.seminary as f64)),
                ],
            )
        })
        .collect();
    let title = format!("Zone CO₂ Trends ({})", range.label());
    let config = ChartConfig::new(
        &title,
        "CO₂ (ppm)",
        "ppm",
        vec![
            series("sitabuldi", "Sitabuldi", SITABULDI_COLOR),
            series("mihan", "MIHAN", MIHAN_COLOR),
            series("seminary", "Seminary Hills", SEMINARY_COLOR),
        ],
    );
    payload(&points, &config)
}

/// Actual readings stop where the forecast horizon starts.
pub fn prediction_chart(predictions: &[PredictionPoint]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = predictions
        .iter()
        .map(|p| {
            ChartPoint::new(
                p.hour.as_str(),
                &[
                    ("actual", p.actual.map(f64::from)),
                    ("predicted", Some(p.predicted as f64)),
                ],
            )
        })
        .collect();
    let config = ChartConfig::new(
        "AI CO₂ Prediction",
        "CO₂ (ppm)",
        "ppm",
        vec![
            series("actual", "Actual", PRIMARY_COLOR),
            dashed("predicted", "Predicted", "#8b5cf6"),
        ],
    );
    payload(&points, &config)
}

pub fn emission_source_chart(sources: &[EmissionSource]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = sources
        .iter()
        .map(|s| ChartPoint::new(s.name.as_str(), &[("share", Some(s.value as f64))]).colored(&s.color))
        .collect();
    let config = ChartConfig::new(
        "Emission Sources",
        "Share (%)",
        "%",
        vec![series("share", "Share", PRIMARY_COLOR)],
    );
    payload(&points, &config)
}

pub fn zone_comparison_chart(zones: &[ZoneComparison]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = zones
        .iter()
        .map(|z| {
            ChartPoint::new(
                z.zone.as_str(),
                &[
                    ("current", Some(z.current as f64)),
                    ("lastWeek", Some(z.last_week as f64)),
                    ("target", Some(z.target as f64)),
                ],
            )
        })
        .collect();
    let config = ChartConfig::new(
        "Zone Comparison",
        "CO₂ (ppm)",
        "ppm",
        vec![
            series("current", "Current", PRIMARY_COLOR),
            series("lastWeek", "Last Week", MUTED_COLOR),
            series("target", "Target", SEMINARY_COLOR),
        ],
    );
    payload(&points, &config)
}

pub fn hourly_chart(pattern: &[HourlyPattern]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = pattern
        .iter()
        .map(|h| {
            ChartPoint::new(
                h.hour.as_str(),
                &[
                    ("traffic", Some(h.traffic as f64)),
                    ("industrial", Some(h.industrial as f64)),
                ],
            )
        })
        .collect();
    let config = ChartConfig::new(
        "Hourly Emission Pattern",
        "Activity (%)",
        "%",
        vec![
            series("traffic", "Traffic", MIHAN_COLOR),
            series("industrial", "Industrial", "#8b5cf6"),
        ],
    );
    payload(&points, &config)
}

pub fn radar_chart(metrics: &[RadarMetric]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = metrics
        .iter()
        .map(|m| {
            ChartPoint::new(
                m.metric.as_str(),
                &[
                    ("current", Some(m.current as f64)),
                    ("target", Some(m.target as f64)),
                ],
            )
        })
        .collect();
    let config = ChartConfig::new(
        "Performance vs Target",
        "Score",
        "",
        vec![
            series("current", "Current", PRIMARY_COLOR),
            series("target", "Target", SEMINARY_COLOR),
        ],
    );
    payload(&points, &config)
}

pub fn trend_chart(trend: &[TrendPoint]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = trend
        .iter()
        .map(|t| ChartPoint::new(t.time.as_str(), &[("co2", Some(t.co2 as f64))]))
        .collect();
    let config = ChartConfig::new(
        "City CO₂ Today",
        "CO₂ (ppm)",
        "ppm",
        vec![series("co2", "CO₂", PRIMARY_COLOR)],
    );
    payload(&points, &config)
}

pub fn projection_chart(projection: &[ProjectionPoint]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = projection
        .iter()
        .map(|p| {
            ChartPoint::new(
                p.month.as_str(),
                &[("current", Some(p.current)), ("projected", Some(p.projected))],
            )
        })
        .collect();
    let config = ChartConfig::new(
        "6-Month CO₂ Projection",
        "CO₂ (ppm)",
        "ppm",
        vec![
            series("current", "Current Trend", SITABULDI_COLOR),
            dashed("projected", "With Interventions", SEMINARY_COLOR),
        ],
    )
    .with_threshold(PROJECTION_TARGET);
    payload(&points, &config)
}

pub fn breakdown_chart(breakdown: &[BreakdownEntry]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = breakdown
        .iter()
        .map(|b| ChartPoint::new(b.name.as_str(), &[("impact", Some(b.impact as f64))]).colored(&b.fill))
        .collect();
    let config = ChartConfig::new(
        "Impact by Intervention",
        "Reduction (%)",
        "%",
        vec![series("impact", "Impact", PRIMARY_COLOR)],
    );
    payload(&points, &config)
}

pub fn cost_chart(costs: &[CostEntry]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = costs
        .iter()
        .map(|c| ChartPoint::new(c.category.as_str(), &[("cost", Some(c.cost))]).colored(&c.fill))
        .collect();
    let config = ChartConfig::new(
        "Cost Breakdown",
        "Cost (₹ Lakh)",
        "L",
        vec![series("cost", "Cost", PRIMARY_COLOR)],
    );
    payload(&points, &config)
}

pub fn zone_week_chart(zone_name: &str, week: &[ZoneDayPoint]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = week
        .iter()
        .map(|d| {
            ChartPoint::new(
                d.day.as_str(),
                &[("co2", Some(d.co2 as f64)), ("aqi", Some(d.aqi as f64))],
            )
        })
        .collect();
    let title = format!("{} this week", zone_name);
    let config = ChartConfig::new(
        &title,
        "CO₂ (ppm) / AQI",
        "",
        vec![series("co2", "CO₂", PRIMARY_COLOR), series("aqi", "AQI", MIHAN_COLOR)],
    );
    payload(&points, &config)
}

pub fn sensor_hourly_chart(hours: &[SensorHourPoint]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = hours
        .iter()
        .map(|h| ChartPoint::new(h.time.as_str(), &[("co2", Some(h.co2.round()))]))
        .collect();
    let config = ChartConfig::new(
        "Last 24 Hours",
        "CO₂ (ppm)",
        "ppm",
        vec![series("co2", "CO₂", PRIMARY_COLOR)],
    );
    payload(&points, &config)
}

pub fn sensor_weekly_chart(days: &[SensorDayPoint]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = days
        .iter()
        .map(|d| {
            ChartPoint::new(
                d.day.as_str(),
                &[
                    ("min", Some(d.min as f64)),
                    ("avg", Some(d.avg as f64)),
                    ("max", Some(d.max as f64)),
                ],
            )
        })
        .collect();
    let config = ChartConfig::new(
        "Weekly Range",
        "CO₂ (ppm)",
        "ppm",
        vec![
            series("min", "Min", SEMINARY_COLOR),
            series("avg", "Average", PRIMARY_COLOR),
            series("max", "Max", SITABULDI_COLOR),
        ],
    );
    payload(&points, &config)
}

pub fn alert_impact_chart(impact: &[ImpactPoint]) -> serde_json::Result<ChartPayload> {
    let points: Vec<ChartPoint> = impact
        .iter()
        .map(|p| ChartPoint::new(p.time.as_str(), &[("level", Some(p.level.round()))]))
        .collect();
    let config = ChartConfig::new(
        "CO₂ Around the Alert",
        "CO₂ (ppm)",
        "ppm",
        vec![series("level", "CO₂", SITABULDI_COLOR)],
    )
    .with_threshold(ALERT_THRESHOLD_PPM);
    payload(&points, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctw_data::demo::{fixed_week, prediction_series};
    use ctw_data::simulation::{compute_impact, cost_breakdown, projection, InterventionInputs};
    use serde_json::Value;

    fn parse(payload: &ChartPayload) -> (Value, Value) {
        (
            serde_json::from_str(&payload.data_json).unwrap(),
            serde_json::from_str(&payload.config_json).unwrap(),
        )
    }

    #[test]
    fn test_week_chart_has_a_series_per_zone() {
        let chart = week_chart(RangeKey::Days7, &fixed_week()).unwrap();
        let (data, config) = parse(&chart);
        assert_eq!(data.as_array().unwrap().len(), 7);
        assert_eq!(data[0]["label"], "Mon");
        assert_eq!(data[0]["values"]["sitabuldi"], 1180.0);
        assert_eq!(config["series"].as_array().unwrap().len(), 3);
        assert_eq!(config["yAxisLabel"], "CO₂ (ppm)");
        assert!(config.get("threshold").is_none());
    }

    #[test]
    fn test_prediction_chart_omits_missing_actuals() {
        let predictions = prediction_series();
        let chart = prediction_chart(&predictions).unwrap();
        let (data, _) = parse(&chart);
        for (point, source) in data.as_array().unwrap().iter().zip(&predictions) {
            assert_eq!(point["values"].get("actual").is_some(), source.actual.is_some());
            assert!(point["values"].get("predicted").is_some());
        }
    }

    #[test]
    fn test_projection_chart_carries_target_line() {
        let result = compute_impact(&InterventionInputs::default());
        let chart = projection_chart(&projection(&result)).unwrap();
        let (data, config) = parse(&chart);
        assert_eq!(config["threshold"], PROJECTION_TARGET);
        assert_eq!(data[0]["label"], "Month 1");
        assert_eq!(config["series"][1]["dashed"], true);
    }

    #[test]
    fn test_cost_bars_use_entry_colors() {
        let inputs = InterventionInputs::default();
        let costs = cost_breakdown(&inputs, &compute_impact(&inputs));
        let chart = cost_chart(&costs).unwrap();
        let (data, _) = parse(&chart);
        assert_eq!(data[0]["color"], costs[0].fill.as_str());
        assert_eq!(data[0]["values"]["cost"], 50.0);
    }
}
