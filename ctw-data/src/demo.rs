//! Demo dataset generator for the analytics views.
//!
//! The 24-hour, 30-day and 90-day buckets are synthetic: each metric of each
//! point is drawn independently from a uniform band centred on a fixed base.
//! The 7-day bucket is a fixed literal week. Everything else in the dataset
//! (predictions, emission sources, zone comparison, hourly pattern, radar
//! metrics) is fixed, and the metric cards are derived from the week series.

use crate::Trend;
use ctw_utils::numbers::{format_thousands, round_half_up};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Time range bucket requested by the analytics views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeKey {
    #[serde(rename = "24hours")]
    Hours24,
    #[serde(rename = "7days")]
    Days7,
    #[serde(rename = "30days")]
    Days30,
    #[serde(rename = "90days")]
    Days90,
}

impl RangeKey {
    pub const ALL: [RangeKey; 4] = [
        RangeKey::Hours24,
        RangeKey::Days7,
        RangeKey::Days30,
        RangeKey::Days90,
    ];

    /// Parse a range key; anything unrecognised falls back to `7days`.
    pub fn parse(key: &str) -> Self {
        match key.trim() {
            "24hours" => RangeKey::Hours24,
            "30days" => RangeKey::Days30,
            "90days" => RangeKey::Days90,
            _ => RangeKey::Days7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKey::Hours24 => "24hours",
            RangeKey::Days7 => "7days",
            RangeKey::Days30 => "30days",
            RangeKey::Days90 => "90days",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangeKey::Hours24 => "Last 24 Hours",
            RangeKey::Days7 => "Last 7 Days",
            RangeKey::Days30 => "Last 30 Days",
            RangeKey::Days90 => "Last 90 Days",
        }
    }

    /// "Hourly", "Weekly" or "Period", used in card titles.
    pub fn period_adjective(&self) -> &'static str {
        match self {
            RangeKey::Hours24 => "Hourly",
            RangeKey::Days7 => "Weekly",
            RangeKey::Days30 | RangeKey::Days90 => "Period",
        }
    }

    /// Emission reduction shown on the reduction card.
    pub fn reduction_percent(&self) -> &'static str {
        match self {
            RangeKey::Hours24 => "3.2%",
            RangeKey::Days7 => "8.5%",
            RangeKey::Days30 => "12.3%",
            RangeKey::Days90 => "18.7%",
        }
    }
}

impl std::fmt::Display for RangeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform band `[base - range/2, base + range/2)` for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterBand {
    pub base: i32,
    pub range: i32,
}

const fn band(base: i32, range: i32) -> JitterBand {
    JitterBand { base, range }
}

impl JitterBand {
    /// `base + uniform_int[0, range) - range/2`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.range <= 0 {
            return self.base;
        }
        self.base + rng.gen_range(0..self.range) - self.range / 2
    }
}

/// Bands for one randomized bucket: sitabuldi, mihan, seminary, temp, aqi.
struct BucketBands {
    points: usize,
    sitabuldi: JitterBand,
    mihan: JitterBand,
    seminary: JitterBand,
    temp: JitterBand,
    aqi: JitterBand,
}

const HOURS_24: BucketBands = BucketBands {
    points: 24,
    sitabuldi: band(1100, 200),
    mihan: band(850, 150),
    seminary: band(300, 80),
    temp: band(31, 6),
    aqi: band(135, 30),
};

const DAYS_30: BucketBands = BucketBands {
    points: 30,
    sitabuldi: band(1150, 300),
    mihan: band(870, 200),
    seminary: band(300, 100),
    temp: band(32, 8),
    aqi: band(140, 40),
};

const DAYS_90: BucketBands = BucketBands {
    points: 90,
    sitabuldi: band(1100, 400),
    mihan: band(850, 250),
    seminary: band(290, 120),
    temp: band(31, 10),
    aqi: band(138, 50),
};

/// One point of the zone time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPoint {
    pub day: String,
    pub sitabuldi: i32,
    pub mihan: i32,
    pub seminary: i32,
    pub temp: i32,
    pub aqi: i32,
}

impl WeekPoint {
    fn fixed(day: &str, sitabuldi: i32, mihan: i32, seminary: i32, temp: i32, aqi: i32) -> Self {
        WeekPoint {
            day: day.to_string(),
            sitabuldi,
            mihan,
            seminary,
            temp,
            aqi,
        }
    }

    /// Combined CO₂ of the three zones.
    pub fn total_co2(&self) -> i64 {
        self.sitabuldi as i64 + self.mihan as i64 + self.seminary as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub hour: String,
    pub actual: Option<i32>,
    pub predicted: i32,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionSource {
    pub name: String,
    /// Share of total emissions in percent
    pub value: u8,
    pub color: String,
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneComparison {
    pub zone: String,
    pub current: i32,
    pub last_week: i32,
    pub target: i32,
    pub efficiency: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPattern {
    pub hour: String,
    pub co2: i32,
    pub traffic: u8,
    pub industrial: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarMetric {
    pub metric: String,
    pub current: u8,
    pub target: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub id: String,
    pub title: String,
    pub value: String,
    pub unit: String,
    pub change: String,
    pub trend: Trend,
    pub color: String,
    pub description: String,
}

/// Everything the analytics views render for one range bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoDataset {
    pub range: RangeKey,
    pub week_data: Vec<WeekPoint>,
    pub prediction_data: Vec<PredictionPoint>,
    pub emission_sources: Vec<EmissionSource>,
    pub zone_comparison: Vec<ZoneComparison>,
    pub hourly_pattern: Vec<HourlyPattern>,
    pub radar_data: Vec<RadarMetric>,
    pub metric_cards: Vec<MetricCard>,
}

impl DemoDataset {
    /// Average combined CO₂ per point, rounded half up.
    pub fn average_emissions(&self) -> i64 {
        average_emissions(&self.week_data)
    }
}

/// Generate the demo dataset for a range key with an unseeded RNG.
///
/// Randomized buckets differ on every call.
pub fn generate_demo_data(range: &str) -> DemoDataset {
    generate_demo_data_with(RangeKey::parse(range), &mut rand::thread_rng())
}

/// Generate the demo dataset drawing jitter from `rng`.
pub fn generate_demo_data_with<R: Rng + ?Sized>(range: RangeKey, rng: &mut R) -> DemoDataset {
    let week_data = week_series(range, rng);
    let metric_cards = metric_cards(range, &week_data);
    DemoDataset {
        range,
        week_data,
        prediction_data: prediction_series(),
        emission_sources: emission_sources(),
        zone_comparison: zone_comparison(),
        hourly_pattern: hourly_pattern(),
        radar_data: radar_metrics(),
        metric_cards,
    }
}

/// The zone time series for a bucket.
pub fn week_series<R: Rng + ?Sized>(range: RangeKey, rng: &mut R) -> Vec<WeekPoint> {
    match range {
        RangeKey::Hours24 => jittered_series(&HOURS_24, |i| format!("{}:00", i), rng),
        RangeKey::Days30 => jittered_series(&DAYS_30, |i| format!("D{}", i + 1), rng),
        RangeKey::Days90 => jittered_series(&DAYS_90, |i| format!("D{}", i + 1), rng),
        RangeKey::Days7 => fixed_week(),
    }
}

fn jittered_series<R: Rng + ?Sized>(
    bands: &BucketBands,
    label: impl Fn(usize) -> String,
    rng: &mut R,
) -> Vec<WeekPoint> {
    (0..bands.points)
        .map(|i| WeekPoint {
            day: label(i),
            sitabuldi: bands.sitabuldi.sample(rng),
            mihan: bands.mihan.sample(rng),
            seminary: bands.seminary.sample(rng),
            temp: bands.temp.sample(rng),
            aqi: bands.aqi.sample(rng),
        })
        .collect()
}

/// The fixed Monday..Sunday week.
pub fn fixed_week() -> Vec<WeekPoint> {
    vec![
        WeekPoint::fixed("Mon", 1180, 870, 310, 32, 142),
        WeekPoint::fixed("Tue", 1150, 850, 320, 31, 138),
        WeekPoint::fixed("Wed", 1220, 920, 300, 33, 145),
        WeekPoint::fixed("Thu", 1190, 880, 315, 32, 140),
        WeekPoint::fixed("Fri", 1280, 950, 295, 34, 148),
        WeekPoint::fixed("Sat", 1050, 780, 280, 30, 125),
        WeekPoint::fixed("Sun", 980, 720, 270, 29, 118),
    ]
}

/// 24-hour forecast; confidence decreases with the horizon.
pub fn prediction_series() -> Vec<PredictionPoint> {
    let rows: [(&str, Option<i32>, i32, u8); 7] = [
        ("Now", Some(1100), 1100, 100),
        ("+4h", None, 1180, 94),
        ("+8h", None, 980, 89),
        ("+12h", None, 850, 85),
        ("+16h", None, 920, 80),
        ("+20h", None, 780, 75),
        ("+24h", None, 650, 70),
    ];
    rows.iter()
        .map(|&(hour, actual, predicted, confidence)| PredictionPoint {
            hour: hour.to_string(),
            actual,
            predicted,
            confidence,
        })
        .collect()
}

pub fn emission_sources() -> Vec<EmissionSource> {
    [
        ("Vehicles", 45, "#3b82f6", "+2%"),
        ("Industries", 35, "#f59e0b", "-5%"),
        ("Residential", 12, "#10b981", "+1%"),
        ("Commercial", 8, "#8b5cf6", "-3%"),
    ]
    .iter()
    .map(|&(name, value, color, trend)| EmissionSource {
        name: name.to_string(),
        value,
        color: color.to_string(),
        trend: trend.to_string(),
    })
    .collect()
}

pub fn zone_comparison() -> Vec<ZoneComparison> {
    [
        ("Sitabuldi", 1200, 1280, 900, 65),
        ("MIHAN", 890, 920, 700, 78),
        ("Seminary Hills", 320, 350, 300, 92),
    ]
    .iter()
    .map(|&(zone, current, last_week, target, efficiency)| ZoneComparison {
        zone: zone.to_string(),
        current,
        last_week,
        target,
        efficiency,
    })
    .collect()
}

pub fn hourly_pattern() -> Vec<HourlyPattern> {
    [
        ("00:00", 620, 15, 45),
        ("04:00", 580, 10, 40),
        ("08:00", 950, 85, 60),
        ("12:00", 1100, 75, 80),
        ("16:00", 1180, 90, 85),
        ("20:00", 890, 70, 55),
        ("23:59", 680, 20, 45),
    ]
    .iter()
    .map(|&(hour, co2, traffic, industrial)| HourlyPattern {
        hour: hour.to_string(),
        co2,
        traffic,
        industrial,
    })
    .collect()
}

pub fn radar_metrics() -> Vec<RadarMetric> {
    [
        ("CO₂ Levels", 75, 60),
        ("AQI", 68, 50),
        ("Traffic", 82, 60),
        ("Industrial", 70, 55),
        ("Residential", 45, 40),
        ("Temperature", 55, 50),
    ]
    .iter()
    .map(|&(metric, current, target)| RadarMetric {
        metric: metric.to_string(),
        current,
        target,
    })
    .collect()
}

fn average_emissions(week: &[WeekPoint]) -> i64 {
    if week.is_empty() {
        return 0;
    }
    let total: i64 = week.iter().map(WeekPoint::total_co2).sum();
    round_half_up(total as f64 / week.len() as f64) as i64
}

#[allow(clippy::too_many_arguments)]
fn card(
    id: &str,
    title: String,
    value: String,
    unit: &str,
    change: &str,
    trend: Trend,
    color: &str,
    description: String,
) -> MetricCard {
    MetricCard {
        id: id.to_string(),
        title,
        value,
        unit: unit.to_string(),
        change: change.to_string(),
        trend,
        color: color.to_string(),
        description,
    }
}

/// Summary cards; the emissions card and the period wording depend on the
/// bucket, the rest are fixed figures.
pub fn metric_cards(range: RangeKey, week: &[WeekPoint]) -> Vec<MetricCard> {
    let adjective = range.period_adjective();
    vec![
        card(
            "emissions",
            "Total CO₂ Emissions".to_string(),
            format_thousands(average_emissions(week)),
            "ppm",
            "-8.5%",
            Trend::Down,
            "#3b82f6",
            format!("{} average emissions across all zones", adjective),
        ),
        card(
            "prediction",
            "AI Prediction Accuracy".to_string(),
            "94.2%".to_string(),
            "",
            "+2.1%",
            Trend::Up,
            "#0891b2",
            "Machine learning model confidence".to_string(),
        ),
        card(
            "zones",
            "Critical Zones".to_string(),
            "1".to_string(),
            "/ 3",
            "-1",
            Trend::Down,
            "#f59e0b",
            "Zones requiring immediate attention".to_string(),
        ),
        card(
            "reduction",
            format!("{} Reduction", adjective),
            range.reduction_percent().to_string(),
            "",
            "vs previous period",
            Trend::Down,
            "#10b981",
            "Overall emission reduction trend".to_string(),
        ),
        card(
            "compliance",
            "Target Compliance".to_string(),
            "78%".to_string(),
            "",
            "+5%",
            Trend::Up,
            "#8b5cf6",
            "Zones meeting emission targets".to_string(),
        ),
        card(
            "sensors",
            "Active Sensors".to_string(),
            "247".to_string(),
            "/ 250",
            "99%",
            Trend::Up,
            "#10b981",
            "Operational sensor network".to_string(),
        ),
    ]
}
