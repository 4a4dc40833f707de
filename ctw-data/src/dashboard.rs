//! Home dashboard composition: city stat cards, zones, alerts and the
//! intraday trend, for demo data or live readings.

use crate::alerts::{demo_alerts, live_alerts, Alert};
use crate::demo::JitterBand;
use crate::source::DataSource;
use crate::zones::{demo_zones, summarize_zones, ZoneSummary};
use crate::Trend;
use chrono::{DateTime, Utc};
use ctw_sensor::SensorReading;
use ctw_utils::numbers::{format_thousands, round_half_up};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStat {
    pub title: String,
    pub value: String,
    pub unit: String,
    pub change: String,
    pub trend: Trend,
    pub status: String,
    pub color: String,
}

fn stat(title: &str, value: String, unit: &str, change: &str, trend: Trend, status: &str, color: &str) -> CityStat {
    CityStat {
        title: title.to_string(),
        value,
        unit: unit.to_string(),
        change: change.to_string(),
        trend,
        status: status.to_string(),
        color: color.to_string(),
    }
}

fn city_stats(co2: String, aqi: String, temp: String, humidity: String) -> Vec<CityStat> {
    vec![
        stat("Overall CO₂ Level", co2, "ppm", "-8%", Trend::Down, "moderate", "#3b82f6"),
        stat("Air Quality Index", aqi, "AQI", "+3%", Trend::Up, "moderate", "#10b981"),
        stat("Temperature", temp, "°C", "+2°C", Trend::Up, "normal", "#f59e0b"),
        stat("Humidity", humidity, "%", "-5%", Trend::Down, "good", "#0891b2"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub time: String,
    pub co2: i64,
}

const TREND_LABELS: [&str; 7] = ["6 AM", "9 AM", "12 PM", "3 PM", "6 PM", "9 PM", "Now"];
const DEMO_TREND: [i64; 7] = [520, 780, 950, 1100, 890, 680, 642];

/// Spread of the synthetic live trend around the current city average.
const LIVE_TREND_RANGE: i32 = 100;

fn demo_trend() -> Vec<TrendPoint> {
    TREND_LABELS
        .iter()
        .zip(DEMO_TREND.iter())
        .map(|(time, co2)| TrendPoint {
            time: time.to_string(),
            co2: *co2,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub source: DataSource,
    pub city_stats: Vec<CityStat>,
    pub zones: Vec<ZoneSummary>,
    pub realtime_alerts: Vec<Alert>,
    pub trend_data: Vec<TrendPoint>,
}

impl DashboardSnapshot {
    pub fn demo() -> Self {
        DashboardSnapshot {
            source: DataSource::Demo,
            city_stats: city_stats(
                "642".to_string(),
                "68".to_string(),
                "32".to_string(),
                "65".to_string(),
            ),
            zones: demo_zones(),
            realtime_alerts: demo_alerts(),
            trend_data: demo_trend(),
        }
    }

    /// Build the dashboard from live readings. City figures average the
    /// per-zone averages; with no readings the demo figures are shown, still
    /// labelled as live.
    pub fn from_readings<R: Rng + ?Sized>(
        readings: &[SensorReading],
        now: &DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let zones = summarize_zones(readings);
        if zones.is_empty() {
            log::info!("no live readings available, showing demo dashboard");
            return DashboardSnapshot {
                source: DataSource::Live,
                ..DashboardSnapshot::demo()
            };
        }

        let n = zones.len() as f64;
        let mean = |f: fn(&ZoneSummary) -> i64| -> i64 {
            round_half_up(zones.iter().map(|z| f(z) as f64).sum::<f64>() / n) as i64
        };
        let co2 = mean(|z| z.co2);
        let aqi = mean(|z| z.aqi);
        let temp = mean(|z| z.temp);

        let band = JitterBand {
            base: co2 as i32,
            range: LIVE_TREND_RANGE,
        };
        let trend_data = TREND_LABELS
            .iter()
            .map(|time| TrendPoint {
                time: time.to_string(),
                co2: if *time == "Now" {
                    co2
                } else {
                    band.sample(rng) as i64
                },
            })
            .collect();

        DashboardSnapshot {
            source: DataSource::Live,
            city_stats: city_stats(
                format_thousands(co2),
                format_thousands(aqi),
                format_thousands(temp),
                "0".to_string(),
            ),
            realtime_alerts: live_alerts(readings, now),
            zones,
            trend_data,
        }
    }

    /// Zones currently in the poor band.
    pub fn critical_zone_count(&self) -> usize {
        self.zones
            .iter()
            .filter(|z| z.status == crate::zones::ZoneStatus::Poor)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    fn readings() -> Vec<SensorReading> {
        vec![
            SensorReading::new(1, 21.1, 79.0, 1200.0, "A", "Sitabuldi", 120.0, 0.0),
            SensorReading::new(2, 21.0, 79.1, 800.0, "B", "MIHAN", 60.0, 0.0),
        ]
    }

    #[test]
    fn test_demo_snapshot() {
        let snapshot = DashboardSnapshot::demo();
        assert_eq!(snapshot.source, DataSource::Demo);
        assert_eq!(snapshot.city_stats.len(), 4);
        assert_eq!(snapshot.city_stats[0].value, "642");
        assert_eq!(snapshot.trend_data.last().unwrap().co2, 642);
        assert_eq!(snapshot.critical_zone_count(), 1);
    }

    #[test]
    fn test_live_snapshot() {
        let now = Utc::now();
        let snapshot = DashboardSnapshot::from_readings(&readings(), &now, &mut seeded_rng(5));
        assert_eq!(snapshot.source, DataSource::Live);
        assert_eq!(snapshot.city_stats[0].value, "1,000");
        assert_eq!(snapshot.city_stats[1].value, "90");
        assert_eq!(snapshot.city_stats[3].value, "0");
        assert_eq!(snapshot.zones.len(), 2);
        assert_eq!(snapshot.realtime_alerts.len(), 1);

        let now_point = snapshot.trend_data.last().unwrap();
        assert_eq!(now_point.time, "Now");
        assert_eq!(now_point.co2, 1000);
        for point in &snapshot.trend_data[..6] {
            assert!((950..1050).contains(&point.co2));
        }
    }

    #[test]
    fn test_empty_readings_show_demo_figures_as_live() {
        let snapshot = DashboardSnapshot::from_readings(&[], &Utc::now(), &mut seeded_rng(1));
        assert_eq!(snapshot.source, DataSource::Live);
        let demo = DashboardSnapshot::demo();
        assert_eq!(snapshot.city_stats, demo.city_stats);
        assert_eq!(snapshot.zones, demo.zones);
        assert_eq!(snapshot.trend_data, demo.trend_data);
    }
}
