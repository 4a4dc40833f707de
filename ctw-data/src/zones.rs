//! Zone summaries, from the demo fixture or aggregated from live readings.

use ctw_sensor::SensorReading;
use ctw_utils::numbers::round_half_up;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const GOOD_COLOR: &str = "#10b981";
pub const MODERATE_COLOR: &str = "#f59e0b";
pub const POOR_COLOR: &str = "#ef4444";

/// Station labels reported by the API mapped to the names shown on the
/// dashboard.
const ZONE_DISPLAY_NAMES: [(&str, &str); 3] = [
    ("Nagpur-Sitabuldi", "Sitabuldi (Central)"),
    ("Nagpur-MIHAN", "MIHAN (Airport)"),
    ("Nagpur-SeminaryHills", "Seminary Hills"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Good,
    Moderate,
    Poor,
}

impl ZoneStatus {
    /// `> 1000` ppm is poor, `> 700` moderate, anything else good.
    pub fn from_co2(co2: f64) -> Self {
        if co2 > 1000.0 {
            ZoneStatus::Poor
        } else if co2 > 700.0 {
            ZoneStatus::Moderate
        } else {
            ZoneStatus::Good
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ZoneStatus::Good => GOOD_COLOR,
            ZoneStatus::Moderate => MODERATE_COLOR,
            ZoneStatus::Poor => POOR_COLOR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneStatus::Good => "good",
            ZoneStatus::Moderate => "moderate",
            ZoneStatus::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub name: String,
    /// Average CO₂, ppm
    pub co2: i64,
    pub aqi: i64,
    /// Average temperature, °C
    pub temp: i64,
    pub population: String,
    pub status: ZoneStatus,
    /// Week-over-week change in percent
    pub trend: f64,
    pub color: String,
    pub sensor_count: usize,
}

impl ZoneSummary {
    fn demo(name: &str, co2: i64, aqi: i64, population: &str, trend: f64) -> Self {
        let status = ZoneStatus::from_co2(co2 as f64);
        ZoneSummary {
            name: name.to_string(),
            co2,
            aqi,
            temp: 0,
            population: population.to_string(),
            status,
            trend,
            color: status.color().to_string(),
            sensor_count: 1,
        }
    }

    /// AQI as a share of the 150 gauge maximum, in percent.
    pub fn aqi_gauge(&self) -> f64 {
        (self.aqi as f64 / 150.0) * 100.0
    }
}

/// The three monitored demo zones.
pub fn demo_zones() -> Vec<ZoneSummary> {
    vec![
        ZoneSummary::demo("Sitabuldi (Central)", 1200, 142, "~250K", -3.0),
        ZoneSummary::demo("MIHAN (Airport)", 890, 98, "~80K", -5.0),
        ZoneSummary::demo("Seminary Hills", 320, 45, "~120K", -8.0),
    ]
}

/// Dashboard name for a reading group.
pub fn display_name(group: &str) -> &str {
    ZONE_DISPLAY_NAMES
        .iter()
        .find(|(label, _)| *label == group)
        .map(|(_, name)| *name)
        .unwrap_or(group)
}

#[derive(Default)]
struct ZoneAccumulator {
    co2: f64,
    aqi: f64,
    temp: f64,
    count: usize,
}

/// Group readings by zone (station name when the zone is blank) and average
/// each group. Groups keep the order in which they first appear.
pub fn summarize_zones(readings: &[SensorReading]) -> Vec<ZoneSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, ZoneAccumulator> = HashMap::new();
    for reading in readings {
        let key = reading.group_key();
        let acc = groups.entry(key).or_insert_with(|| {
            order.push(key);
            ZoneAccumulator::default()
        });
        acc.co2 += reading.value;
        acc.aqi += reading.aqi;
        acc.temp += reading.temp;
        acc.count += 1;
    }

    order
        .into_iter()
        .filter_map(|key| {
            let acc = groups.get(key)?;
            let n = acc.count.max(1) as f64;
            let co2 = acc.co2 / n;
            let status = ZoneStatus::from_co2(co2);
            Some(ZoneSummary {
                name: display_name(key).to_string(),
                co2: round_half_up(co2) as i64,
                aqi: round_half_up(acc.aqi / n) as i64,
                temp: round_half_up(acc.temp / n) as i64,
                population: "N/A".to_string(),
                status,
                trend: 0.0,
                color: status.color().to_string(),
                sensor_count: acc.count,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDayPoint {
    pub day: String,
    pub co2: i64,
    pub aqi: i64,
    /// Traffic load, percent
    pub traffic: u8,
}

/// Weekly profile around a zone's current reading.
pub fn zone_weekly_series(zone: &ZoneSummary) -> Vec<ZoneDayPoint> {
    [
        ("Mon", 80, 7, 75),
        ("Tue", 50, 4, 68),
        ("Wed", 120, 10, 82),
        ("Thu", 90, 6, 71),
        ("Fri", 180, 13, 95),
        ("Sat", -50, -10, 45),
        ("Sun", -100, -15, 32),
    ]
    .iter()
    .map(|&(day, co2, aqi, traffic)| ZoneDayPoint {
        day: day.to_string(),
        co2: zone.co2 + co2,
        aqi: zone.aqi + aqi,
        traffic,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(id: u64, value: f64, location: &str, zone: &str, aqi: f64) -> SensorReading {
        SensorReading::new(id, 21.1, 79.0, value, location, zone, aqi, 30.0)
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(ZoneStatus::from_co2(700.0), ZoneStatus::Good);
        assert_eq!(ZoneStatus::from_co2(701.0), ZoneStatus::Moderate);
        assert_eq!(ZoneStatus::from_co2(1000.0), ZoneStatus::Moderate);
        assert_eq!(ZoneStatus::from_co2(1001.0), ZoneStatus::Poor);
        assert_eq!(ZoneStatus::Poor.color(), "#ef4444");
    }

    #[test]
    fn test_demo_zones() {
        let zones = demo_zones();
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[0].status, ZoneStatus::Poor);
        assert_eq!(zones[1].status, ZoneStatus::Moderate);
        assert_eq!(zones[2].status, ZoneStatus::Good);
        assert_eq!(zones[2].color, GOOD_COLOR);
    }

    #[test]
    fn test_summarize_groups_and_averages() {
        let readings = vec![
            reading(1, 1100.0, "A", "Sitabuldi", 120.0),
            reading(2, 900.0, "B", "MIHAN", 80.0),
            reading(3, 1000.0, "C", "Sitabuldi", 101.0),
        ];
        let zones = summarize_zones(&readings);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name, "Sitabuldi");
        assert_eq!(zones[0].co2, 1050);
        assert_eq!(zones[0].aqi, 111);
        assert_eq!(zones[0].sensor_count, 2);
        assert_eq!(zones[0].status, ZoneStatus::Poor);
        assert_eq!(zones[1].name, "MIHAN");
        assert_eq!(zones[1].status, ZoneStatus::Moderate);
    }

    #[test]
    fn test_blank_zone_groups_by_location_and_maps_name() {
        let readings = vec![
            reading(1, 400.0, "Nagpur-SeminaryHills", "", 40.0),
            reading(2, 600.0, "Nagpur-SeminaryHills", " ", 50.0),
        ];
        let zones = summarize_zones(&readings);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "Seminary Hills");
        assert_eq!(zones[0].co2, 500);
        assert_eq!(zones[0].population, "N/A");
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize_zones(&[]).is_empty());
    }

    #[test]
    fn test_zone_weekly_series() {
        let zone = &demo_zones()[1];
        let week = zone_weekly_series(zone);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].co2, 970);
        assert_eq!(week[6].aqi, 83);
    }
}
