//! Synthetic series behind the sensor and alert detail views.

use rand::Rng;
use serde::{Deserialize, Serialize};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// CO₂ level the alert impact chart draws as its threshold line.
pub const ALERT_THRESHOLD_PPM: f64 = 1200.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorHourPoint {
    pub time: String,
    pub co2: f64,
    pub aqi: f64,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDayPoint {
    pub day: String,
    pub avg: i64,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactPoint {
    pub time: String,
    pub level: f64,
    pub threshold: f64,
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, span: i64) -> f64 {
    rng.gen_range(0..span) as f64
}

/// 24 hourly points with a daily swing on top of uniform noise.
pub fn sensor_hourly_series<R: Rng + ?Sized>(rng: &mut R) -> Vec<SensorHourPoint> {
    (0..24)
        .map(|i| {
            let h = i as f64;
            SensorHourPoint {
                time: format!("{}:00", i),
                co2: uniform(rng, 300) + 850.0 + (h / 4.0).sin() * 100.0,
                aqi: uniform(rng, 40) + 90.0 + (h / 3.0).cos() * 15.0,
                temp: uniform(rng, 10) + 25.0 + (h / 5.0).sin() * 5.0,
            }
        })
        .collect()
}

pub fn sensor_weekly_series<R: Rng + ?Sized>(rng: &mut R) -> Vec<SensorDayPoint> {
    WEEKDAYS
        .iter()
        .map(|day| SensorDayPoint {
            day: day.to_string(),
            avg: rng.gen_range(0..150) + 900,
            min: rng.gen_range(0..100) + 800,
            max: rng.gen_range(0..200) + 1000,
        })
        .collect()
}

/// 24 hourly CO₂ levels around an alert, against the alert threshold.
pub fn alert_impact_series<R: Rng + ?Sized>(rng: &mut R) -> Vec<ImpactPoint> {
    (0..24)
        .map(|i| ImpactPoint {
            time: format!("{}:00", i),
            level: uniform(rng, 400) + 900.0 + (i as f64 / 4.0).sin() * 200.0,
            threshold: ALERT_THRESHOLD_PPM,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    #[test]
    fn test_sensor_hourly_ranges() {
        let series = sensor_hourly_series(&mut seeded_rng(9));
        assert_eq!(series.len(), 24);
        assert_eq!(series[13].time, "13:00");
        for p in &series {
            assert!(p.co2 >= 750.0 && p.co2 < 1250.0);
            assert!(p.aqi >= 75.0 && p.aqi < 145.0);
            assert!(p.temp >= 20.0 && p.temp < 40.0);
        }
    }

    #[test]
    fn test_sensor_weekly_ranges() {
        let series = sensor_weekly_series(&mut seeded_rng(9));
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].day, "Sun");
        for p in &series {
            assert!((900..1050).contains(&p.avg));
            assert!((800..900).contains(&p.min));
            assert!((1000..1200).contains(&p.max));
        }
    }

    #[test]
    fn test_alert_impact_series() {
        let series = alert_impact_series(&mut seeded_rng(4));
        assert_eq!(series.len(), 24);
        assert!(series.iter().all(|p| p.threshold == 1200.0));
        assert!(series.iter().all(|p| p.level >= 700.0 && p.level < 1500.0));
    }
}
