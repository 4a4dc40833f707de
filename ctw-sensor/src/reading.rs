use crate::error::{Result, SensorError};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded CSV data for the three demo monitoring stations.
pub static DEMO_SENSORS_CSV: &str = include_str!("../../fixtures/demo_sensors.csv");

/// A single reading from one monitoring station.
///
/// Readings are rebuilt on every fetch or demo generation cycle and are
/// never persisted; only `id` is stable across refreshes, and only when the
/// reading came from the remote API.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: u64,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// CO₂ concentration in parts per million
    pub value: f64,
    /// Station name
    pub location: String,
    /// Administrative area the station belongs to
    pub zone: String,
    pub aqi: f64,
    /// Degrees Celsius
    pub temp: f64,
}

/// Replace NaN and infinities with zero so readings always carry finite numbers.
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

impl SensorReading {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        lat: f64,
        lon: f64,
        value: f64,
        location: impl Into<String>,
        zone: impl Into<String>,
        aqi: f64,
        temp: f64,
    ) -> Self {
        SensorReading {
            id,
            lat: finite_or_zero(lat),
            lon: finite_or_zero(lon),
            value: finite_or_zero(value),
            location: location.into(),
            zone: zone.into(),
            aqi: finite_or_zero(aqi),
            temp: finite_or_zero(temp),
        }
    }

    /// The label readings are grouped under: the zone, or the station name
    /// when the zone is blank.
    pub fn group_key(&self) -> &str {
        if self.zone.trim().is_empty() {
            self.location.as_str()
        } else {
            self.zone.as_str()
        }
    }

    /// Get the demo station readings from the embedded fixture.
    pub fn get_demo_readings() -> Vec<SensorReading> {
        match SensorReading::parse_reading_csv(DEMO_SENSORS_CSV) {
            Ok(r) => r,
            Err(e) => {
                log::error!("embedded demo sensor fixture failed to parse: {}", e);
                Vec::new()
            }
        }
    }

    fn parse_number(ess: &str) -> f64 {
        match ess.trim().to_lowercase().as_str() {
            "" | "null" | "n/a" | "na" => 0.0,
            s => s.parse::<f64>().unwrap_or_default(),
        }
    }

    /// Parse a CSV string of station readings.
    ///
    /// Expected CSV columns (with headers): id, lat, lon, co2, location, zone, aqi, temp
    pub fn parse_reading_csv(csv_object: &str) -> Result<Vec<SensorReading>> {
        let mut readings = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let rho = row?;
            let id = rho
                .get(0)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .ok_or_else(|| SensorError::InvalidFormat(format!("bad station id in {:?}", rho)))?;
            let location = rho.get(4).unwrap_or("").trim();
            let zone = rho.get(5).unwrap_or("").trim();
            readings.push(SensorReading::new(
                id,
                Self::parse_number(rho.get(1).unwrap_or("")),
                Self::parse_number(rho.get(2).unwrap_or("")),
                Self::parse_number(rho.get(3).unwrap_or("")),
                location,
                zone,
                Self::parse_number(rho.get(6).unwrap_or("")),
                Self::parse_number(rho.get(7).unwrap_or("")),
            ));
        }
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::SensorReading;

    #[test]
    fn test_demo_readings() {
        let readings = SensorReading::get_demo_readings();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].id, 1);
        assert_eq!(readings[0].zone, "Sitabuldi");
        assert_eq!(readings[0].value, 1143.0);
        assert_eq!(readings[2].location, "Seminary Hills Park");
        assert_eq!(readings[2].aqi, 45.0);
    }

    #[test]
    fn test_parse_missing_values_as_zero() {
        let csv_data = "\
ID,LAT,LON,CO2 (PPM),LOCATION,ZONE,AQI,TEMP (C)
7,21.1,79.0,n/a,Test Station,,null,
";
        let readings = SensorReading::parse_reading_csv(csv_data).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].value, 0.0);
        assert_eq!(readings[0].aqi, 0.0);
        assert_eq!(readings[0].temp, 0.0);
        assert_eq!(readings[0].group_key(), "Test Station");
    }

    #[test]
    fn test_parse_rejects_bad_id() {
        let csv_data = "ID,LAT,LON,CO2,LOCATION,ZONE,AQI,TEMP\nabc,0,0,0,x,y,0,0\n";
        assert!(SensorReading::parse_reading_csv(csv_data).is_err());
    }

    #[test]
    fn test_non_finite_values_become_zero() {
        let r = SensorReading::new(1, f64::NAN, 0.0, f64::INFINITY, "a", "b", -f64::INFINITY, 20.0);
        assert_eq!(r.lat, 0.0);
        assert_eq!(r.value, 0.0);
        assert_eq!(r.aqi, 0.0);
        assert_eq!(r.temp, 20.0);
    }
}
