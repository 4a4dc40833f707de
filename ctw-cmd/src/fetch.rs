//! Live OpenAQ fetch.

use crate::GlobalArgs;
use ctw_sensor::SensorReading;
use log::info;
use std::path::Path;

/// Fetch the latest readings near the city centre and print them.
///
/// Unlike the dashboard, which quietly falls back to an empty list, the
/// command reports why a fetch failed.
pub async fn run_fetch(globals: &GlobalArgs, json: bool, csv_path: Option<&Path>) -> anyhow::Result<()> {
    let client = globals.openaq_client()?;
    info!(
        "Querying OpenAQ at {} for stations near {}",
        client.config().base_url,
        client.config().city
    );
    let readings = client.try_fetch_latest_for_city().await?;
    info!("Fetched {} readings", readings.len());

    if let Some(path) = csv_path {
        write_readings_csv(path, &readings)?;
        info!("Wrote {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&readings)?);
    } else {
        print_readings(&readings);
    }
    Ok(())
}

pub fn print_readings(readings: &[SensorReading]) {
    if readings.is_empty() {
        println!("No stations reported readings.");
        return;
    }
    println!(
        "{:>8}  {:<32} {:<20} {:>9} {:>6} {:>5}",
        "ID", "LOCATION", "ZONE", "CO", "AQI", "TEMP"
    );
    for r in readings {
        println!(
            "{:>8}  {:<32} {:<20} {:>9.2} {:>6.1} {:>5.1}",
            r.id, r.location, r.zone, r.value, r.aqi, r.temp
        );
    }
}

/// Write readings with the same header as the embedded demo fixture, so the
/// file can be parsed back with `SensorReading::parse_reading_csv`.
pub fn write_readings_csv(path: &Path, readings: &[SensorReading]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["ID", "LAT", "LON", "CO2 (PPM)", "LOCATION", "ZONE", "AQI", "TEMP (C)"])?;
    for r in readings {
        wtr.write_record([
            r.id.to_string(),
            r.lat.to_string(),
            r.lon.to_string(),
            r.value.to_string(),
            r.location.clone(),
            r.zone.clone(),
            r.aqi.to_string(),
            r.temp.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_output_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.csv");
        let readings = SensorReading::get_demo_readings();
        write_readings_csv(&path, &readings).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed = SensorReading::parse_reading_csv(&text).unwrap();
        assert_eq!(parsed, readings);
    }
}
