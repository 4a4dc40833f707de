//! Demo analytics dataset.

use ctw_data::demo::{generate_demo_data, generate_demo_data_with, DemoDataset, RangeKey};
use ctw_data::seeded_rng;
use log::info;

pub fn build_dataset(range: &str, seed: Option<u64>) -> DemoDataset {
    let key = RangeKey::parse(range);
    if key.as_str() != range.trim() {
        info!("unknown range '{}', using {}", range, key);
    }
    match seed {
        Some(seed) => generate_demo_data_with(key, &mut seeded_rng(seed)),
        None => generate_demo_data(key.as_str()),
    }
}

pub fn run_demo(range: &str, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let dataset = build_dataset(range, seed);
    if json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    println!("{} ({} points)", dataset.range.label(), dataset.week_data.len());
    println!();
    for card in &dataset.metric_cards {
        println!(
            "{:<24} {:>8} {:<6} {:>18}  {}",
            card.title, card.value, card.unit, card.change, card.description
        );
    }
    println!();
    println!(
        "{:<6} {:>9} {:>6} {:>9} {:>5} {:>5}",
        "DAY", "SITABULDI", "MIHAN", "SEMINARY", "TEMP", "AQI"
    );
    for p in &dataset.week_data {
        println!(
            "{:<6} {:>9} {:>6} {:>9} {:>5} {:>5}",
            p.day, p.sitabuldi, p.mihan, p.seminary, p.temp, p.aqi
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dataset_is_reproducible() {
        assert_eq!(build_dataset("90days", Some(8)), build_dataset("90days", Some(8)));
    }

    #[test]
    fn unknown_range_uses_week() {
        assert_eq!(build_dataset("year", None).range, RangeKey::Days7);
    }
}
