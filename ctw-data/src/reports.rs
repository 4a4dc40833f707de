//! Report catalogue and the payload of a downloaded report.

use crate::zones::{demo_zones, ZoneStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: u32,
    pub title: String,
    pub period: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub size: String,
    pub highlights: Vec<String>,
}

fn report(id: u32, title: &str, period: &str, kind: &str, size: &str, highlights: [&str; 2]) -> Report {
    Report {
        id,
        title: title.to_string(),
        period: period.to_string(),
        kind: kind.to_string(),
        status: "Ready".to_string(),
        size: size.to_string(),
        highlights: highlights.iter().map(|h| h.to_string()).collect(),
    }
}

pub fn report_catalogue() -> Vec<Report> {
    vec![
        report(
            1,
            "Weekly Emission Report",
            "Oct 27 - Nov 2, 2025",
            "Weekly",
            "2.4 MB",
            ["8.5% reduction", "Sitabuldi hotspot identified"],
        ),
        report(
            2,
            "Monthly Environmental Analysis",
            "October 2025",
            "Monthly",
            "5.8 MB",
            ["AQI improved by 12%", "Seminary Hills best performer"],
        ),
        report(
            3,
            "Zone Performance Comparison",
            "Q4 2025",
            "Quarterly",
            "8.2 MB",
            ["Multi-zone analysis", "Predictive insights"],
        ),
    ]
}

/// Case-insensitive lookup by id or exact title.
pub fn find_report(key: &str) -> Option<Report> {
    let key = key.trim();
    report_catalogue().into_iter().find(|r| {
        key.parse::<u32>().map(|id| id == r.id).unwrap_or(false) || r.title.eq_ignore_ascii_case(key)
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_emissions: String,
    #[serde(rename = "averageAQI")]
    pub average_aqi: String,
    pub active_zones: u32,
    pub sensors_active: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportZone {
    pub name: String,
    pub co2: i64,
    pub aqi: i64,
    pub status: String,
    pub trend: String,
}

/// Body of a downloaded report, minus the export timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub title: String,
    pub period: String,
    pub generated: String,
    pub summary: ReportSummary,
    pub zones: Vec<ReportZone>,
    pub highlights: Vec<String>,
    pub recommendations: Vec<String>,
}

fn status_title(status: ZoneStatus) -> String {
    match status {
        ZoneStatus::Good => "Good",
        ZoneStatus::Moderate => "Moderate",
        ZoneStatus::Poor => "Poor",
    }
    .to_string()
}

impl ReportDocument {
    pub fn new(report: &Report, generated: String) -> Self {
        let zones = demo_zones()
            .into_iter()
            .map(|z| ReportZone {
                name: z
                    .name
                    .split(" (")
                    .next()
                    .unwrap_or(z.name.as_str())
                    .to_string(),
                co2: z.co2,
                aqi: z.aqi,
                status: status_title(z.status),
                trend: format!("{}%", z.trend),
            })
            .collect();
        ReportDocument {
            title: report.title.clone(),
            period: report.period.clone(),
            generated,
            summary: ReportSummary {
                total_emissions: "2,470 ppm".to_string(),
                average_aqi: "142".to_string(),
                active_zones: 3,
                sensors_active: "247/250".to_string(),
            },
            zones,
            highlights: report.highlights.clone(),
            recommendations: vec![
                "Increase green cover in Sitabuldi area".to_string(),
                "Implement traffic management during peak hours".to_string(),
                "Monitor industrial emissions in MIHAN zone".to_string(),
            ],
        }
    }
}
