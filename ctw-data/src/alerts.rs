//! Real-time alerts and the alert catalogue.

use crate::zones::display_name;
use chrono::{DateTime, Utc};
use ctw_sensor::SensorReading;
use ctw_utils::dates::time_of_day;
use serde::{Deserialize, Serialize};

/// AQI above which a live reading raises an alert.
pub const AQI_WARNING_THRESHOLD: f64 = 75.0;
/// AQI above which a live alert is critical.
pub const AQI_CRITICAL_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Success,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Critical => "#ef4444",
            Severity::Warning => "#f59e0b",
            Severity::Success => "#10b981",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub zone: String,
    pub message: String,
    pub severity: Severity,
    pub time: String,
    /// Catalogue status the alert was raised from, if any
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Alert {
    fn fixed(zone: &str, message: &str, severity: Severity, time: &str) -> Self {
        Alert {
            id: None,
            zone: zone.to_string(),
            message: message.to_string(),
            severity,
            time: time.to_string(),
            kind: None,
        }
    }
}

/// Alerts for every reading whose AQI exceeds the warning threshold,
/// stamped with the time of day of `now`.
pub fn live_alerts(readings: &[SensorReading], now: &DateTime<Utc>) -> Vec<Alert> {
    let time = time_of_day(now);
    readings
        .iter()
        .filter(|r| r.aqi > AQI_WARNING_THRESHOLD)
        .map(|r| Alert {
            id: None,
            zone: display_name(r.group_key()).to_string(),
            message: format!("High AQI levels detected: {}", r.aqi),
            severity: if r.aqi > AQI_CRITICAL_THRESHOLD {
                Severity::Critical
            } else {
                Severity::Warning
            },
            time: time.clone(),
            kind: None,
        })
        .collect()
}

pub fn demo_alerts() -> Vec<Alert> {
    vec![
        Alert::fixed(
            "Sitabuldi",
            "High traffic congestion detected",
            Severity::Critical,
            "5 min ago",
        ),
        Alert::fixed(
            "MIHAN",
            "Industrial emissions spike",
            Severity::Warning,
            "12 min ago",
        ),
        Alert::fixed(
            "Seminary Hills",
            "Air quality improving",
            Severity::Success,
            "20 min ago",
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Unresolved,
    Investigating,
    Monitoring,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Unresolved => "unresolved",
            AlertStatus::Investigating => "investigating",
            AlertStatus::Monitoring => "monitoring",
            AlertStatus::Resolved => "resolved",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AlertStatus::Unresolved => "#ef4444",
            AlertStatus::Investigating => "#f59e0b",
            AlertStatus::Monitoring => "#eab308",
            AlertStatus::Resolved => "#10b981",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueAlert {
    pub id: u32,
    pub zone: String,
    pub location: String,
    pub message: String,
    /// CO₂ reading that raised the alert, ppm
    pub value: i64,
    pub time: String,
    pub status: AlertStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

impl CatalogueAlert {
    /// The alert opened from the "take action" control: unresolved entries
    /// are critical, everything else a warning.
    pub fn to_alert(&self) -> Alert {
        Alert {
            id: Some(self.id.to_string()),
            zone: self.zone.clone(),
            message: self.message.clone(),
            severity: if self.status == AlertStatus::Unresolved {
                Severity::Critical
            } else {
                Severity::Warning
            },
            time: self.time.clone(),
            kind: Some(self.status.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCatalogue {
    pub critical: Vec<CatalogueAlert>,
    pub warnings: Vec<CatalogueAlert>,
    pub resolved: Vec<CatalogueAlert>,
}

impl AlertCatalogue {
    pub fn all(&self) -> impl Iterator<Item = &CatalogueAlert> {
        self.critical
            .iter()
            .chain(self.warnings.iter())
            .chain(self.resolved.iter())
    }

    pub fn find(&self, id: u32) -> Option<&CatalogueAlert> {
        self.all().find(|a| a.id == id)
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: u32,
    zone: &str,
    location: &str,
    message: &str,
    value: i64,
    time: &str,
    status: AlertStatus,
    resolution: Option<&str>,
) -> CatalogueAlert {
    CatalogueAlert {
        id,
        zone: zone.to_string(),
        location: location.to_string(),
        message: message.to_string(),
        value,
        time: time.to_string(),
        status,
        resolution: resolution.map(str::to_string),
    }
}

pub fn alert_catalogue() -> AlertCatalogue {
    AlertCatalogue {
        critical: vec![
            entry(
                1,
                "Sitabuldi",
                "Zero Mile",
                "CO₂ levels exceeded 1200 ppm - Immediate action required",
                1200,
                "5 mins ago",
                AlertStatus::Unresolved,
                None,
            ),
            entry(
                2,
                "MIHAN",
                "SEZ Industrial Area",
                "Industrial emissions spike detected - 45% above normal",
                950,
                "12 mins ago",
                AlertStatus::Investigating,
                None,
            ),
        ],
        warnings: vec![
            entry(
                3,
                "Sitabuldi",
                "Residency Road",
                "Traffic congestion causing elevated emissions",
                1080,
                "23 mins ago",
                AlertStatus::Monitoring,
                None,
            ),
            entry(
                4,
                "MIHAN",
                "Airport Terminal",
                "AQI approaching unhealthy levels",
                820,
                "45 mins ago",
                AlertStatus::Monitoring,
                None,
            ),
        ],
        resolved: vec![entry(
            5,
            "Seminary Hills",
            "Laxmi Nagar",
            "Temporary pollution spike resolved",
            380,
            "2 hours ago",
            AlertStatus::Resolved,
            Some("Natural wind dispersal"),
        )],
    }
}
