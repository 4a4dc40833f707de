//! Zone status table. Clicking a row opens the zone detail view.

use crate::state::{AppState, Selection};
use dioxus::prelude::*;

#[component]
pub fn ZoneTable() -> Element {
    let mut state = use_context::<AppState>();
    let zones = state.snapshot.read().zones.clone();

    rsx! {
        if zones.is_empty() {
            p { style: "color: #666;", "No zones reporting." }
        } else {
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 13px;",
                thead {
                    tr {
                        th { style: "text-align: left; padding: 6px;", "Zone" }
                        th { style: "text-align: right; padding: 6px;", "CO₂ (ppm)" }
                        th { style: "text-align: right; padding: 6px;", "AQI" }
                        th { style: "text-align: right; padding: 6px;", "Temp (°C)" }
                        th { style: "text-align: left; padding: 6px;", "Status" }
                        th { style: "text-align: right; padding: 6px;", "Sensors" }
                    }
                }
                tbody {
                    for zone in zones {
                        tr {
                            key: "{zone.name}",
                            style: "cursor: pointer; border-top: 1px solid #e5e7eb;",
                            onclick: {
                                let zone = zone.clone();
                                move |_| state.select(Selection::Zone(zone.clone()))
                            },
                            td { style: "padding: 6px;", "{zone.name}" }
                            td { style: "text-align: right; padding: 6px;", "{zone.co2}" }
                            td { style: "text-align: right; padding: 6px;", "{zone.aqi}" }
                            td { style: "text-align: right; padding: 6px;", "{zone.temp}" }
                            td {
                                style: "padding: 6px; color: {zone.color}; font-weight: bold;",
                                "{zone.status.as_str()}"
                            }
                            td { style: "text-align: right; padding: 6px;", "{zone.sensor_count}" }
                        }
                    }
                }
            }
        }
    }
}
