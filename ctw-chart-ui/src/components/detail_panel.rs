//! Detail view for the selected zone, sensor or alert, with JSON export.

use crate::charts::{self, ChartPayload};
use crate::components::ChartContainer;
use crate::js_bridge;
use crate::state::{AppState, Selection};
use chrono::Utc;
use ctw_data::detail::{alert_impact_series, sensor_hourly_series, sensor_weekly_series};
use ctw_data::export::{alert_export, sensor_export, zone_export, ExportFile};
use ctw_data::zones::zone_weekly_series;
use dioxus::prelude::*;

const DETAIL_CHART_IDS: [&str; 2] = ["detail-chart-0", "detail-chart-1"];

type Renderer = fn(&str, &str, &str);

/// Charts and export file for a selection. Synthetic series are drawn once
/// per selection so the export matches what is on screen.
fn prepare(selection: &Selection) -> serde_json::Result<(Vec<(Renderer, ChartPayload)>, ExportFile)> {
    let now = Utc::now();
    let mut rng = rand::thread_rng();
    let line: Renderer = js_bridge::render_line_chart;
    let bar: Renderer = js_bridge::render_bar_chart;

    match selection {
        Selection::Zone(zone) => {
            let week = zone_weekly_series(zone);
            Ok((
                vec![(line, charts::zone_week_chart(&zone.name, &week)?)],
                zone_export(zone, &week, &now)?,
            ))
        }
        Selection::Sensor(sensor) => {
            let hourly = sensor_hourly_series(&mut rng);
            let weekly = sensor_weekly_series(&mut rng);
            Ok((
                vec![
                    (line, charts::sensor_hourly_chart(&hourly)?),
                    (bar, charts::sensor_weekly_chart(&weekly)?),
                ],
                sensor_export(sensor, &hourly, &weekly, &now)?,
            ))
        }
        Selection::Alert(alert) => {
            let impact = alert_impact_series(&mut rng);
            Ok((
                vec![(line, charts::alert_impact_chart(&impact)?)],
                alert_export(alert, &impact, &now)?,
            ))
        }
    }
}

#[component]
pub fn DetailPanel() -> Element {
    let mut state = use_context::<AppState>();
    let mut export: Signal<Option<ExportFile>> = use_signal(|| None);
    let mut chart_count = use_signal(|| 0usize);
    let selection = state.selection.read().clone();

    use_effect(move || {
        let Some(selection) = state.selection.read().clone() else {
            export.set(None);
            return;
        };
        match prepare(&selection) {
            Ok((charts, file)) => {
                chart_count.set(charts.len());
                for (id, (render, chart)) in DETAIL_CHART_IDS.iter().zip(charts.iter()) {
                    render(id, &chart.data_json, &chart.config_json);
                }
                export.set(Some(file));
            }
            Err(e) => {
                log::error!("failed to prepare detail view: {}", e);
                state.error_msg.set(Some("Could not build the detail view.".to_string()));
            }
        }
    });

    let Some(selection) = selection else {
        return rsx! {};
    };

    let (title, rows): (String, Vec<(&str, String)>) = match &selection {
        Selection::Zone(zone) => (
            zone.name.clone(),
            vec![
                ("CO₂", format!("{} ppm", zone.co2)),
                ("AQI", zone.aqi.to_string()),
                ("Temperature", format!("{} °C", zone.temp)),
                ("Population", zone.population.clone()),
                ("Status", zone.status.as_str().to_string()),
                ("Sensors", zone.sensor_count.to_string()),
            ],
        ),
        Selection::Sensor(sensor) => (
            sensor.location.clone(),
            vec![
                ("Zone", sensor.zone.clone()),
                ("Coordinates", format!("{:.4}, {:.4}", sensor.lat, sensor.lon)),
                ("CO", format!("{:.2}", sensor.value)),
                ("AQI", format!("{:.1}", sensor.aqi)),
                ("Temperature", format!("{:.1} °C", sensor.temp)),
            ],
        ),
        Selection::Alert(alert) => (
            format!("Alert: {}", alert.zone),
            vec![
                ("Message", alert.message.clone()),
                ("Severity", alert.severity.as_str().to_string()),
                ("Time", alert.time.clone()),
            ],
        ),
    };

    let on_export = move |_| {
        if let Some(file) = export.read().as_ref() {
            js_bridge::download_json(file);
            log::info!("exported {}", file.file_name);
        }
    };

    let on_close = move |_| {
        for id in DETAIL_CHART_IDS {
            js_bridge::destroy_chart(id);
        }
        state.clear_selection();
    };

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 10;",
            div {
                style: "width: min(760px, 95vw); max-height: 90vh; overflow-y: auto; padding: 20px; border-radius: 8px; background: var(--ctw-card, #fff);",
                div {
                    style: "display: flex; justify-content: space-between; align-items: center;",
                    h2 { style: "margin: 0;", "{title}" }
                    div {
                        style: "display: flex; gap: 8px;",
                        button { disabled: export.read().is_none(), onclick: on_export, "Export JSON" }
                        button { onclick: on_close, "Close" }
                    }
                }
                dl {
                    style: "display: grid; grid-template-columns: max-content 1fr; gap: 4px 12px; font-size: 13px;",
                    for (label, value) in rows {
                        dt { style: "color: #666;", "{label}" }
                        dd { style: "margin: 0;", "{value}" }
                    }
                }
                for id in DETAIL_CHART_IDS.iter().take(chart_count()) {
                    ChartContainer { id: id.to_string(), min_height: 320 }
                }
            }
        }
    }
}
