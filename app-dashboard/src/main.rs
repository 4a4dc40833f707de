//! Nagpur CO₂ digital twin home dashboard.
//!
//! Data flow:
//! 1. On mount: the persisted settings decide Demo or Live; in live mode the
//!    first OpenAQ fetch starts immediately.
//! 2. While live, readings refresh every 30 seconds and on demand. Results
//!    from superseded fetches are dropped by the source controller.
//! 3. Every applied fetch rebuilds the dashboard snapshot, which drives the
//!    stat cards, the trend chart, the zone table and the alert list.
//! 4. Zones, sensors and alerts open a detail view with a JSON export.

use chrono::Utc;
use ctw_chart_ui::components::{
    AlertList, ChartContainer, ChartHeader, DetailPanel, ErrorDisplay, LoadingSpinner, LoginForm,
    Notice, SourceToggle, StatCard, ThemeToggle, ZoneTable,
};
use ctw_chart_ui::state::{AppState, Selection};
use ctw_chart_ui::{charts, js_bridge, live};
use ctw_data::alerts::{alert_catalogue, CatalogueAlert};
use ctw_data::export::report_export;
use ctw_data::reports::{report_catalogue, Report};
use dioxus::prelude::*;

/// DOM id for the city trend chart.
const TREND_CHART_ID: &str = "city-trend-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("ctw-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Effect 1: start charts and the persisted source once on mount ───
    use_effect(move || {
        js_bridge::init_charts();
        live::start(state);
        state.loading.set(false);
    });

    live::use_auto_refresh(state);

    // ─── Effect 2: re-render the trend whenever the snapshot changes ───
    use_effect(move || {
        if (state.loading)() || !(state.authenticated)() {
            return;
        }
        let trend = state.snapshot.read().trend_data.clone();
        match charts::trend_chart(&trend) {
            Ok(chart) => js_bridge::render_line_chart(TREND_CHART_ID, &chart.data_json, &chart.config_json),
            Err(e) => log::error!("failed to serialize trend chart: {}", e),
        }
    });

    if !(state.authenticated)() {
        return rsx! {
            LoginForm {}
            Notice {}
        };
    }

    let snapshot = state.snapshot.read().clone();
    let critical = snapshot.critical_zone_count();

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            header {
                style: "display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 8px;",
                h1 { style: "margin: 0; font-size: 22px;", "Nagpur CO₂ Digital Twin" }
                div {
                    style: "display: flex; gap: 8px;",
                    ThemeToggle {}
                    button { onclick: move |_| state.logout(), "Sign out" }
                }
            }

            SourceToggle {}

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; gap: 12px; flex-wrap: wrap; margin: 12px 0;",
                    for stat in snapshot.city_stats.iter().cloned() {
                        StatCard {
                            title: stat.title,
                            value: stat.value,
                            unit: stat.unit,
                            change: stat.change,
                            trend: stat.trend,
                            color: stat.color,
                        }
                    }
                }

                ChartHeader {
                    title: "City CO₂ Today".to_string(),
                    subtitle: "Parts per million, averaged across zones".to_string(),
                }
                ChartContainer { id: TREND_CHART_ID.to_string(), min_height: 360 }

                section {
                    style: "margin-top: 16px;",
                    ChartHeader {
                        title: "Zones".to_string(),
                        subtitle: format!("{} in poor condition", critical),
                    }
                    ZoneTable {}
                }

                section {
                    style: "margin-top: 16px;",
                    ChartHeader { title: "Real-time Alerts".to_string() }
                    AlertList { alerts: snapshot.realtime_alerts.clone() }
                }

                SensorSection {}
                AlertCenter {}
                ReportSection {}
            }

            DetailPanel {}
            Notice {}
        }
    }
}

/// Stations of the active source.
#[component]
fn SensorSection() -> Element {
    let mut state = use_context::<AppState>();
    let readings = state.controller.read().readings();

    rsx! {
        section {
            style: "margin-top: 16px;",
            ChartHeader {
                title: "Sensors".to_string(),
                subtitle: format!("{} stations reporting", readings.len()),
            }
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 13px;",
                thead {
                    tr {
                        th { style: "text-align: left; padding: 6px;", "Location" }
                        th { style: "text-align: left; padding: 6px;", "Zone" }
                        th { style: "text-align: right; padding: 6px;", "CO" }
                        th { style: "text-align: right; padding: 6px;", "AQI" }
                    }
                }
                tbody {
                    for reading in readings {
                        tr {
                            key: "{reading.id}",
                            style: "cursor: pointer; border-top: 1px solid #e5e7eb;",
                            onclick: {
                                let reading = reading.clone();
                                move |_| state.select(Selection::Sensor(reading.clone()))
                            },
                            td { style: "padding: 6px;", "{reading.location}" }
                            td { style: "padding: 6px;", "{reading.zone}" }
                            td { style: "text-align: right; padding: 6px;", {format!("{:.2}", reading.value)} }
                            td { style: "text-align: right; padding: 6px;", {format!("{:.1}", reading.aqi)} }
                        }
                    }
                }
            }
        }
    }
}

/// The fixed alert catalogue, grouped by status.
#[component]
fn AlertCenter() -> Element {
    let catalogue = alert_catalogue();

    rsx! {
        section {
            style: "margin-top: 16px;",
            ChartHeader { title: "Alert Center".to_string() }
            div {
                style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 12px;",
                CatalogueColumn { title: "Critical".to_string(), alerts: catalogue.critical }
                CatalogueColumn { title: "Warnings".to_string(), alerts: catalogue.warnings }
                CatalogueColumn { title: "Resolved".to_string(), alerts: catalogue.resolved }
            }
        }
    }
}

#[component]
fn CatalogueColumn(title: String, alerts: Vec<CatalogueAlert>) -> Element {
    let mut state = use_context::<AppState>();

    rsx! {
        div {
            h4 { style: "margin: 4px 0;", "{title} ({alerts.len()})" }
            for entry in alerts {
                div {
                    key: "{entry.id}",
                    style: "padding: 8px; margin-bottom: 6px; border-left: 4px solid {entry.status.color()}; font-size: 13px;",
                    div { strong { "{entry.zone}" } " · {entry.location}" }
                    div { "{entry.message} ({entry.value} ppm)" }
                    if let Some(resolution) = entry.resolution.as_ref() {
                        div { style: "color: #666;", "{resolution}" }
                    }
                    div {
                        style: "display: flex; justify-content: space-between; color: #666; font-size: 12px;",
                        span { "{entry.time}" }
                        button {
                            onclick: {
                                let alert = entry.to_alert();
                                move |_| state.select(Selection::Alert(alert.clone()))
                            },
                            "Details"
                        }
                    }
                }
            }
        }
    }
}

/// Downloadable reports.
#[component]
fn ReportSection() -> Element {
    let reports = report_catalogue();

    rsx! {
        section {
            style: "margin-top: 16px; margin-bottom: 24px;",
            ChartHeader { title: "Reports".to_string() }
            for report in reports {
                ReportRow { key: "{report.id}", report }
            }
        }
    }
}

#[component]
fn ReportRow(report: Report) -> Element {
    let mut state = use_context::<AppState>();

    let on_download = {
        let report = report.clone();
        move |_| match report_export(&report, &Utc::now()) {
            Ok(file) => {
                js_bridge::download_json(&file);
                state.notify(format!("Downloaded {}", file.file_name));
            }
            Err(e) => log::error!("failed to export report {}: {}", report.id, e),
        }
    };

    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: center; padding: 8px 0; border-top: 1px solid #e5e7eb;",
            div {
                div { strong { "{report.title}" } }
                div {
                    style: "font-size: 12px; color: #666;",
                    "{report.kind} · {report.period} · {report.size}"
                }
                ul {
                    style: "margin: 4px 0; padding-left: 18px; font-size: 12px;",
                    for highlight in report.highlights.iter() {
                        li { "{highlight}" }
                    }
                }
            }
            button { onclick: on_download, "Download" }
        }
    }
}
