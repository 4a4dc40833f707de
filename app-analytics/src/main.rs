//! Nagpur CO₂ emission analytics.
//!
//! On every range change the demo dataset is regenerated (the 24 hour, 30
//! and 90 day buckets are re-jittered each time, the 7 day bucket is fixed)
//! and all six charts re-render from it.

use chrono::Utc;
use ctw_chart_ui::charts::{self, ChartPayload};
use ctw_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, Notice, RangeSelector, StatCard,
    ThemeToggle,
};
use ctw_chart_ui::js_bridge;
use ctw_chart_ui::state::AppState;
use ctw_data::demo::{generate_demo_data_with, DemoDataset};
use ctw_data::export::analytics_export;
use dioxus::prelude::*;

const WEEK_CHART_ID: &str = "analytics-week-chart";
const PREDICTION_CHART_ID: &str = "analytics-prediction-chart";
const SOURCES_CHART_ID: &str = "analytics-sources-chart";
const ZONES_CHART_ID: &str = "analytics-zones-chart";
const HOURLY_CHART_ID: &str = "analytics-hourly-chart";
const RADAR_CHART_ID: &str = "analytics-radar-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("ctw-analytics-root"))
        .launch(App);
}

/// Container id, line or bar, and payload for each chart of a dataset.
fn dataset_charts(dataset: &DemoDataset) -> serde_json::Result<Vec<(&'static str, bool, ChartPayload)>> {
    Ok(vec![
        (WEEK_CHART_ID, true, charts::week_chart(dataset.range, &dataset.week_data)?),
        (PREDICTION_CHART_ID, true, charts::prediction_chart(&dataset.prediction_data)?),
        (SOURCES_CHART_ID, false, charts::emission_source_chart(&dataset.emission_sources)?),
        (ZONES_CHART_ID, false, charts::zone_comparison_chart(&dataset.zone_comparison)?),
        (HOURLY_CHART_ID, true, charts::hourly_chart(&dataset.hourly_pattern)?),
        (RADAR_CHART_ID, false, charts::radar_chart(&dataset.radar_data)?),
    ])
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let mut dataset: Signal<Option<DemoDataset>> = use_signal(|| None);

    // ─── Effect 1: load chart scripts once ───
    use_effect(move || {
        js_bridge::init_charts();
        state.loading.set(false);
    });

    // ─── Effect 2: regenerate the dataset when the range changes ───
    use_effect(move || {
        let range = (state.range)();
        let generated = generate_demo_data_with(range, &mut rand::thread_rng());
        log::info!(
            "generated {} points for {}",
            generated.week_data.len(),
            range.as_str()
        );
        dataset.set(Some(generated));
    });

    // ─── Effect 3: render the charts once the dataset is in place ───
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let Some(data) = dataset.read().clone() else {
            return;
        };
        match dataset_charts(&data) {
            Ok(all) => {
                state.error_msg.set(None);
                for (id, is_line, chart) in all {
                    if is_line {
                        js_bridge::render_line_chart(id, &chart.data_json, &chart.config_json);
                    } else {
                        js_bridge::render_bar_chart(id, &chart.data_json, &chart.config_json);
                    }
                }
            }
            Err(e) => {
                log::error!("failed to serialize analytics charts: {}", e);
                state.error_msg.set(Some("Charts could not be drawn.".to_string()));
            }
        }
    });

    let on_export = move |_| {
        let Some(data) = dataset.read().clone() else {
            return;
        };
        match analytics_export(&data, &Utc::now()) {
            Ok(file) => {
                js_bridge::download_json(&file);
                state.notify(format!("Downloaded {}", file.file_name));
            }
            Err(e) => log::error!("failed to export analytics: {}", e),
        }
    };

    let current = dataset.read().clone();
    let exportable = current.is_some();
    let ready = current.filter(|_| !*state.loading.read());

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            header {
                style: "display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 8px;",
                h1 { style: "margin: 0; font-size: 22px;", "Emission Analytics" }
                div {
                    style: "display: flex; gap: 8px; align-items: center;",
                    RangeSelector {}
                    button { disabled: !exportable, onclick: on_export, "Export JSON" }
                    ThemeToggle {}
                }
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if let Some(data) = ready {
                div {
                    style: "display: flex; gap: 12px; flex-wrap: wrap; margin: 12px 0;",
                    for card in data.metric_cards.iter().cloned() {
                        StatCard {
                            title: card.title,
                            value: card.value,
                            unit: card.unit,
                            change: card.change,
                            trend: card.trend,
                            color: card.color,
                            description: card.description,
                        }
                    }
                }

                ChartHeader {
                    title: format!("Zone CO₂ Trends ({})", data.range.label()),
                    subtitle: "Sitabuldi, MIHAN and Seminary Hills, ppm".to_string(),
                }
                ChartContainer { id: WEEK_CHART_ID.to_string() }

                div {
                    style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(460px, 1fr)); gap: 16px; margin-top: 16px;",
                    div {
                        ChartHeader {
                            title: "AI Prediction".to_string(),
                            subtitle: "Next 24 hours; confidence falls with the horizon".to_string(),
                        }
                        ChartContainer { id: PREDICTION_CHART_ID.to_string() }
                    }
                    div {
                        ChartHeader { title: "Emission Sources".to_string(), subtitle: "Share of total, %".to_string() }
                        ChartContainer { id: SOURCES_CHART_ID.to_string(), min_height: 320 }
                    }
                    div {
                        ChartHeader { title: "Zone Comparison".to_string(), subtitle: "Current, last week and target".to_string() }
                        ChartContainer { id: ZONES_CHART_ID.to_string(), min_height: 320 }
                    }
                    div {
                        ChartHeader { title: "Hourly Pattern".to_string(), subtitle: "Traffic and industrial activity".to_string() }
                        ChartContainer { id: HOURLY_CHART_ID.to_string() }
                    }
                    div {
                        ChartHeader { title: "Performance vs Target".to_string() }
                        ChartContainer { id: RADAR_CHART_ID.to_string(), min_height: 320 }
                    }
                }
            } else {
                LoadingSpinner {}
            }

            Notice {}
        }
    }
}
