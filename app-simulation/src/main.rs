//! Nagpur CO₂ intervention simulator.
//!
//! The sliders recompute the impact estimate synchronously. "Run" paces the
//! result for a few seconds before showing the breakdown, projection, cost
//! and co-benefit panels; the estimate itself is never delayed.

use chrono::Utc;
use ctw_chart_ui::charts::{self, ChartPayload};
use ctw_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, Notice, ThemeToggle,
};
use ctw_chart_ui::js_bridge;
use ctw_chart_ui::live::sleep;
use ctw_chart_ui::state::AppState;
use ctw_data::simulation::{
    co_benefits, compute_impact, cost_breakdown, intervention_breakdown, projection,
    recommended_traffic_measures, InputBounds, InterventionInputs, RunState, RUN_DISPLAY_DELAY,
    SCRUBBER_BOUNDS, TRAFFIC_BOUNDS, TREE_BOUNDS,
};
use ctw_data::export::simulation_export;
use dioxus::prelude::*;

const BREAKDOWN_CHART_ID: &str = "simulation-breakdown-chart";
const PROJECTION_CHART_ID: &str = "simulation-projection-chart";
const COST_CHART_ID: &str = "simulation-cost-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("ctw-simulation-root"))
        .launch(App);
}

fn result_charts(inputs: &InterventionInputs) -> serde_json::Result<[ChartPayload; 3]> {
    let result = compute_impact(inputs);
    Ok([
        charts::breakdown_chart(&intervention_breakdown(inputs))?,
        charts::projection_chart(&projection(&result))?,
        charts::cost_chart(&cost_breakdown(inputs, &result))?,
    ])
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Effect 1: load chart scripts once ───
    use_effect(move || {
        js_bridge::init_charts();
        state.loading.set(false);
    });

    // ─── Effect 2: draw the result charts when a run completes ───
    use_effect(move || {
        let Some((inputs, _)) = state.sim_run.read().completed() else {
            return;
        };
        match result_charts(&inputs) {
            Ok([breakdown, projection, cost]) => {
                js_bridge::render_bar_chart(BREAKDOWN_CHART_ID, &breakdown.data_json, &breakdown.config_json);
                js_bridge::render_line_chart(PROJECTION_CHART_ID, &projection.data_json, &projection.config_json);
                js_bridge::render_bar_chart(COST_CHART_ID, &cost.data_json, &cost.config_json);
            }
            Err(e) => log::error!("failed to serialize simulation charts: {}", e),
        }
    });

    let inputs = (state.sim_inputs)();
    let estimate = compute_impact(&inputs);
    let run_state = state.sim_run.read().state();
    let active = state
        .sim_run
        .read()
        .active_interventions()
        .iter()
        .map(|i| i.label())
        .collect::<Vec<_>>()
        .join(", ");

    let on_run = move |_| {
        let inputs = (state.sim_inputs)();
        let started = state.sim_run.write().start(inputs);
        match started {
            Ok(ticket) => {
                log::info!("running simulation: {}% impact", ticket.result().impact_pct);
                spawn(async move {
                    sleep(RUN_DISPLAY_DELAY).await;
                    let finished = state.sim_run.write().finish(ticket);
                    if let Err(e) = finished {
                        log::debug!("run {} superseded: {}", ticket.generation(), e);
                    }
                });
            }
            Err(e) => state.error_msg.set(Some(e.to_string())),
        }
    };

    let on_reset = move |_| {
        for id in [BREAKDOWN_CHART_ID, PROJECTION_CHART_ID, COST_CHART_ID] {
            js_bridge::destroy_chart(id);
        }
        state.sim_run.write().reset();
        state.sim_inputs.set(InterventionInputs::default());
        state.error_msg.set(None);
    };

    let on_export = move |_| {
        let Some((inputs, result)) = state.sim_run.read().completed() else {
            return;
        };
        match simulation_export(&inputs, &result, &projection(&result), &Utc::now()) {
            Ok(file) => {
                js_bridge::download_json(&file);
                state.notify(format!("Downloaded {}", file.file_name));
            }
            Err(e) => log::error!("failed to export simulation: {}", e),
        }
    };

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            header {
                style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { style: "margin: 0; font-size: 22px;", "Intervention Simulator" }
                ThemeToggle {}
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            } else {
                section {
                    style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 16px; margin: 12px 0;",
                    InterventionSlider {
                        label: "Trees planted".to_string(),
                        unit: "trees".to_string(),
                        bounds: TREE_BOUNDS,
                        value: inputs.tree_count,
                        on_change: move |v: i64| {
                            let current = (state.sim_inputs)();
                            state.sim_inputs.set(InterventionInputs::new(
                                v,
                                current.traffic_reduction_pct as i64,
                                current.scrubber_count as i64,
                            ));
                        },
                    }
                    InterventionSlider {
                        label: "Traffic reduction".to_string(),
                        unit: "%".to_string(),
                        bounds: TRAFFIC_BOUNDS,
                        value: inputs.traffic_reduction_pct,
                        on_change: move |v: i64| {
                            let current = (state.sim_inputs)();
                            state.sim_inputs.set(InterventionInputs::new(
                                current.tree_count as i64,
                                v,
                                current.scrubber_count as i64,
                            ));
                        },
                    }
                    InterventionSlider {
                        label: "CO₂ scrubbers".to_string(),
                        unit: "units".to_string(),
                        bounds: SCRUBBER_BOUNDS,
                        value: inputs.scrubber_count,
                        on_change: move |v: i64| {
                            let current = (state.sim_inputs)();
                            state.sim_inputs.set(InterventionInputs::new(
                                current.tree_count as i64,
                                current.traffic_reduction_pct as i64,
                                v,
                            ));
                        },
                    }
                }

                section {
                    style: "display: flex; gap: 24px; align-items: center; flex-wrap: wrap; padding: 12px; border-radius: 8px; background: var(--ctw-card, #f9fafb);",
                    Estimate { label: "CO₂ reduction", value: format!("{}%", estimate.impact_pct) }
                    Estimate { label: "Cost", value: format!("₹{} L", estimate.cost_lakh) }
                    Estimate { label: "Timeline", value: format!("{} months", estimate.timeline_months) }
                    Estimate { label: "ROI", value: format!("{:.1}", estimate.roi) }
                    div {
                        style: "display: flex; gap: 8px; margin-left: auto;",
                        button {
                            disabled: estimate.impact_pct == 0 || run_state == RunState::Running,
                            onclick: on_run,
                            if run_state == RunState::Running { "Running..." } else { "Run Simulation" }
                        }
                        button { onclick: on_reset, "Reset" }
                        button {
                            disabled: run_state != RunState::Complete,
                            onclick: on_export,
                            "Export JSON"
                        }
                    }
                }

                if run_state == RunState::Running {
                    p {
                        style: "color: #666;",
                        "Simulating: {active}"
                    }
                }

                if run_state == RunState::Complete {
                    ResultPanels {}
                }
            }

            Notice {}
        }
    }
}

#[component]
fn Estimate(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            div { style: "font-size: 12px; color: #666;", "{label}" }
            div { style: "font-size: 20px; font-weight: bold;", "{value}" }
        }
    }
}

#[component]
fn InterventionSlider(
    label: String,
    unit: String,
    bounds: InputBounds,
    value: u32,
    on_change: EventHandler<i64>,
) -> Element {
    rsx! {
        div {
            label {
                style: "display: flex; justify-content: space-between; font-weight: bold;",
                span { "{label}" }
                span { "{value} {unit}" }
            }
            input {
                r#type: "range",
                style: "width: 100%;",
                min: "{bounds.min}",
                max: "{bounds.max}",
                step: "{bounds.step}",
                value: "{value}",
                oninput: move |evt: Event<FormData>| {
                    if let Ok(v) = evt.value().parse::<i64>() {
                        on_change.call(v);
                    }
                },
            }
        }
    }
}

/// Breakdown, projection, cost and co-benefits of the completed run.
#[component]
fn ResultPanels() -> Element {
    let state = use_context::<AppState>();
    let Some((inputs, result)) = state.sim_run.read().completed() else {
        return rsx! {};
    };
    let benefits = co_benefits(&result);
    let measures = recommended_traffic_measures(inputs.traffic_reduction_pct);
    let heat = format!("{:.1}", benefits.heat_reduction);

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(460px, 1fr)); gap: 16px; margin-top: 16px;",
            div {
                ChartHeader { title: "Impact by Intervention".to_string(), subtitle: "Percent CO₂ reduction".to_string() }
                ChartContainer { id: BREAKDOWN_CHART_ID.to_string(), min_height: 320 }
            }
            div {
                ChartHeader {
                    title: "6-Month Projection".to_string(),
                    subtitle: "Dashed line is the projected level; red line is the 900 ppm target".to_string(),
                }
                ChartContainer { id: PROJECTION_CHART_ID.to_string() }
            }
            div {
                ChartHeader { title: "Cost Breakdown".to_string(), subtitle: "₹ Lakh".to_string() }
                ChartContainer { id: COST_CHART_ID.to_string(), min_height: 320 }
            }
            div {
                ChartHeader { title: "Co-benefits".to_string() }
                ul {
                    li { "AQI improvement: {benefits.aqi_reduction} points" }
                    li { "Urban heat reduction: {heat} °C" }
                    li { "Jobs created: {benefits.jobs_created}" }
                }
                if !measures.is_empty() {
                    ChartHeader { title: "Traffic measures".to_string() }
                    ul {
                        for measure in measures {
                            li { "{measure}" }
                        }
                    }
                }
            }
        }
    }
}
