//! Demo ⇄ Live switch with a manual refresh button.

use crate::live;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn SourceToggle() -> Element {
    let state = use_context::<AppState>();
    let controller = state.controller.read().clone();
    let source = controller.source();
    let refreshing = controller.is_refreshing();
    let last_refresh = controller
        .last_refresh()
        .map(|at| ctw_utils::dates::time_of_day(&at));

    let badge = if source.is_live() { "#10b981" } else { "#6b7280" };
    let badge_style = format!(
        "padding: 2px 8px; border-radius: 10px; color: white; font-size: 12px; background: {};",
        badge
    );

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: center; margin: 8px 0;",
            span { style: "{badge_style}", "{source.label()}" }
            label {
                style: "display: flex; gap: 6px; align-items: center; cursor: pointer;",
                input {
                    r#type: "checkbox",
                    checked: source.is_live(),
                    onchange: move |_| live::toggle_source(state),
                }
                "Real-time data"
            }
            button {
                disabled: refreshing,
                onclick: move |_| live::refresh(state),
                if refreshing { "Refreshing..." } else { "Refresh" }
            }
            if let Some(at) = last_refresh {
                span {
                    style: "font-size: 12px; color: #666;",
                    "Last updated {at}"
                }
            }
        }
    }
}
