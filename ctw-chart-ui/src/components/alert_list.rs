//! Alert list. Clicking an alert opens its detail view.

use crate::state::{AppState, Selection};
use ctw_data::alerts::Alert;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct AlertListProps {
    pub alerts: Vec<Alert>,
}

#[component]
pub fn AlertList(props: AlertListProps) -> Element {
    let mut state = use_context::<AppState>();

    rsx! {
        if props.alerts.is_empty() {
            p { style: "color: #666;", "No active alerts." }
        }
        ul {
            style: "list-style: none; padding: 0; margin: 0;",
            for alert in props.alerts.iter().cloned() {
                li {
                    style: "padding: 8px; margin-bottom: 6px; border-left: 4px solid {alert.severity.color()}; cursor: pointer;",
                    onclick: {
                        let alert = alert.clone();
                        move |_| state.select(Selection::Alert(alert.clone()))
                    },
                    div {
                        style: "display: flex; justify-content: space-between; font-size: 12px; color: #666;",
                        span { "{alert.zone}" }
                        span { "{alert.time}" }
                    }
                    div { style: "font-size: 13px;", "{alert.message}" }
                }
            }
        }
    }
}
