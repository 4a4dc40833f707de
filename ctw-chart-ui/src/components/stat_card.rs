//! Headline number card used by the dashboard stats and analytics metrics.

use ctw_data::Trend;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct StatCardProps {
    pub title: String,
    pub value: String,
    pub unit: String,
    pub change: String,
    pub trend: Trend,
    pub color: String,
    #[props(default = String::new())]
    pub description: String,
}

#[component]
pub fn StatCard(props: StatCardProps) -> Element {
    let arrow = match props.trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
    };
    let border = format!(
        "flex: 1; min-width: 180px; padding: 12px 16px; border-radius: 8px; border-left: 4px solid {}; background: var(--ctw-card, #fff); box-shadow: 0 1px 3px rgba(0,0,0,0.1);",
        props.color
    );

    rsx! {
        div {
            style: "{border}",
            div { style: "font-size: 12px; color: #666;", "{props.title}" }
            div {
                style: "font-size: 24px; font-weight: bold; margin: 4px 0;",
                "{props.value} "
                span { style: "font-size: 12px; font-weight: normal;", "{props.unit}" }
            }
            div { style: "font-size: 12px;", "{arrow} {props.change}" }
            if !props.description.is_empty() {
                div { style: "font-size: 11px; color: #888; margin-top: 4px;", "{props.description}" }
            }
        }
    }
}
