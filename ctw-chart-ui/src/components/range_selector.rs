//! Time range selector for the analytics views.

use crate::state::AppState;
use ctw_data::demo::RangeKey;
use dioxus::prelude::*;

/// Dropdown over the four range buckets.
#[component]
pub fn RangeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.range)();

    let on_change = move |evt: Event<FormData>| {
        state.range.set(RangeKey::parse(&evt.value()));
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                r#for: "range-select",
                style: "font-weight: bold;",
                "Time range: "
            }
            select {
                id: "range-select",
                onchange: on_change,
                for range in RangeKey::ALL {
                    option {
                        value: "{range.as_str()}",
                        selected: range == current,
                        "{range.label()}"
                    }
                }
            }
        }
    }
}
