//! Light/dark switch.

use crate::state::AppState;
use ctw_store::Theme;
use dioxus::prelude::*;

#[component]
pub fn ThemeToggle() -> Element {
    let mut state = use_context::<AppState>();
    let label = match state.config.read().theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };

    rsx! {
        button {
            onclick: move |_| state.toggle_theme(),
            "{label}"
        }
    }
}
