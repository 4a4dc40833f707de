//! Toast for the transient notice in `AppState`.

use crate::live::sleep;
use crate::state::AppState;
use dioxus::prelude::*;
use std::time::Duration;

const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[component]
pub fn Notice() -> Element {
    let mut state = use_context::<AppState>();
    let notice = state.notice.read().clone();

    use_effect(move || {
        if state.notice.read().is_some() {
            spawn(async move {
                sleep(NOTICE_DURATION).await;
                state.notice.set(None);
            });
        }
    });

    rsx! {
        if let Some(message) = notice {
            div {
                style: "position: fixed; bottom: 16px; right: 16px; padding: 10px 16px; border-radius: 6px; background: #111827; color: white; font-size: 13px;",
                "{message}"
            }
        }
    }
}
