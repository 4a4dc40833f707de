//! Demo ⇄ Live switching for the web apps.
//!
//! Fetches run as Dioxus tasks. Each one carries the `FetchTicket` it was
//! started with, and the controller drops its result if the ticket was
//! superseded while the request was in flight.

use crate::state::AppState;
use chrono::Utc;
use ctw_data::source::{
    DataSource, FetchTicket, ReadingSource, AUTO_REFRESH_INTERVAL, MANUAL_REFRESH_DELAY,
};
use ctw_sensor::openaq::{OpenAqClient, OpenAqConfig};
use ctw_sensor::transport::ReqwestTransport;
use dioxus::prelude::*;
use std::time::Duration;
use wasm_bindgen::JsValue;

/// OpenAQ key baked in at build time.
const OPENAQ_API_KEY: Option<&str> = option_env!("OPENAQ_API_KEY");

pub fn openaq_client() -> OpenAqClient<ReqwestTransport> {
    let config = match OPENAQ_API_KEY {
        Some(key) if !key.is_empty() => OpenAqConfig::default().with_api_key(key),
        _ => OpenAqConfig::default(),
    };
    OpenAqClient::with_reqwest(config, reqwest::Client::new())
}

/// Resolve after `duration` using the browser's `setTimeout`.
pub async fn sleep(duration: Duration) {
    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Run the fetch `ticket` permits and apply the result if it is still current.
async fn fetch_and_apply(mut state: AppState, ticket: FetchTicket) -> bool {
    let readings = openaq_client().fetch_readings().await;
    let applied = state.controller.write().apply(ticket, readings, Utc::now());
    if applied {
        state.rebuild_snapshot();
    }
    applied
}

/// Start the initial fetch when the persisted source is live.
pub fn start(mut state: AppState) {
    let ticket = state.controller.write().start();
    if let Some(ticket) = ticket {
        spawn(async move {
            fetch_and_apply(state, ticket).await;
        });
    }
}

/// Switch the data source, persist the toggle and fetch once when entering
/// live mode.
pub fn set_source(mut state: AppState, source: DataSource) {
    let ticket = state.controller.write().set_source(source);
    let mut config = (state.config)();
    config.use_real_time_data = source.is_live();
    state.save_config(config);
    state.rebuild_snapshot();

    if let Some(ticket) = ticket {
        spawn(async move {
            if fetch_and_apply(state, ticket).await {
                let count = state.controller.read().readings().len();
                state.notify(format!("Live data loaded: {} sensors", count));
            }
        });
    }
}

pub fn toggle_source(state: AppState) {
    let next = state.controller.read().source().toggled();
    set_source(state, next);
}

/// Manual refresh. The indicator stays up for at least
/// `MANUAL_REFRESH_DELAY`.
pub fn refresh(mut state: AppState) {
    let ticket = state.controller.write().refresh();
    spawn(async move {
        match ticket {
            Some(ticket) => {
                let (applied, _) =
                    futures::join!(fetch_and_apply(state, ticket), sleep(MANUAL_REFRESH_DELAY));
                if applied {
                    state.notify("Data refreshed");
                }
            }
            None => {
                sleep(MANUAL_REFRESH_DELAY).await;
                state.rebuild_snapshot();
                state.notify("Demo data refreshed");
            }
        }
    });
}

/// Refetch every `AUTO_REFRESH_INTERVAL` while the source is live.
pub fn use_auto_refresh(state: AppState) {
    use_future(move || async move {
        let mut state = state;
        loop {
            sleep(AUTO_REFRESH_INTERVAL).await;
            let ticket = state.controller.write().refresh();
            if let Some(ticket) = ticket {
                log::debug!("auto-refresh (generation {})", ticket.generation());
                fetch_and_apply(state, ticket).await;
            }
        }
    });
}
