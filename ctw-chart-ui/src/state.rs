//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! Settings are loaded from the settings store once, when the state is
//! created, and written back on every change.

use crate::js_bridge;
use crate::storage;
use chrono::Utc;
use ctw_data::alerts::Alert;
use ctw_data::dashboard::DashboardSnapshot;
use ctw_data::demo::RangeKey;
use ctw_data::simulation::{InterventionInputs, SimulationRun};
use ctw_data::source::{DataSource, DataSourceController};
use ctw_data::zones::ZoneSummary;
use ctw_sensor::SensorReading;
use ctw_store::{auth, AppConfig, SettingsStore};
use dioxus::prelude::*;
use std::rc::Rc;

/// The entity a detail view is open for.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Zone(ZoneSummary),
    Sensor(SensorReading),
    Alert(Alert),
}

/// Shared application state for all CTW apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Persisted key/value settings
    pub store: Signal<Rc<dyn SettingsStore>>,
    /// Theme and data source toggle, as last saved
    pub config: Signal<AppConfig>,
    /// Demo login flag
    pub authenticated: Signal<bool>,
    /// Demo ⇄ Live state machine and the latest live readings
    pub controller: Signal<DataSourceController>,
    /// Dashboard view of the active source
    pub snapshot: Signal<DashboardSnapshot>,
    /// Analytics range bucket
    pub range: Signal<RangeKey>,
    /// Simulation slider values
    pub sim_inputs: Signal<InterventionInputs>,
    /// Simulation run control
    pub sim_run: Signal<SimulationRun>,
    /// Open detail view, if any
    pub selection: Signal<Option<Selection>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Transient notification text
    pub notice: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState from the persisted settings.
    pub fn new() -> Self {
        let store = storage::settings_store();
        let config = AppConfig::load(store.as_ref()).unwrap_or_else(|e| {
            log::warn!("failed to load settings, using defaults: {}", e);
            AppConfig::default()
        });
        let authenticated = auth::is_authenticated(store.as_ref()).unwrap_or(false);
        let controller = DataSourceController::new(DataSource::from_flag(config.use_real_time_data));
        let snapshot = controller.snapshot(&Utc::now(), &mut rand::thread_rng());
        js_bridge::apply_theme(config.theme);

        Self {
            store: Signal::new(store),
            config: Signal::new(config),
            authenticated: Signal::new(authenticated),
            controller: Signal::new(controller),
            snapshot: Signal::new(snapshot),
            range: Signal::new(RangeKey::Days7),
            sim_inputs: Signal::new(InterventionInputs::default()),
            sim_run: Signal::new(SimulationRun::new()),
            selection: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            notice: Signal::new(None),
        }
    }

    /// Replace the config and persist it.
    pub fn save_config(&mut self, config: AppConfig) {
        self.config.set(config);
        let store = Rc::clone(&self.store.read());
        if let Err(e) = config.save(store.as_ref()) {
            log::error!("failed to save settings: {}", e);
            self.error_msg.set(Some("Settings could not be saved.".to_string()));
        }
    }

    pub fn toggle_theme(&mut self) {
        let mut config = (self.config)();
        config.theme = config.theme.toggled();
        self.save_config(config);
        js_bridge::apply_theme(config.theme);
    }

    /// Recompute the dashboard view from the controller.
    pub fn rebuild_snapshot(&mut self) {
        let snapshot = self
            .controller
            .read()
            .snapshot(&Utc::now(), &mut rand::thread_rng());
        self.snapshot.set(snapshot);
    }

    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let store = Rc::clone(&self.store.read());
        match auth::login(store.as_ref(), email, password) {
            Ok(ok) => {
                self.authenticated.set(ok);
                ok
            }
            Err(e) => {
                log::error!("login failed: {}", e);
                false
            }
        }
    }

    pub fn logout(&mut self) {
        let store = Rc::clone(&self.store.read());
        if let Err(e) = auth::logout(store.as_ref()) {
            log::error!("logout failed: {}", e);
        }
        self.authenticated.set(false);
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection.set(Some(selection));
    }

    pub fn clear_selection(&mut self) {
        self.selection.set(None);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice.set(Some(message.into()));
    }
}
