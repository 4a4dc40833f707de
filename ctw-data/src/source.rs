//! Demo ⇄ Live data source switching.
//!
//! Every live fetch is issued against a `FetchTicket` carrying the
//! controller's generation at the time. Toggling the source or starting a
//! newer refresh bumps the generation, so a fetch that resolves late cannot
//! overwrite what the user switched to.

use crate::dashboard::DashboardSnapshot;
use chrono::{DateTime, Utc};
use ctw_sensor::openaq::OpenAqClient;
use ctw_sensor::transport::Transport;
use ctw_sensor::SensorReading;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Live mode refetches on this interval.
pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
/// Minimum time the refresh indicator stays up after a manual refresh.
pub const MANUAL_REFRESH_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Demo,
    Live,
}

impl DataSource {
    pub fn from_flag(use_real_time_data: bool) -> Self {
        if use_real_time_data {
            DataSource::Live
        } else {
            DataSource::Demo
        }
    }

    pub fn is_live(&self) -> bool {
        *self == DataSource::Live
    }

    pub fn toggled(&self) -> Self {
        match self {
            DataSource::Demo => DataSource::Live,
            DataSource::Live => DataSource::Demo,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Demo => "Demo Data",
            DataSource::Live => "Live Data",
        }
    }
}

/// Anything that can produce a batch of current readings.
pub trait ReadingSource {
    fn fetch_readings(&self) -> impl Future<Output = Vec<SensorReading>>;
}

impl<T: Transport> ReadingSource for OpenAqClient<T> {
    async fn fetch_readings(&self) -> Vec<SensorReading> {
        self.fetch_latest_for_city().await
    }
}

/// The embedded demo stations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoReadings;

impl ReadingSource for DemoReadings {
    async fn fetch_readings(&self) -> Vec<SensorReading> {
        SensorReading::get_demo_readings()
    }
}

/// Permission to apply the result of one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct DataSourceController {
    source: DataSource,
    generation: u64,
    pending: Option<u64>,
    live_readings: Vec<SensorReading>,
    last_refresh: Option<DateTime<Utc>>,
}

impl Default for DataSourceController {
    fn default() -> Self {
        Self::new(DataSource::Demo)
    }
}

impl DataSourceController {
    /// A controller in `source`. Starting in live mode does not fetch until
    /// `start` is called.
    pub fn new(source: DataSource) -> Self {
        DataSourceController {
            source,
            generation: 0,
            pending: None,
            live_readings: Vec::new(),
            last_refresh: None,
        }
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn is_refreshing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Initial fetch for a controller restored in live mode.
    pub fn start(&mut self) -> Option<FetchTicket> {
        if self.source.is_live() && self.pending.is_none() {
            Some(self.issue())
        } else {
            None
        }
    }

    /// Switch source. Entering live mode returns the ticket for exactly one
    /// fetch cycle; leaving it invalidates any fetch in flight.
    pub fn set_source(&mut self, source: DataSource) -> Option<FetchTicket> {
        if source == self.source {
            return None;
        }
        log::info!("data source: {} -> {}", self.source.label(), source.label());
        self.source = source;
        match source {
            DataSource::Live => Some(self.issue()),
            DataSource::Demo => {
                self.generation += 1;
                self.pending = None;
                None
            }
        }
    }

    pub fn toggle(&mut self) -> Option<FetchTicket> {
        self.set_source(self.source.toggled())
    }

    /// Start a newer live fetch, superseding any in flight. Demo mode has
    /// nothing to refresh.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        if self.source.is_live() {
            Some(self.issue())
        } else {
            None
        }
    }

    /// Apply fetched readings. Returns `false`, leaving state untouched, when
    /// the ticket was superseded.
    pub fn apply(&mut self, ticket: FetchTicket, readings: Vec<SensorReading>, at: DateTime<Utc>) -> bool {
        if !self.source.is_live() || self.pending != Some(ticket.generation) {
            log::debug!(
                "discarding stale fetch result (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        log::info!("applied {} live readings", readings.len());
        self.pending = None;
        self.live_readings = readings;
        self.last_refresh = Some(at);
        true
    }

    /// Readings of the active source.
    pub fn readings(&self) -> Vec<SensorReading> {
        match self.source {
            DataSource::Demo => SensorReading::get_demo_readings(),
            DataSource::Live => self.live_readings.clone(),
        }
    }

    pub fn snapshot<R: Rng + ?Sized>(&self, now: &DateTime<Utc>, rng: &mut R) -> DashboardSnapshot {
        match self.source {
            DataSource::Demo => DashboardSnapshot::demo(),
            DataSource::Live => DashboardSnapshot::from_readings(&self.live_readings, now, rng),
        }
    }
}

/// Run the fetch a ticket permits and apply the result.
pub async fn run_fetch_cycle<S: ReadingSource>(
    controller: &std::cell::RefCell<DataSourceController>,
    source: &S,
    ticket: FetchTicket,
) -> bool {
    let readings = source.fetch_readings().await;
    controller.borrow_mut().apply(ticket, readings, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct CountingSource {
        calls: Cell<usize>,
        readings: Vec<SensorReading>,
    }

    impl CountingSource {
        fn new() -> Self {
            CountingSource {
                calls: Cell::new(0),
                readings: vec![SensorReading::new(
                    42, 21.1, 79.0, 950.0, "Nagpur-MIHAN", "", 88.0, 0.0,
                )],
            }
        }
    }

    impl ReadingSource for CountingSource {
        async fn fetch_readings(&self) -> Vec<SensorReading> {
            self.calls.set(self.calls.get() + 1);
            self.readings.clone()
        }
    }

    #[tokio::test]
    async fn test_toggle_on_fetches_once() {
        let controller = RefCell::new(DataSourceController::default());
        let source = CountingSource::new();

        let ticket = controller.borrow_mut().toggle();
        let ticket = ticket.unwrap();
        assert!(controller.borrow().is_refreshing());
        // already live: no second cycle
        assert!(controller.borrow_mut().set_source(DataSource::Live).is_none());

        assert!(run_fetch_cycle(&controller, &source, ticket).await);
        assert_eq!(source.calls.get(), 1);
        assert!(!controller.borrow().is_refreshing());
        assert_eq!(controller.borrow().readings()[0].id, 42);
        assert!(controller.borrow().last_refresh().is_some());
    }

    #[tokio::test]
    async fn test_stale_result_after_toggle_off_is_rejected() {
        let mut controller = DataSourceController::default();
        let source = CountingSource::new();

        let ticket = controller.toggle().unwrap();
        let pending = source.fetch_readings();
        assert!(controller.toggle().is_none());
        assert!(!controller.is_refreshing());

        let readings = pending.await;
        assert!(!controller.apply(ticket, readings, Utc::now()));
        assert_eq!(controller.source(), DataSource::Demo);
        assert_eq!(controller.readings(), SensorReading::get_demo_readings());
    }

    #[tokio::test]
    async fn test_newer_refresh_supersedes_older() {
        let mut controller = DataSourceController::new(DataSource::Live);
        let source = CountingSource::new();

        let first = controller.start().unwrap();
        assert!(controller.start().is_none());
        let second = controller.refresh().unwrap();
        assert_ne!(first.generation(), second.generation());

        let readings = source.fetch_readings().await;
        assert!(!controller.apply(first, readings.clone(), Utc::now()));
        assert!(controller.is_refreshing());
        assert!(controller.apply(second, readings, Utc::now()));
    }

    #[test]
    fn test_off_on_off_on_issues_fresh_ticket() {
        let mut controller = DataSourceController::default();
        let a = controller.toggle().unwrap();
        controller.toggle();
        let b = controller.toggle().unwrap();
        assert!(b.generation() > a.generation());
        assert!(!controller.apply(a, Vec::new(), Utc::now()));
        assert!(controller.apply(b, Vec::new(), Utc::now()));
    }

    #[test]
    fn test_demo_refresh_is_noop() {
        let mut controller = DataSourceController::default();
        assert!(controller.refresh().is_none());
        assert!(controller.start().is_none());
        assert_eq!(controller.readings().len(), 3);
        assert_eq!(DataSource::from_flag(true), DataSource::Live);
    }

    #[tokio::test]
    async fn test_demo_readings_source() {
        assert_eq!(DemoReadings.fetch_readings().await.len(), 3);
    }

    #[test]
    fn test_live_snapshot_uses_applied_readings() {
        let mut controller = DataSourceController::default();
        let ticket = controller.toggle().unwrap();
        let readings = vec![SensorReading::new(
            1, 21.1, 79.0, 1100.0, "Nagpur-Sitabuldi", "", 110.0, 0.0,
        )];
        assert!(controller.apply(ticket, readings, Utc::now()));
        let snapshot = controller.snapshot(&Utc::now(), &mut crate::seeded_rng(2));
        assert_eq!(snapshot.source, DataSource::Live);
        assert_eq!(snapshot.zones[0].name, "Sitabuldi (Central)");
    }
}
