//! Shared Dioxus state, components and D3.js bridge for the city CO2 twin apps.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for D3.js chart functions and file downloads via `js_sys::eval()`
//! - `charts`: conversion of domain series into the JSON the chart scripts consume
//! - `state`: Reactive AppState with Dioxus Signals
//! - `storage`: `localStorage`-backed settings store
//! - `live`: Demo ⇄ Live switching, refresh pacing and auto-refresh
//! - `components`: Reusable RSX components (cards, tables, selectors, detail panel, etc.)

pub mod charts;
pub mod components;
pub mod js_bridge;
pub mod live;
pub mod state;
pub mod storage;
