//! Reusable Dioxus RSX components for CTW apps.

mod alert_list;
mod chart_container;
mod chart_header;
mod detail_panel;
mod error_display;
mod loading_spinner;
mod login_form;
mod notice;
mod range_selector;
mod source_toggle;
mod stat_card;
mod theme_toggle;
mod zone_table;

pub use alert_list::AlertList;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use detail_panel::DetailPanel;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use login_form::LoginForm;
pub use notice::Notice;
pub use range_selector::RangeSelector;
pub use source_toggle::SourceToggle;
pub use stat_card::StatCard;
pub use theme_toggle::ThemeToggle;
pub use zone_table::ZoneTable;
