//! Persisted settings and the demo login.

use crate::{GlobalArgs, SourceArg};
use clap::Subcommand;
use ctw_store::auth::{self, LOGIN_DISPLAY_DELAY};
use ctw_store::{AppConfig, Theme};

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the current settings
    Show,

    /// Set the theme (light or dark)
    Theme { theme: String },

    /// Set the default data source
    Source {
        #[arg(value_enum)]
        source: SourceArg,
    },

    /// Switch between light and dark
    ToggleTheme,

    /// Switch between demo and live data
    ToggleSource,
}

/// Apply a config action and return the resulting config.
pub fn apply_action(config: AppConfig, action: &ConfigAction) -> anyhow::Result<AppConfig> {
    let mut next = config;
    match action {
        ConfigAction::Show => {}
        ConfigAction::Theme { theme } => next.theme = theme.parse::<Theme>()?,
        ConfigAction::Source { source } => next.use_real_time_data = *source == SourceArg::Live,
        ConfigAction::ToggleTheme => next.theme = next.theme.toggled(),
        ConfigAction::ToggleSource => next.use_real_time_data = !next.use_real_time_data,
    }
    Ok(next)
}

fn print_config(config: &AppConfig) {
    println!("theme:           {}", config.theme);
    println!(
        "data source:     {}",
        if config.use_real_time_data { "live" } else { "demo" }
    );
}

pub fn run_config(globals: &GlobalArgs, action: Option<ConfigAction>) -> anyhow::Result<()> {
    let db = globals.open_db()?;
    let config = AppConfig::load(&db)?;
    let action = action.unwrap_or(ConfigAction::Show);
    let next = apply_action(config, &action)?;
    if next != config {
        next.save(&db)?;
        log::info!("saved settings to {}", globals.db.display());
    }
    print_config(&next);
    Ok(())
}

pub async fn run_login(globals: &GlobalArgs, email: &str, password: &str) -> anyhow::Result<()> {
    let db = globals.open_db()?;
    println!("Signing in as {}...", email);
    tokio::time::sleep(LOGIN_DISPLAY_DELAY).await;
    auth::login(&db, email, password)?;
    println!("Signed in (demo mode).");
    Ok(())
}

pub fn run_logout(globals: &GlobalArgs) -> anyhow::Result<()> {
    let db = globals.open_db()?;
    auth::logout(&db)?;
    println!("Signed out.");
    Ok(())
}

pub fn run_status(globals: &GlobalArgs) -> anyhow::Result<()> {
    let db = globals.open_db()?;
    let signed_in = auth::is_authenticated(&db)?;
    println!("database:        {}", globals.db.display());
    println!("signed in:       {}", if signed_in { "yes (demo)" } else { "no" });
    print_config(&AppConfig::load(&db)?);
    let openaq = globals.openaq_config();
    println!("openaq url:      {}", openaq.base_url);
    println!(
        "openaq key:      {}",
        if openaq.api_key.is_some() { "set" } else { "missing" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn globals(db: PathBuf) -> GlobalArgs {
        GlobalArgs {
            db,
            api_key: None,
            api_url: None,
            timeout_secs: 5,
        }
    }

    #[test]
    fn actions_update_config() {
        let config = AppConfig::default();
        let dark = apply_action(config, &ConfigAction::Theme { theme: "dark".into() }).unwrap();
        assert_eq!(dark.theme, Theme::Dark);
        let live = apply_action(dark, &ConfigAction::ToggleSource).unwrap();
        assert!(live.use_real_time_data);
        let demo = apply_action(live, &ConfigAction::Source { source: SourceArg::Demo }).unwrap();
        assert!(!demo.use_real_time_data);
        assert!(apply_action(config, &ConfigAction::Theme { theme: "blue".into() }).is_err());
    }

    #[test]
    fn config_persists_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let g = globals(dir.path().join("ctw.sqlite"));
        run_config(&g, Some(ConfigAction::ToggleTheme)).unwrap();
        run_config(&g, Some(ConfigAction::ToggleSource)).unwrap();
        let config = AppConfig::load(&g.open_db().unwrap()).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert!(config.use_real_time_data);
    }

    #[test]
    fn logout_after_status() {
        let dir = tempfile::tempdir().unwrap();
        let g = globals(dir.path().join("ctw.sqlite"));
        let db = g.open_db().unwrap();
        auth::login(&db, "a@b.c", "x").unwrap();
        run_status(&g).unwrap();
        run_logout(&g).unwrap();
        assert!(!auth::is_authenticated(&db).unwrap());
    }
}
