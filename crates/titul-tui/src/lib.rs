//! Full-screen TUI client for ЧикенТитул.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use titul_core::config::Config;
use titul_core::session;

/// Runs the interactive TUI.
///
/// Restores any stored session before the first frame; the runtime then
/// fetches the profile immediately.
pub async fn run_app(config: Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "ЧикенТитул requires a terminal.\n\
             Use `titul logout` or `titul config` for non-interactive commands."
        );
    }

    let stored = session::load();

    let mut runtime = TuiRuntime::new(config, stored)?;
    runtime.run()?;

    Ok(())
}
