//! # growboxd — growbox daemon
//!
//! Composition root that wires all adapters together and runs the cycle
//! loop.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize tracing
//! - Construct adapter implementations (program store, chamber hardware)
//! - Construct the cycle driver, injecting adapters via port traits
//! - Tick the evaluation cycle at the configured period
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.
//!
//! The chamber hardware wired here is the virtual adapter: the real panel,
//! fan, and meter bindings are chip-specific and live outside this
//! workspace, implementing the same ports.

mod config;

use std::time::Duration;

use growbox_adapter_storage_json::JsonProgramStore;
use growbox_adapter_virtual::{VirtualFan, VirtualLightPanel, VirtualSensorHub};
use growbox_app::cycle::CycleDriver;
use growbox_app::ports::SystemClock;
use growbox_app::power::PowerController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Adapters
    let store = JsonProgramStore::new(&config.program.path);
    let panel = VirtualLightPanel::new(config.chamber.watts_per_unit);
    let fan = VirtualFan::default();
    let sensors = VirtualSensorHub::default();

    // Seed the simulated chamber with plausible ambient conditions so
    // sensor rules have something to react to.
    sensors.set_reading("temperature", 24.0);
    sensors.set_reading("humidity", 55.0);
    sensors.set_reading("co2", 450.0);

    let mut driver = CycleDriver::new(
        sensors,
        panel.clone(),
        fan,
        panel,
        store,
        SystemClock,
        PowerController::new(config.power.tolerance_watts, config.power.max_iterations),
    );
    driver.reload_program().await;

    tracing::info!(
        program = %config.program.path,
        period_secs = config.cycle.period_secs,
        "growboxd running"
    );

    let mut ticks = tokio::time::interval(Duration::from_secs(config.cycle.period_secs));
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                // Cycles never overlap: the next tick is not processed
                // until this await completes.
                if let Err(err) = driver.run_cycle().await {
                    tracing::warn!(error = %err, "cycle failed, retrying next period");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
