//! # growbox-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `SensorReader` — per-cycle sensor snapshot readings
//!   - `LightBank` / `Fan` — actuator drive lines
//!   - `PowerMeter` — measured panel wattage
//!   - `ProgramStore` — persisted program documents
//!   - `Clock` — local wall-clock time and date
//! - Provide the **rule engine** (`engine::evaluate`) that folds the active
//!   rule tree into one actuator target per cycle
//! - Provide the **power controller** that scales channel levels against
//!   live measurements until a wattage target is met
//! - Provide the **cycle driver** that composes snapshot → evaluate →
//!   resolve → commit, one strictly sequential cycle at a time
//!
//! ## Dependency rule
//! Depends on `growbox-domain` only. Never imports adapter crates. Adapters
//! depend on *this* crate, not the reverse.

pub mod cycle;
pub mod engine;
pub mod ports;
pub mod power;
