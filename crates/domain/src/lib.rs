//! # growbox-domain
//!
//! Pure domain model for the growbox chamber automation system.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, time-of-day and date parsing
//! - Define **ActuatorState** (light channel levels, fan speed, optional
//!   power target) and partial **ActuatorPatch** overrides with
//!   last-writer-wins merging and hardware clamping
//! - Define the **Program** rule tree (time / date-range / sensor variants)
//!   and the pure condition predicates evaluated against a **Context**
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod actuators;
pub mod context;
pub mod error;
pub mod program;
pub mod time;
