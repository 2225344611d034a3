//! Cycle driver — one evaluation period of the chamber.
//!
//! The driver owns the current program and, each period: snapshots a
//! context, evaluates the rule tree, resolves any power target, and commits
//! the result to the actuator ports. Cycles are strictly sequential — the
//! caller awaits each [`CycleDriver::run_cycle`] to completion before
//! starting the next — so the power controller's measure-then-write loop is
//! never raced and no locking is needed beyond this single-in-flight
//! discipline. Aborting mid-cycle leaves at most a partially-scaled panel;
//! the next cycle reconverges (no rollback required).

use growbox_domain::actuators::ActuatorState;
use growbox_domain::context::Context;
use growbox_domain::error::GrowboxError;
use growbox_domain::program::Program;

use crate::engine;
use crate::ports::{Clock, Fan, LightBank, PowerMeter, ProgramStore, SensorReader};
use crate::power::PowerController;

/// A converged power request and its resolution, reused while the merged
/// target stays the same so the panel is not re-measured every cycle.
#[derive(Debug, Clone, PartialEq)]
struct PowerMemo {
    request: ActuatorState,
    resolved: ActuatorState,
}

/// Composes snapshot → evaluate → resolve → commit, one cycle at a time.
pub struct CycleDriver<S, L, F, M, P, C> {
    sensors: S,
    lights: L,
    fan: F,
    meter: M,
    store: P,
    clock: C,
    power: PowerController,
    program: Program,
    power_memo: Option<PowerMemo>,
}

impl<S, L, F, M, P, C> CycleDriver<S, L, F, M, P, C>
where
    S: SensorReader,
    L: LightBank,
    F: Fan,
    M: PowerMeter,
    P: ProgramStore,
    C: Clock,
{
    /// Create a driver running the built-in default program until
    /// [`CycleDriver::reload_program`] is called.
    pub fn new(sensors: S, lights: L, fan: F, meter: M, store: P, clock: C, power: PowerController) -> Self {
        Self {
            sensors,
            lights,
            fan,
            meter,
            store,
            clock,
            power,
            program: Program::built_in_default(),
            power_memo: None,
        }
    }

    /// The program currently driving the chamber.
    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Replace the current program from the store.
    ///
    /// A missing or corrupt document falls back to the built-in default —
    /// the chamber never runs without a schedule. Rules that can never
    /// activate are reported here, once, instead of every cycle.
    pub async fn reload_program(&mut self) {
        self.program = match self.store.load().await {
            Ok(program) => program,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "program unavailable, falling back to built-in default"
                );
                Program::built_in_default()
            }
        };
        for (path, issue) in self.program.structural_issues() {
            tracing::warn!(%path, %issue, "rule can never activate");
        }
        self.power_memo = None;
    }

    /// Run one evaluation cycle and return the state committed to hardware.
    ///
    /// Evaluation itself cannot fail; every degraded input (absent sensor,
    /// missing meter, convergence shortfall) resolves to a defined fallback.
    ///
    /// # Errors
    ///
    /// Returns hardware-port faults from committing the result; the caller
    /// logs them and retries on the next period.
    #[tracing::instrument(skip(self))]
    pub async fn run_cycle(&mut self) -> Result<ActuatorState, GrowboxError> {
        let ctx = self.snapshot().await;
        let target = engine::evaluate(&self.program, &ctx);

        let resolved = if let Some(memo) = self
            .power_memo
            .as_ref()
            .filter(|memo| memo.request == target)
        {
            memo.resolved.clone()
        } else if target.target_watts.is_some() {
            let outcome = self.power.resolve(&target, &self.lights, &self.meter).await?;
            self.power_memo = outcome.converged.then(|| PowerMemo {
                request: target.clone(),
                resolved: outcome.state.clone(),
            });
            outcome.state
        } else {
            // No power target: the merged state is already clamped and
            // drives the panel directly.
            self.power_memo = None;
            target
        };

        self.lights.apply(&resolved).await?;
        self.fan.set_speed(resolved.fan).await?;
        tracing::debug!(
            red = resolved.red,
            green = resolved.green,
            blue = resolved.blue,
            white = resolved.white,
            fan = resolved.fan,
            "cycle committed"
        );
        Ok(resolved)
    }

    async fn snapshot(&self) -> Context {
        let (time_of_day, date) = self.clock.now();
        let mut ctx = Context::new(time_of_day, date);
        for name in self.program.referenced_sensors() {
            if let Some(value) = self.sensors.read_sensor(&name).await {
                ctx.insert_sensor(name, value);
            }
        }
        ctx
    }
}
