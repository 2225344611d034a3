//! Rule engine — folds the active rule tree into one actuator target.
//!
//! The engine walks the program's rules depth-first, in list order. A rule
//! whose condition fails hides its whole subtree; a rule whose condition
//! holds applies its own overrides first and then lets its children (and,
//! at each level, later siblings) override it in turn. Deeper and later
//! therefore always win per field, and fields nobody touches keep whatever
//! the nearest active ancestor — or the default — set.

use growbox_domain::actuators::{ActuatorState, ChannelLimits};
use growbox_domain::context::Context;
use growbox_domain::program::{Program, Rule};

/// Evaluate the program against one context snapshot.
///
/// Starts from the program's default actions, folds every active rule's
/// overrides in traversal order, and clamps the result to the hardware
/// table exactly once at the end — intermediate overshoot during merging is
/// allowed and not an error. Structurally invalid rules are diagnosed and
/// skipped; nothing in here can fail a cycle.
#[must_use]
pub fn evaluate(program: &Program, ctx: &Context) -> ActuatorState {
    let mut result = program.default_actions.clone();
    for rule in &program.loops {
        visit(rule, ctx, &mut result);
    }
    result.clamped(&ChannelLimits::default())
}

fn visit(rule: &Rule, ctx: &Context, result: &mut ActuatorState) {
    if let Err(issue) = rule.validate() {
        tracing::debug!(rule = %rule, %issue, "skipping rule that can never activate");
        return;
    }
    if !rule.condition_holds(ctx) {
        return;
    }
    for patch in rule.actions() {
        *result = result.merge(patch);
    }
    for child in rule.children() {
        visit(child, ctx, result);
    }
}
