//! Operand-count guards.

use cvm_types::{GuardError, GuardResult};
use tracing::debug;

use crate::view::EngineView;

/// Fail with `StackUnderflow` unless the stack holds at least `need` items.
pub fn require(view: &dyn EngineView, need: usize, guard: &'static str) -> GuardResult {
    let actual = view.stack_len();
    if actual < need {
        debug!(guard, actual, need, "lack of parameters");
        return Err(GuardError::StackUnderflow);
    }
    Ok(())
}

pub fn count1(view: &dyn EngineView) -> GuardResult {
    require(view, 1, "count1")
}

pub fn count2(view: &dyn EngineView) -> GuardResult {
    require(view, 2, "count2")
}

pub fn count3(view: &dyn EngineView) -> GuardResult {
    require(view, 3, "count3")
}
