//! Guard implementations, grouped by family.
//!
//! Every guard has the shape `fn(&dyn EngineView) -> GuardResult` and
//! starts with an [`arity::require`] call, so the operand helpers below
//! only ever run on a stack already proven deep enough.

pub mod arity;
pub mod container;
pub mod control;
pub mod numeric;
pub mod sequence;
pub mod stack_position;

use cvm_types::{BigInt, GuardError, StackItem};
use tracing::debug;

use crate::view::EngineView;

/// Item `n` below the top.
fn operand<'a>(
    view: &'a dyn EngineView,
    n: usize,
    guard: &'static str,
) -> Result<&'a StackItem, GuardError> {
    view.peek(n).ok_or_else(|| {
        debug!(guard, depth = n, "operand missing");
        GuardError::StackUnderflow
    })
}

/// Item `n` below the top, read as an integer.
fn int_operand(
    view: &dyn EngineView,
    n: usize,
    guard: &'static str,
) -> Result<BigInt, GuardError> {
    let item = operand(view, n, guard)?;
    item.as_integer().ok_or_else(|| {
        debug!(guard, depth = n, kind = %item.kind(), "operand is not an integer");
        GuardError::BadValue
    })
}

/// Byte length of item `n` below the top, read as a byte sequence.
fn byte_len_operand(
    view: &dyn EngineView,
    n: usize,
    guard: &'static str,
) -> Result<usize, GuardError> {
    let item = operand(view, n, guard)?;
    item.byte_len().ok_or_else(|| {
        debug!(guard, depth = n, kind = %item.kind(), "operand is not a byte sequence");
        GuardError::BadValue
    })
}
