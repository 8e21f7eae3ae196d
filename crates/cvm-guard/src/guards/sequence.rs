//! Byte-sequence guards for the splice opcodes.

use cvm_types::{BigInt, GuardError, GuardResult};
use num_traits::Signed;
use tracing::debug;

use super::{arity, byte_len_operand, int_operand};
use crate::view::EngineView;

/// Non-negative integer operand `n` below the top, else `BadValue`.
fn count_operand(
    view: &dyn EngineView,
    n: usize,
    guard: &'static str,
    what: &'static str,
) -> Result<BigInt, GuardError> {
    let value = int_operand(view, n, guard)?;
    if value.is_negative() {
        debug!(guard, operand = what, value = %value, "negative operand");
        return Err(GuardError::BadValue);
    }
    Ok(value)
}

/// The concatenated length must fit in one item.
pub fn cat(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 2, "cat")?;
    let l0 = byte_len_operand(view, 0, "cat")?;
    let l1 = byte_len_operand(view, 1, "cat")?;
    let max = view.limits().max_item_size;
    if l0.saturating_add(l1) > max {
        debug!(guard = "cat", l0, l1, max, "concatenation exceeds max item size");
        return Err(GuardError::ItemTooLarge);
    }
    Ok(())
}

/// Stack: `[.., source, index, count]`.
pub fn substr(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 3, "substr")?;
    let count = count_operand(view, 0, "substr", "count")?;
    let index = count_operand(view, 1, "substr", "index")?;
    let len = byte_len_operand(view, 2, "substr")?;
    if &index + &count > BigInt::from(len) {
        debug!(guard = "substr", index = %index, count = %count, len, "range exceeds source");
        return Err(GuardError::ArrayIndexOutOfRange);
    }
    Ok(())
}

/// Shared bound for `LEFT` and `RIGHT`. Stack: `[.., source, count]`.
fn edge_slice(view: &dyn EngineView, guard: &'static str) -> GuardResult {
    arity::require(view, 2, guard)?;
    let count = count_operand(view, 0, guard, "count")?;
    let len = byte_len_operand(view, 1, guard)?;
    if count > BigInt::from(len) {
        debug!(guard, count = %count, len, "count exceeds source");
        return Err(GuardError::ArrayIndexOutOfRange);
    }
    Ok(())
}

pub fn left(view: &dyn EngineView) -> GuardResult {
    edge_slice(view, "left")
}

pub fn right(view: &dyn EngineView) -> GuardResult {
    edge_slice(view, "right")
}
