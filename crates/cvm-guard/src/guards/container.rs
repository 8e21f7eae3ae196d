//! Array and struct guards.
//!
//! "Container" means [`StackItem::Array`] or [`StackItem::Struct`]; the
//! guards below treat both alike.
//!
//! [`StackItem::Array`]: cvm_types::StackItem::Array
//! [`StackItem::Struct`]: cvm_types::StackItem::Struct

use cvm_types::{BigInt, GuardError, GuardResult, StackItem};
use num_traits::Signed;
use tracing::debug;

use super::{arity, int_operand, operand};
use crate::view::EngineView;

/// Element count operand for `PACK`, `NEWARRAY` and `NEWSTRUCT`.
fn element_count(view: &dyn EngineView, guard: &'static str) -> Result<BigInt, GuardError> {
    let count = int_operand(view, 0, guard)?;
    if count.is_negative() {
        debug!(guard, count = %count, "negative element count");
        return Err(GuardError::BadValue);
    }
    let max = view.limits().max_array_size;
    if count > BigInt::from(max) {
        debug!(guard, count = %count, max, "element count exceeds max array size");
        return Err(GuardError::ArrayTooLarge);
    }
    Ok(count)
}

fn require_container<'a>(
    item: &'a StackItem,
    guard: &'static str,
) -> Result<&'a [StackItem], GuardError> {
    item.as_container().ok_or_else(|| {
        debug!(guard, kind = %item.kind(), "not an array");
        GuardError::NotAnArray
    })
}

/// Index operand `n` below the top; must be non-negative.
fn index_operand(view: &dyn EngineView, n: usize, guard: &'static str) -> Result<BigInt, GuardError> {
    let index = int_operand(view, n, guard)?;
    if index.is_negative() {
        debug!(guard, index = %index, "negative index");
        return Err(GuardError::BadValue);
    }
    Ok(index)
}

fn check_index(index: &BigInt, items: &[StackItem], guard: &'static str) -> GuardResult {
    if *index >= BigInt::from(items.len()) {
        debug!(guard, index = %index, len = items.len(), "index past end of container");
        return Err(GuardError::ArrayIndexOutOfRange);
    }
    Ok(())
}

// ── Construction ─────────────────────────────────────────────────────────────

/// Stack: `[.., item_n, .., item_1, count]`.
pub fn pack(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 1, "pack")?;
    let count = element_count(view, "pack")?;
    let total = view.stack_len();
    if count + 1u32 > BigInt::from(total) {
        debug!(guard = "pack", total, "not enough items to pack");
        return Err(GuardError::StackUnderflow);
    }
    Ok(())
}

pub fn new_array(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 1, "new_array")?;
    element_count(view, "new_array").map(|_| ())
}

pub fn new_struct(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 1, "new_struct")?;
    element_count(view, "new_struct").map(|_| ())
}

// ── Whole-container operations ───────────────────────────────────────────────

pub fn unpack(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 1, "unpack")?;
    require_container(operand(view, 0, "unpack")?, "unpack").map(|_| ())
}

pub fn reverse(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 1, "reverse")?;
    require_container(operand(view, 0, "reverse")?, "reverse").map(|_| ())
}

/// Stack: `[.., container, item]`.
pub fn append(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 2, "append")?;
    require_container(operand(view, 1, "append")?, "append").map(|_| ())
}

// ── Element access ───────────────────────────────────────────────────────────

/// Stack: `[.., container, index]`.
pub fn pick_item(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 2, "pick_item")?;
    let index = index_operand(view, 0, "pick_item")?;
    let target = view.peek(1).ok_or_else(|| {
        debug!(guard = "pick_item", "container operand missing");
        GuardError::BadValue
    })?;
    let items = require_container(target, "pick_item")?;
    check_index(&index, items, "pick_item")
}

/// Stack: `[.., container, index, value]`.
pub fn set_item(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 3, "set_item")?;
    if view.peek(0).is_none() {
        debug!(guard = "set_item", "replacement value missing");
        return Err(GuardError::BadValue);
    }
    let index = index_operand(view, 1, "set_item")?;
    let target = view.peek(2).ok_or_else(|| {
        debug!(guard = "set_item", "container operand missing");
        GuardError::BadValue
    })?;
    let items = require_container(target, "set_item")?;
    check_index(&index, items, "set_item")
}
