//! Integer guards: canonical size bounds, division by zero, shifts.
//!
//! Integers are unbounded in the data model, so every arithmetic guard
//! bounds its operands (and, where the result can grow, the result) by
//! the canonical encoding length in [`VmLimits::max_bigint_size`]. A
//! candidate result may be computed here to test it; it is never
//! written back.
//!
//! [`VmLimits::max_bigint_size`]: cvm_types::VmLimits::max_bigint_size

use cvm_types::integer::{encoded_len, within_size};
use cvm_types::{BigInt, GuardError, GuardResult};
use num_bigint::Sign;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::debug;

use super::{arity, int_operand};
use crate::view::EngineView;

/// `(x1, x2)` for a binary operation `x1 op x2`, where `x2` is the top.
fn binary_operands(view: &dyn EngineView, guard: &'static str) -> Result<(BigInt, BigInt), GuardError> {
    let x2 = int_operand(view, 0, guard)?;
    let x1 = int_operand(view, 1, guard)?;
    Ok((x1, x2))
}

fn overflow(guard: &'static str) -> GuardError {
    debug!(guard, "integer size check failed");
    GuardError::IntegerOverflow
}

// ── Add / Sub ────────────────────────────────────────────────────────────────

pub fn add(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 2, "add")?;
    let (x1, x2) = binary_operands(view, "add")?;
    let max = view.limits().max_bigint_size;
    if !within_size(&x1, max) || !within_size(&x2, max) || !within_size(&(&x1 + &x2), max) {
        return Err(overflow("add"));
    }
    Ok(())
}

pub fn sub(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 2, "sub")?;
    let (x1, x2) = binary_operands(view, "sub")?;
    let max = view.limits().max_bigint_size;
    if !within_size(&x1, max) || !within_size(&x2, max) || !within_size(&(&x1 - &x2), max) {
        return Err(overflow("sub"));
    }
    Ok(())
}

// ── Mul ──────────────────────────────────────────────────────────────────────

/// Bounds the product by the sum of the operand lengths instead of
/// computing it. This is stricter than the exact product size and peers
/// must apply the same approximation.
pub fn mul(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 2, "mul")?;
    let (x1, x2) = binary_operands(view, "mul")?;
    let max = view.limits().max_bigint_size;
    let lx1 = encoded_len(&x1);
    let lx2 = encoded_len(&x2);
    if lx1 > max || lx2 > max || lx1 + lx2 > max {
        debug!(guard = "mul", lx1, lx2, max, "operand lengths exceed integer size limit");
        return Err(GuardError::IntegerOverflow);
    }
    Ok(())
}

// ── Div / Mod ────────────────────────────────────────────────────────────────

fn division(view: &dyn EngineView, guard: &'static str) -> GuardResult {
    arity::require(view, 2, guard)?;
    let x2 = int_operand(view, 0, guard)?;
    if x2.is_zero() {
        debug!(guard, "divisor is zero");
        return Err(GuardError::DivideByZero);
    }
    let x1 = int_operand(view, 1, guard)?;
    let max = view.limits().max_bigint_size;
    if !within_size(&x1, max) || !within_size(&x2, max) {
        return Err(overflow(guard));
    }
    Ok(())
}

pub fn div(view: &dyn EngineView) -> GuardResult {
    division(view, "div")
}

pub fn modulo(view: &dyn EngineView) -> GuardResult {
    division(view, "mod")
}

// ── Inc / Dec / Sign ─────────────────────────────────────────────────────────

pub fn inc(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 1, "inc")?;
    let x = int_operand(view, 0, "inc")?;
    let max = view.limits().max_bigint_size;
    if !within_size(&x, max) || !within_size(&(&x + BigInt::one()), max) {
        return Err(overflow("inc"));
    }
    Ok(())
}

/// A positive value only shrinks in magnitude when decremented, so the
/// result is re-checked only for zero and negative inputs.
pub fn dec(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 1, "dec")?;
    let x = int_operand(view, 0, "dec")?;
    let max = view.limits().max_bigint_size;
    if !within_size(&x, max) || (x.sign() != Sign::Plus && !within_size(&(&x - BigInt::one()), max)) {
        return Err(overflow("dec"));
    }
    Ok(())
}

pub fn sign(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 1, "sign")
}

// ── Shl / Shr ────────────────────────────────────────────────────────────────

/// `x1 << x2`.
pub fn shl(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 2, "shl")?;
    let (x1, x2) = binary_operands(view, "shl")?;
    if x2.is_negative() {
        debug!(guard = "shl", shift = %x2, "negative shift");
        return Err(GuardError::NegativeShift);
    }
    if x1.is_zero() {
        return Ok(());
    }

    let max_bits = view.limits().max_shift_bits();
    if x2 > BigInt::from(max_bits) {
        debug!(guard = "shl", shift = %x2, max_bits, "shift exceeds integer width");
        return Err(GuardError::IntegerOverflow);
    }
    let bits = x2.to_usize().ok_or_else(|| overflow("shl"))?;
    if !within_size(&(x1 << bits), view.limits().max_bigint_size) {
        return Err(overflow("shl"));
    }
    Ok(())
}

/// `x1 >> x2`. Shifting right only shrinks magnitude, so the result is
/// not bounded.
pub fn shr(view: &dyn EngineView) -> GuardResult {
    arity::require(view, 2, "shr")?;
    let x2 = int_operand(view, 0, "shr")?;
    if x2.is_negative() {
        debug!(guard = "shr", shift = %x2, "negative shift");
        return Err(GuardError::NegativeShift);
    }
    Ok(())
}
