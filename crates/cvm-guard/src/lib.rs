//! CVM guard layer: pre-execution checks for contract bytecode.
//!
//! # Architecture
//!
//! Before the dispatch loop lets an opcode touch machine state, it asks
//! the [`GuardTable`] for that opcode's guard and runs it against a
//! read-only [`EngineView`]. A guard either passes or returns the first
//! violated condition as a [`GuardError`](cvm_types::GuardError); it never
//! pushes, pops, or moves the instruction pointer.
//!
//! ## Guard families
//! - [`guards::arity`]: minimum operand count, composed into every other guard
//! - [`guards::numeric`]: canonical integer size bounds, division by zero, shifts
//! - [`guards::sequence`]: byte-sequence length and slice bounds
//! - [`guards::container`]: array/struct type, size and index bounds
//! - [`guards::stack_position`]: depth operands of positional stack ops
//! - [`guards::control`]: call depth, call-table and service bindings, inline data
//!
//! ## Determinism
//!
//! Every guard is a pure function of the visible engine state. Two peers
//! running the same guard against the same stack must reach the same
//! verdict, so check order inside a guard is part of its contract.

pub mod guards;
mod table;
mod view;

#[cfg(test)]
mod fixture;

pub use table::{GuardEntry, GuardFn, GuardTable};
pub use view::EngineView;
