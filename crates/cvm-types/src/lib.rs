//! Shared types for the CVM contract virtual machine.
//!
//! This crate defines the stack item model, the canonical integer
//! encoding used for size accounting, the machine limits, the opcode
//! set, and the guard error taxonomy shared by the guard layer and the
//! engine.

mod error;
pub mod integer;
mod item;
mod limits;
mod opcode;

pub use error::{ErrorFamily, GuardError, LimitsError};
pub use item::{ItemKind, StackItem};
pub use limits::VmLimits;
pub use opcode::Opcode;

/// Re-exported so downstream crates agree on the integer type.
pub use num_bigint::BigInt;

/// Result of a single guard check: `Ok(())` permits execution.
pub type GuardResult = std::result::Result<(), GuardError>;
