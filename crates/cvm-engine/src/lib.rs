//! CVM engine state.
//!
//! Holds everything one contract invocation owns: the evaluation stack,
//! the invocation stack of execution contexts, the machine limits, and
//! the optional call-table and host-service bindings. The engine exposes
//! this state to the guard layer only through
//! [`EngineView`](cvm_guard::EngineView).

mod context;
mod engine;
mod stack;

pub use context::{ExecutionContext, InvocationStack};
pub use engine::{CallTable, ExecutionEngine, InteropService};
pub use stack::EvaluationStack;
