//! Read-only engine access for guards.

use cvm_types::{StackItem, VmLimits};

/// What a guard may observe about the running engine.
///
/// Every method takes `&self` and returns shared borrows, so a guard
/// holding `&dyn EngineView` has no path to mutate the evaluation stack,
/// the invocation stack, or the instruction pointer.
pub trait EngineView {
    /// Limits the engine was constructed with.
    fn limits(&self) -> &VmLimits;

    /// Number of items on the evaluation stack.
    fn stack_len(&self) -> usize;

    /// The item `n` positions below the top (`0` is the top), if present.
    fn peek(&self, n: usize) -> Option<&StackItem>;

    /// Number of active call frames.
    fn invocation_depth(&self) -> usize;

    /// Code buffer of the executing context and its instruction pointer.
    ///
    /// The pointer addresses the byte following the opcode being guarded,
    /// i.e. the start of any inline operand. `None` when no context is loaded.
    fn current_code(&self) -> Option<(&[u8], usize)>;

    /// Whether a contract call table is bound.
    fn has_call_table(&self) -> bool;

    /// Whether a host service is bound.
    fn has_service(&self) -> bool;
}
