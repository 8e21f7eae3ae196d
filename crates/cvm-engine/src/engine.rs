//! The execution engine and its external bindings.

use std::sync::Arc;

use cvm_guard::{EngineView, GuardTable};
use cvm_types::{GuardResult, Opcode, StackItem, VmLimits};
use tracing::debug;

use crate::context::{ExecutionContext, InvocationStack};
use crate::stack::EvaluationStack;

/// Resolves the code of other contracts for `APPCALL` / `TAILCALL`.
pub trait CallTable {
    /// Code of the contract identified by `script_hash`, if known.
    fn script(&self, script_hash: &[u8]) -> Option<Arc<[u8]>>;
}

/// Host functions reachable through `SYSCALL`.
pub trait InteropService {
    fn has_method(&self, name: &str) -> bool;
}

/// State of one contract invocation.
///
/// An engine is never shared between concurrent invocations; hosts that
/// run contracts in parallel create one engine per invocation.
pub struct ExecutionEngine {
    limits: VmLimits,
    evaluation_stack: EvaluationStack,
    invocation_stack: InvocationStack,
    table: Option<Arc<dyn CallTable>>,
    service: Option<Arc<dyn InteropService>>,
}

impl ExecutionEngine {
    /// Create an engine with the default limits.
    pub fn new() -> Self {
        Self::with_limits(VmLimits::default())
    }

    /// Create an engine with custom limits.
    pub fn with_limits(limits: VmLimits) -> Self {
        Self {
            limits,
            evaluation_stack: EvaluationStack::new(),
            invocation_stack: InvocationStack::new(),
            table: None,
            service: None,
        }
    }

    /// Bind a call table.
    pub fn with_call_table(mut self, table: Arc<dyn CallTable>) -> Self {
        self.table = Some(table);
        self
    }

    /// Bind a host service.
    pub fn with_service(mut self, service: Arc<dyn InteropService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn limits(&self) -> &VmLimits {
        &self.limits
    }

    pub fn evaluation_stack(&self) -> &EvaluationStack {
        &self.evaluation_stack
    }

    pub fn evaluation_stack_mut(&mut self) -> &mut EvaluationStack {
        &mut self.evaluation_stack
    }

    pub fn invocation_stack(&self) -> &InvocationStack {
        &self.invocation_stack
    }

    pub fn invocation_stack_mut(&mut self) -> &mut InvocationStack {
        &mut self.invocation_stack
    }

    /// Push a new frame for `code`.
    pub fn load_script(&mut self, code: impl Into<Arc<[u8]>>) {
        self.invocation_stack.push(ExecutionContext::new(code));
        debug!(depth = self.invocation_stack.depth(), "script loaded");
    }

    pub fn current_context(&self) -> Option<&ExecutionContext> {
        self.invocation_stack.current()
    }

    pub fn current_context_mut(&mut self) -> Option<&mut ExecutionContext> {
        self.invocation_stack.current_mut()
    }

    pub fn call_table(&self) -> Option<&dyn CallTable> {
        self.table.as_deref()
    }

    pub fn service(&self) -> Option<&dyn InteropService> {
        self.service.as_deref()
    }

    /// Run the guard `table` registers for `opcode` against this engine.
    pub fn guard(&self, table: &GuardTable, opcode: Opcode) -> GuardResult {
        table.check(opcode, self)
    }
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineView for ExecutionEngine {
    fn limits(&self) -> &VmLimits {
        &self.limits
    }

    fn stack_len(&self) -> usize {
        self.evaluation_stack.len()
    }

    fn peek(&self, n: usize) -> Option<&StackItem> {
        self.evaluation_stack.peek(n)
    }

    fn invocation_depth(&self) -> usize {
        self.invocation_stack.depth()
    }

    fn current_code(&self) -> Option<(&[u8], usize)> {
        self.invocation_stack
            .current()
            .map(|ctx| (ctx.code(), ctx.instruction_pointer()))
    }

    fn has_call_table(&self) -> bool {
        self.table.is_some()
    }

    fn has_service(&self) -> bool {
        self.service.is_some()
    }
}
