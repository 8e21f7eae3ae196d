//! Execution contexts and the invocation stack.

use std::sync::Arc;

/// One call frame: a code buffer and a cursor into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    code: Arc<[u8]>,
    instruction_pointer: usize,
}

impl ExecutionContext {
    /// A context positioned at the start of `code`.
    pub fn new(code: impl Into<Arc<[u8]>>) -> Self {
        Self {
            code: code.into(),
            instruction_pointer: 0,
        }
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn set_instruction_pointer(&mut self, ip: usize) {
        self.instruction_pointer = ip;
    }

    /// Bytes from the instruction pointer to the end of the code.
    pub fn remaining(&self) -> &[u8] {
        self.code.get(self.instruction_pointer..).unwrap_or(&[])
    }

    /// Read the byte at the instruction pointer and step past it.
    ///
    /// After this call the pointer addresses the instruction's inline
    /// operand, which is where guards expect it.
    pub fn read_opcode(&mut self) -> Option<u8> {
        let byte = *self.code.get(self.instruction_pointer)?;
        self.instruction_pointer += 1;
        Some(byte)
    }
}

/// Stack of active call frames; the last frame is executing.
#[derive(Debug, Clone, Default)]
pub struct InvocationStack {
    frames: Vec<ExecutionContext>,
}

impl InvocationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, context: ExecutionContext) {
        self.frames.push(context);
    }

    pub fn pop(&mut self) -> Option<ExecutionContext> {
        self.frames.pop()
    }

    pub fn current(&self) -> Option<&ExecutionContext> {
        self.frames.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut ExecutionContext> {
        self.frames.last_mut()
    }
}
