//! In-memory [`EngineView`] for unit tests.

use cvm_types::{StackItem, VmLimits};

use crate::view::EngineView;

/// Stack items are listed bottom first; the last element is the top.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeEngine {
    pub stack: Vec<StackItem>,
    pub limits: VmLimits,
    pub depth: usize,
    pub code: Option<Vec<u8>>,
    pub ip: usize,
    pub table: bool,
    pub service: bool,
}

impl FakeEngine {
    pub fn with_stack(stack: Vec<StackItem>) -> Self {
        Self {
            stack,
            depth: 1,
            ..Self::default()
        }
    }

    pub fn with_code(code: Vec<u8>, ip: usize) -> Self {
        Self {
            code: Some(code),
            ip,
            depth: 1,
            ..Self::default()
        }
    }
}

impl EngineView for FakeEngine {
    fn limits(&self) -> &VmLimits {
        &self.limits
    }

    fn stack_len(&self) -> usize {
        self.stack.len()
    }

    fn peek(&self, n: usize) -> Option<&StackItem> {
        let idx = self.stack.len().checked_sub(n + 1)?;
        self.stack.get(idx)
    }

    fn invocation_depth(&self) -> usize {
        self.depth
    }

    fn current_code(&self) -> Option<(&[u8], usize)> {
        self.code.as_deref().map(|code| (code, self.ip))
    }

    fn has_call_table(&self) -> bool {
        self.table
    }

    fn has_service(&self) -> bool {
        self.service
    }
}

/// Integer item helper.
pub(crate) fn int(n: i64) -> StackItem {
    StackItem::int(n)
}

/// Byte-array item helper.
pub(crate) fn bytes(len: usize) -> StackItem {
    StackItem::bytes(vec![0xAB; len])
}

/// Array item helper with `len` integer elements.
pub(crate) fn array(len: usize) -> StackItem {
    StackItem::Array((0..len as i64).map(StackItem::int).collect())
}
