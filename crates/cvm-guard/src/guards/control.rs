//! Control-transfer guards: call depth, external bindings, inline data.

use cvm_types::{GuardError, GuardResult};
use tracing::debug;

use crate::view::EngineView;

fn invocation_depth(view: &dyn EngineView, guard: &'static str) -> GuardResult {
    let depth = view.invocation_depth();
    let max = view.limits().max_invocation_stack_size;
    if depth >= max {
        debug!(guard, depth, max, "invocation stack is full");
        return Err(GuardError::InvocationStackOverflow);
    }
    Ok(())
}

/// `CALL` within the current script.
pub fn call(view: &dyn EngineView) -> GuardResult {
    invocation_depth(view, "call")
}

/// `APPCALL` and `TAILCALL`: another contract, resolved through the call table.
pub fn app_call(view: &dyn EngineView) -> GuardResult {
    invocation_depth(view, "app_call")?;
    if !view.has_call_table() {
        debug!(guard = "app_call", "call table is not bound");
        return Err(GuardError::MissingCallTable);
    }
    Ok(())
}

pub fn sys_call(view: &dyn EngineView) -> GuardResult {
    if !view.has_service() {
        debug!(guard = "sys_call", "service is not bound");
        return Err(GuardError::MissingService);
    }
    Ok(())
}

// ── Inline data ──────────────────────────────────────────────────────────────

/// Certify that a `prefix_width`-byte little-endian length followed by
/// that many data bytes can be read from the current instruction pointer.
///
/// Checks, in order: the prefix lies inside the code buffer, the declared
/// length is at most `max_item_size`, and the data lies inside the code
/// buffer. Nothing is read past the prefix and the pointer is not moved.
fn inline_data(view: &dyn EngineView, prefix_width: usize, guard: &'static str) -> GuardResult {
    let Some((code, ip)) = view.current_code() else {
        debug!(guard, "no execution context");
        return Err(GuardError::CodeBufferOverrun);
    };

    let prefix_end = match ip.checked_add(prefix_width) {
        Some(end) if end <= code.len() => end,
        _ => {
            debug!(guard, ip, code_len = code.len(), "length prefix past end of code");
            return Err(GuardError::CodeBufferOverrun);
        }
    };

    let mut raw = [0u8; 4];
    raw[..prefix_width].copy_from_slice(&code[ip..prefix_end]);
    let declared = u32::from_le_bytes(raw) as usize;

    let max = view.limits().max_item_size;
    if declared > max {
        debug!(guard, declared, max, "inline data exceeds max item size");
        return Err(GuardError::ItemTooLarge);
    }

    match prefix_end.checked_add(declared) {
        Some(end) if end <= code.len() => Ok(()),
        _ => {
            debug!(guard, declared, ip, code_len = code.len(), "inline data past end of code");
            Err(GuardError::CodeBufferOverrun)
        }
    }
}

pub fn push_data1(view: &dyn EngineView) -> GuardResult {
    inline_data(view, 1, "push_data1")
}

pub fn push_data2(view: &dyn EngineView) -> GuardResult {
    inline_data(view, 2, "push_data2")
}

pub fn push_data4(view: &dyn EngineView) -> GuardResult {
    inline_data(view, 4, "push_data4")
}
