//! Guards for opcodes that address a stack slot by a depth operand.
//!
//! The depth `n` is popped from the top first, and the addressed item
//! then sits `n` places below the new top, so the stack must hold at
//! least `n + 2` items.

use cvm_types::{BigInt, GuardError, GuardResult};
use num_traits::Signed;
use tracing::debug;

use super::{arity, int_operand};
use crate::view::EngineView;

fn depth_operand(view: &dyn EngineView, guard: &'static str) -> GuardResult {
    arity::require(view, 1, guard)?;
    let total = view.stack_len();
    let index = int_operand(view, 0, guard)?;
    if index.is_negative() || &index + 2u32 > BigInt::from(total) {
        debug!(guard, index = %index, total, "index < 0 || index > stack depth - 2");
        return Err(GuardError::BadValue);
    }
    Ok(())
}

pub fn xdrop(view: &dyn EngineView) -> GuardResult {
    depth_operand(view, "xdrop")
}

pub fn xswap(view: &dyn EngineView) -> GuardResult {
    depth_operand(view, "xswap")
}

pub fn xtuck(view: &dyn EngineView) -> GuardResult {
    depth_operand(view, "xtuck")
}

pub fn pick(view: &dyn EngineView) -> GuardResult {
    depth_operand(view, "pick")
}

pub fn roll(view: &dyn EngineView) -> GuardResult {
    depth_operand(view, "roll")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{array, int, FakeEngine};

    type Guard = fn(&dyn EngineView) -> GuardResult;

    const ALL: [(&str, Guard); 5] = [
        ("xdrop", xdrop),
        ("xswap", xswap),
        ("xtuck", xtuck),
        ("pick", pick),
        ("roll", roll),
    ];

    #[test]
    fn test_empty_stack_underflows() {
        let e = FakeEngine::with_stack(vec![]);
        for (name, guard) in ALL {
            assert_eq!(guard(&e), Err(GuardError::StackUnderflow), "{name}");
        }
    }

    #[test]
    fn test_deepest_slot_passes() {
        // Three items below the index: indices 0..=2 are addressable.
        let e = FakeEngine::with_stack(vec![int(10), int(11), int(12), int(2)]);
        for (name, guard) in ALL {
            assert_eq!(guard(&e), Ok(()), "{name}");
        }
    }

    #[test]
    fn test_one_past_deepest_slot_fails() {
        let e = FakeEngine::with_stack(vec![int(10), int(11), int(12), int(3)]);
        for (name, guard) in ALL {
            assert_eq!(guard(&e), Err(GuardError::BadValue), "{name}");
        }
    }

    #[test]
    fn test_index_alone_is_not_enough() {
        let e = FakeEngine::with_stack(vec![int(0)]);
        assert_eq!(pick(&e), Err(GuardError::BadValue));
    }

    #[test]
    fn test_negative_index() {
        let e = FakeEngine::with_stack(vec![int(10), int(-1)]);
        assert_eq!(roll(&e), Err(GuardError::BadValue));
    }

    #[test]
    fn test_container_index() {
        let e = FakeEngine::with_stack(vec![int(10), array(0)]);
        assert_eq!(xswap(&e), Err(GuardError::BadValue));
    }
}
