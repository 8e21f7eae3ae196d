//! Opcode → guard registry.
//!
//! The table is plain data built once at startup: the dispatch loop looks
//! up the guard for the next opcode, runs it, and only executes the
//! instruction on `Ok(())`. Opcodes without an entry need no guard.

use std::collections::BTreeMap;
use std::fmt;

use cvm_types::{GuardResult, Opcode};
use tracing::{trace, warn};

use crate::guards::{arity, container, control, numeric, sequence, stack_position};
use crate::view::EngineView;

/// Signature shared by every guard.
pub type GuardFn = fn(&dyn EngineView) -> GuardResult;

/// A registered guard and the name it reports in diagnostics.
#[derive(Clone, Copy)]
pub struct GuardEntry {
    pub name: &'static str,
    pub guard: GuardFn,
}

impl GuardEntry {
    pub fn run(&self, view: &dyn EngineView) -> GuardResult {
        (self.guard)(view)
    }
}

impl fmt::Debug for GuardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardEntry").field("name", &self.name).finish()
    }
}

/// Registry mapping each guarded [`Opcode`] to its guard.
#[derive(Debug, Clone)]
pub struct GuardTable {
    entries: BTreeMap<Opcode, GuardEntry>,
}

impl GuardTable {
    /// A table with no guards registered.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The full guard set for the standard instruction set.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register_arity();
        table.register_numeric();
        table.register_sequence();
        table.register_container();
        table.register_stack_position();
        table.register_control();
        table
    }

    /// Register (or replace) the guard for `opcode`.
    pub fn register(&mut self, opcode: Opcode, name: &'static str, guard: GuardFn) {
        self.entries.insert(opcode, GuardEntry { name, guard });
    }

    /// Look up the guard for `opcode`.
    pub fn get(&self, opcode: Opcode) -> Option<&GuardEntry> {
        self.entries.get(&opcode)
    }

    pub fn is_guarded(&self, opcode: Opcode) -> bool {
        self.entries.contains_key(&opcode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over guarded opcodes in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (Opcode, &GuardEntry)> {
        self.entries.iter().map(|(op, entry)| (*op, entry))
    }

    /// Run the guard for `opcode` against `view`.
    ///
    /// Unguarded opcodes always pass.
    pub fn check(&self, opcode: Opcode, view: &dyn EngineView) -> GuardResult {
        let Some(entry) = self.entries.get(&opcode) else {
            return Ok(());
        };
        match entry.run(view) {
            Ok(()) => {
                trace!(opcode = %opcode, guard = entry.name, "guard passed");
                Ok(())
            }
            Err(err) => {
                warn!(
                    opcode = %opcode,
                    guard = entry.name,
                    code = err.code(),
                    error = %err,
                    "instruction rejected"
                );
                Err(err)
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Registration, one family at a time
    // ══════════════════════════════════════════════════════════════════════

    fn register_arity(&mut self) {
        use Opcode::*;

        for op in [
            JmpIf, JmpIfNot, DupFromAltStack, ToAltStack, Drop, Dup, Size, Invert, Negate, Abs,
            Not, Nz, Sha1, Sha256, Hash160, Hash256, ArraySize, ThrowIfNot,
        ] {
            self.register(op, "count1", arity::count1);
        }
        for op in [
            Nip, Over, Swap, Tuck, And, Or, Xor, Equal, BoolAnd, BoolOr, NumEqual, NumNotEqual,
            Lt, Gt, Lte, Gte, Min, Max, CheckSig,
        ] {
            self.register(op, "count2", arity::count2);
        }
        for op in [Rot, Within] {
            self.register(op, "count3", arity::count3);
        }
    }

    fn register_numeric(&mut self) {
        self.register(Opcode::Inc, "inc", numeric::inc);
        self.register(Opcode::Dec, "dec", numeric::dec);
        self.register(Opcode::Sign, "sign", numeric::sign);
        self.register(Opcode::Add, "add", numeric::add);
        self.register(Opcode::Sub, "sub", numeric::sub);
        self.register(Opcode::Mul, "mul", numeric::mul);
        self.register(Opcode::Div, "div", numeric::div);
        self.register(Opcode::Mod, "mod", numeric::modulo);
        self.register(Opcode::Shl, "shl", numeric::shl);
        self.register(Opcode::Shr, "shr", numeric::shr);
    }

    fn register_sequence(&mut self) {
        self.register(Opcode::Cat, "cat", sequence::cat);
        self.register(Opcode::SubStr, "substr", sequence::substr);
        self.register(Opcode::Left, "left", sequence::left);
        self.register(Opcode::Right, "right", sequence::right);
    }

    fn register_container(&mut self) {
        self.register(Opcode::Pack, "pack", container::pack);
        self.register(Opcode::Unpack, "unpack", container::unpack);
        self.register(Opcode::PickItem, "pick_item", container::pick_item);
        self.register(Opcode::SetItem, "set_item", container::set_item);
        self.register(Opcode::NewArray, "new_array", container::new_array);
        self.register(Opcode::NewStruct, "new_struct", container::new_struct);
        self.register(Opcode::Append, "append", container::append);
        self.register(Opcode::Reverse, "reverse", container::reverse);
    }

    fn register_stack_position(&mut self) {
        self.register(Opcode::XDrop, "xdrop", stack_position::xdrop);
        self.register(Opcode::XSwap, "xswap", stack_position::xswap);
        self.register(Opcode::XTuck, "xtuck", stack_position::xtuck);
        self.register(Opcode::Pick, "pick", stack_position::pick);
        self.register(Opcode::Roll, "roll", stack_position::roll);
    }

    fn register_control(&mut self) {
        self.register(Opcode::Call, "call", control::call);
        self.register(Opcode::AppCall, "app_call", control::app_call);
        self.register(Opcode::TailCall, "app_call", control::app_call);
        self.register(Opcode::SysCall, "sys_call", control::sys_call);
        self.register(Opcode::PushData1, "push_data1", control::push_data1);
        self.register(Opcode::PushData2, "push_data2", control::push_data2);
        self.register(Opcode::PushData4, "push_data4", control::push_data4);
    }
}

impl Default for GuardTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{int, FakeEngine};
    use cvm_types::GuardError;

    #[test]
    fn test_standard_covers_every_family() {
        let table = GuardTable::standard();
        for op in [
            Opcode::Add,
            Opcode::Cat,
            Opcode::PickItem,
            Opcode::Roll,
            Opcode::AppCall,
            Opcode::PushData4,
            Opcode::ThrowIfNot,
        ] {
            assert!(table.is_guarded(op), "{op} should be guarded");
        }
    }

    #[test]
    fn test_unguarded_opcodes_pass() {
        let table = GuardTable::standard();
        let e = FakeEngine::with_stack(vec![]);
        for op in [Opcode::Nop, Opcode::Push0, Opcode::Ret, Opcode::Depth, Opcode::Jmp] {
            assert!(!table.is_guarded(op), "{op} should not be guarded");
            assert_eq!(table.check(op, &e), Ok(()));
        }
    }

    #[test]
    fn test_names() {
        let table = GuardTable::standard();
        assert_eq!(table.get(Opcode::Mod).map(|e| e.name), Some("mod"));
        assert_eq!(table.get(Opcode::TailCall).map(|e| e.name), Some("app_call"));
        assert_eq!(table.get(Opcode::Within).map(|e| e.name), Some("count3"));
        assert!(table.get(Opcode::Nop).is_none());
    }

    #[test]
    fn test_iter_in_byte_order() {
        let table = GuardTable::standard();
        let ops: Vec<u8> = table.iter().map(|(op, _)| op.as_u8()).collect();
        let mut sorted = ops.clone();
        sorted.sort_unstable();
        assert_eq!(ops, sorted);
        assert_eq!(ops.len(), table.len());
    }

    #[test]
    fn test_check_dispatches_to_guard() {
        let table = GuardTable::standard();
        let e = FakeEngine::with_stack(vec![int(1), int(0)]);
        assert_eq!(table.check(Opcode::Div, &e), Err(GuardError::DivideByZero));
        assert_eq!(table.check(Opcode::Add, &e), Ok(()));
    }

    #[test]
    fn test_register_overrides() {
        fn always_bad(_: &dyn EngineView) -> GuardResult {
            Err(GuardError::BadValue)
        }
        let mut table = GuardTable::empty();
        assert!(table.is_empty());
        table.register(Opcode::Nop, "always_bad", always_bad);
        let e = FakeEngine::default();
        assert_eq!(table.check(Opcode::Nop, &e), Err(GuardError::BadValue));
        assert_eq!(table.len(), 1);
    }
}
