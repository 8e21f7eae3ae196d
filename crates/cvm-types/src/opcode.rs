use std::fmt;

/// A single instruction of the contract bytecode.
///
/// Discriminants are the wire byte values. The short-push range
/// `0x01..=0x4B` (push the next N bytes) and `PUSH2..=PUSH15` carry no
/// guard and are left to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Opcode {
    // ── Constants ──
    /// Push an empty byte array (integer zero).
    Push0 = 0x00,
    /// Push inline data with a 1-byte length prefix.
    PushData1 = 0x4C,
    /// Push inline data with a 2-byte length prefix.
    PushData2 = 0x4D,
    /// Push inline data with a 4-byte length prefix.
    PushData4 = 0x4E,
    PushM1 = 0x4F,
    Push1 = 0x51,
    Push16 = 0x60,

    // ── Flow control ──
    Nop = 0x61,
    Jmp = 0x62,
    JmpIf = 0x63,
    JmpIfNot = 0x64,
    /// Call a procedure in the current script.
    Call = 0x65,
    Ret = 0x66,
    /// Call another contract through the call table.
    AppCall = 0x67,
    /// Call a host service.
    SysCall = 0x68,
    /// Contract call that replaces the current frame.
    TailCall = 0x69,

    // ── Stack ──
    DupFromAltStack = 0x6A,
    ToAltStack = 0x6B,
    FromAltStack = 0x6C,
    XDrop = 0x6D,
    XSwap = 0x72,
    XTuck = 0x73,
    Depth = 0x74,
    Drop = 0x75,
    Dup = 0x76,
    Nip = 0x77,
    Over = 0x78,
    Pick = 0x79,
    Roll = 0x7A,
    Rot = 0x7B,
    Swap = 0x7C,
    Tuck = 0x7D,

    // ── Splice ──
    Cat = 0x7E,
    SubStr = 0x7F,
    Left = 0x80,
    Right = 0x81,

    Size = 0x82,
    // ── Bitwise logic ──
    Invert = 0x83,
    And = 0x84,
    Or = 0x85,
    Xor = 0x86,
    Equal = 0x87,

    // ── Arithmetic ──
    Inc = 0x8B,
    Dec = 0x8C,
    Sign = 0x8D,
    Negate = 0x8F,
    Abs = 0x90,
    Not = 0x91,
    Nz = 0x92,
    Add = 0x93,
    Sub = 0x94,
    Mul = 0x95,
    Div = 0x96,
    Mod = 0x97,
    Shl = 0x98,
    Shr = 0x99,
    BoolAnd = 0x9A,
    BoolOr = 0x9B,
    NumEqual = 0x9C,
    NumNotEqual = 0x9E,
    Lt = 0x9F,
    Gt = 0xA0,
    Lte = 0xA1,
    Gte = 0xA2,
    Min = 0xA3,
    Max = 0xA4,
    Within = 0xA5,

    // ── Crypto ──
    Sha1 = 0xA7,
    Sha256 = 0xA8,
    Hash160 = 0xA9,
    Hash256 = 0xAA,
    CheckSig = 0xAC,

    // ── Containers ──
    ArraySize = 0xC0,
    Pack = 0xC1,
    Unpack = 0xC2,
    PickItem = 0xC3,
    SetItem = 0xC4,
    NewArray = 0xC5,
    NewStruct = 0xC6,
    Append = 0xC8,
    Reverse = 0xC9,

    // ── Exceptions ──
    Throw = 0xF0,
    ThrowIfNot = 0xF1,
}

impl Opcode {
    /// Every opcode, in byte order.
    pub const ALL: [Opcode; 83] = [
        Self::Push0,
        Self::PushData1,
        Self::PushData2,
        Self::PushData4,
        Self::PushM1,
        Self::Push1,
        Self::Push16,
        Self::Nop,
        Self::Jmp,
        Self::JmpIf,
        Self::JmpIfNot,
        Self::Call,
        Self::Ret,
        Self::AppCall,
        Self::SysCall,
        Self::TailCall,
        Self::DupFromAltStack,
        Self::ToAltStack,
        Self::FromAltStack,
        Self::XDrop,
        Self::XSwap,
        Self::XTuck,
        Self::Depth,
        Self::Drop,
        Self::Dup,
        Self::Nip,
        Self::Over,
        Self::Pick,
        Self::Roll,
        Self::Rot,
        Self::Swap,
        Self::Tuck,
        Self::Cat,
        Self::SubStr,
        Self::Left,
        Self::Right,
        Self::Size,
        Self::Invert,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Equal,
        Self::Inc,
        Self::Dec,
        Self::Sign,
        Self::Negate,
        Self::Abs,
        Self::Not,
        Self::Nz,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Shl,
        Self::Shr,
        Self::BoolAnd,
        Self::BoolOr,
        Self::NumEqual,
        Self::NumNotEqual,
        Self::Lt,
        Self::Gt,
        Self::Lte,
        Self::Gte,
        Self::Min,
        Self::Max,
        Self::Within,
        Self::Sha1,
        Self::Sha256,
        Self::Hash160,
        Self::Hash256,
        Self::CheckSig,
        Self::ArraySize,
        Self::Pack,
        Self::Unpack,
        Self::PickItem,
        Self::SetItem,
        Self::NewArray,
        Self::NewStruct,
        Self::Append,
        Self::Reverse,
        Self::Throw,
        Self::ThrowIfNot,
    ];

    /// Decode a wire byte.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Push0),
            0x4C => Some(Self::PushData1),
            0x4D => Some(Self::PushData2),
            0x4E => Some(Self::PushData4),
            0x4F => Some(Self::PushM1),
            0x51 => Some(Self::Push1),
            0x60 => Some(Self::Push16),
            0x61 => Some(Self::Nop),
            0x62 => Some(Self::Jmp),
            0x63 => Some(Self::JmpIf),
            0x64 => Some(Self::JmpIfNot),
            0x65 => Some(Self::Call),
            0x66 => Some(Self::Ret),
            0x67 => Some(Self::AppCall),
            0x68 => Some(Self::SysCall),
            0x69 => Some(Self::TailCall),
            0x6A => Some(Self::DupFromAltStack),
            0x6B => Some(Self::ToAltStack),
            0x6C => Some(Self::FromAltStack),
            0x6D => Some(Self::XDrop),
            0x72 => Some(Self::XSwap),
            0x73 => Some(Self::XTuck),
            0x74 => Some(Self::Depth),
            0x75 => Some(Self::Drop),
            0x76 => Some(Self::Dup),
            0x77 => Some(Self::Nip),
            0x78 => Some(Self::Over),
            0x79 => Some(Self::Pick),
            0x7A => Some(Self::Roll),
            0x7B => Some(Self::Rot),
            0x7C => Some(Self::Swap),
            0x7D => Some(Self::Tuck),
            0x7E => Some(Self::Cat),
            0x7F => Some(Self::SubStr),
            0x80 => Some(Self::Left),
            0x81 => Some(Self::Right),
            0x82 => Some(Self::Size),
            0x83 => Some(Self::Invert),
            0x84 => Some(Self::And),
            0x85 => Some(Self::Or),
            0x86 => Some(Self::Xor),
            0x87 => Some(Self::Equal),
            0x8B => Some(Self::Inc),
            0x8C => Some(Self::Dec),
            0x8D => Some(Self::Sign),
            0x8F => Some(Self::Negate),
            0x90 => Some(Self::Abs),
            0x91 => Some(Self::Not),
            0x92 => Some(Self::Nz),
            0x93 => Some(Self::Add),
            0x94 => Some(Self::Sub),
            0x95 => Some(Self::Mul),
            0x96 => Some(Self::Div),
            0x97 => Some(Self::Mod),
            0x98 => Some(Self::Shl),
            0x99 => Some(Self::Shr),
            0x9A => Some(Self::BoolAnd),
            0x9B => Some(Self::BoolOr),
            0x9C => Some(Self::NumEqual),
            0x9E => Some(Self::NumNotEqual),
            0x9F => Some(Self::Lt),
            0xA0 => Some(Self::Gt),
            0xA1 => Some(Self::Lte),
            0xA2 => Some(Self::Gte),
            0xA3 => Some(Self::Min),
            0xA4 => Some(Self::Max),
            0xA5 => Some(Self::Within),
            0xA7 => Some(Self::Sha1),
            0xA8 => Some(Self::Sha256),
            0xA9 => Some(Self::Hash160),
            0xAA => Some(Self::Hash256),
            0xAC => Some(Self::CheckSig),
            0xC0 => Some(Self::ArraySize),
            0xC1 => Some(Self::Pack),
            0xC2 => Some(Self::Unpack),
            0xC3 => Some(Self::PickItem),
            0xC4 => Some(Self::SetItem),
            0xC5 => Some(Self::NewArray),
            0xC6 => Some(Self::NewStruct),
            0xC8 => Some(Self::Append),
            0xC9 => Some(Self::Reverse),
            0xF0 => Some(Self::Throw),
            0xF1 => Some(Self::ThrowIfNot),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Upper-case mnemonic, as printed by disassemblers.
    pub fn name(self) -> &'static str {
        match self {
            Self::Push0 => "PUSH0",
            Self::PushData1 => "PUSHDATA1",
            Self::PushData2 => "PUSHDATA2",
            Self::PushData4 => "PUSHDATA4",
            Self::PushM1 => "PUSHM1",
            Self::Push1 => "PUSH1",
            Self::Push16 => "PUSH16",
            Self::Nop => "NOP",
            Self::Jmp => "JMP",
            Self::JmpIf => "JMPIF",
            Self::JmpIfNot => "JMPIFNOT",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::AppCall => "APPCALL",
            Self::SysCall => "SYSCALL",
            Self::TailCall => "TAILCALL",
            Self::DupFromAltStack => "DUPFROMALTSTACK",
            Self::ToAltStack => "TOALTSTACK",
            Self::FromAltStack => "FROMALTSTACK",
            Self::XDrop => "XDROP",
            Self::XSwap => "XSWAP",
            Self::XTuck => "XTUCK",
            Self::Depth => "DEPTH",
            Self::Drop => "DROP",
            Self::Dup => "DUP",
            Self::Nip => "NIP",
            Self::Over => "OVER",
            Self::Pick => "PICK",
            Self::Roll => "ROLL",
            Self::Rot => "ROT",
            Self::Swap => "SWAP",
            Self::Tuck => "TUCK",
            Self::Cat => "CAT",
            Self::SubStr => "SUBSTR",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Size => "SIZE",
            Self::Invert => "INVERT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Equal => "EQUAL",
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::Sign => "SIGN",
            Self::Negate => "NEGATE",
            Self::Abs => "ABS",
            Self::Not => "NOT",
            Self::Nz => "NZ",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::BoolAnd => "BOOLAND",
            Self::BoolOr => "BOOLOR",
            Self::NumEqual => "NUMEQUAL",
            Self::NumNotEqual => "NUMNOTEQUAL",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Lte => "LTE",
            Self::Gte => "GTE",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Within => "WITHIN",
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Hash160 => "HASH160",
            Self::Hash256 => "HASH256",
            Self::CheckSig => "CHECKSIG",
            Self::ArraySize => "ARRAYSIZE",
            Self::Pack => "PACK",
            Self::Unpack => "UNPACK",
            Self::PickItem => "PICKITEM",
            Self::SetItem => "SETITEM",
            Self::NewArray => "NEWARRAY",
            Self::NewStruct => "NEWSTRUCT",
            Self::Append => "APPEND",
            Self::Reverse => "REVERSE",
            Self::Throw => "THROW",
            Self::ThrowIfNot => "THROWIFNOT",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_u8(byte).ok_or(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_values_round_trip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_u8(op.as_u8()), Some(op), "{op}");
        }
    }

    #[test]
    fn test_all_is_sorted_and_unique() {
        for pair in Opcode::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_known_bytes() {
        assert_eq!(Opcode::PushData4.as_u8(), 0x4E);
        assert_eq!(Opcode::Add.as_u8(), 0x93);
        assert_eq!(Opcode::PickItem.as_u8(), 0xC3);
        assert_eq!(Opcode::try_from(0xF1), Ok(Opcode::ThrowIfNot));
    }

    #[test]
    fn test_unassigned_bytes() {
        assert_eq!(Opcode::from_u8(0x01), None);
        assert_eq!(Opcode::from_u8(0x50), None);
        assert_eq!(Opcode::try_from(0xFF), Err(0xFF));
    }

    #[test]
    fn test_display_uses_mnemonic() {
        assert_eq!(Opcode::SubStr.to_string(), "SUBSTR");
        assert_eq!(Opcode::DupFromAltStack.to_string(), "DUPFROMALTSTACK");
    }
}
