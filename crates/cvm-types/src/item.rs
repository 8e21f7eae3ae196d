use num_bigint::BigInt;
use num_traits::{One, Zero};
use std::fmt;

use crate::integer;

/// The kind of a [`StackItem`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Integer,
    Boolean,
    ByteArray,
    Array,
    Struct,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::ByteArray => write!(f, "byte array"),
            Self::Array => write!(f, "array"),
            Self::Struct => write!(f, "struct"),
        }
    }
}

/// A value on the evaluation stack.
///
/// `Array` and `Struct` are both containers; they differ only in the
/// value semantics the executor gives them, which guards never observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    Integer(BigInt),
    Boolean(bool),
    ByteArray(Vec<u8>),
    Array(Vec<StackItem>),
    Struct(Vec<StackItem>),
}

impl StackItem {
    /// Convenience constructor for integer items.
    pub fn int(value: impl Into<BigInt>) -> Self {
        Self::Integer(value.into())
    }

    /// Convenience constructor for byte-array items.
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::ByteArray(value.into())
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Integer(_) => ItemKind::Integer,
            Self::Boolean(_) => ItemKind::Boolean,
            Self::ByteArray(_) => ItemKind::ByteArray,
            Self::Array(_) => ItemKind::Array,
            Self::Struct(_) => ItemKind::Struct,
        }
    }

    /// Whether this item is an array or a struct.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Struct(_))
    }

    /// The element sequence of a container, or `None` for scalars.
    pub fn as_container(&self) -> Option<&[StackItem]> {
        match self {
            Self::Array(items) | Self::Struct(items) => Some(items),
            _ => None,
        }
    }

    /// Element count of a container, or `None` for scalars.
    pub fn container_len(&self) -> Option<usize> {
        self.as_container().map(<[StackItem]>::len)
    }

    /// Interpret this item as an integer operand.
    ///
    /// Booleans map to 0/1 and byte arrays are decoded as little-endian
    /// two's complement. Containers have no integer value.
    pub fn as_integer(&self) -> Option<BigInt> {
        match self {
            Self::Integer(n) => Some(n.clone()),
            Self::Boolean(true) => Some(BigInt::one()),
            Self::Boolean(false) => Some(BigInt::zero()),
            Self::ByteArray(bytes) => Some(integer::decode(bytes)),
            Self::Array(_) | Self::Struct(_) => None,
        }
    }

    /// Interpret this item as a byte-sequence operand.
    ///
    /// Integers yield their canonical encoding; booleans yield a single
    /// `0x01`/`0x00` byte. Containers have no byte form.
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::ByteArray(bytes) => Some(bytes.clone()),
            Self::Integer(n) => Some(integer::encode(n)),
            Self::Boolean(b) => Some(vec![u8::from(*b)]),
            Self::Array(_) | Self::Struct(_) => None,
        }
    }

    /// Length of the byte form without materialising it.
    pub fn byte_len(&self) -> Option<usize> {
        match self {
            Self::ByteArray(bytes) => Some(bytes.len()),
            Self::Integer(n) => Some(integer::encoded_len(n)),
            Self::Boolean(_) => Some(1),
            Self::Array(_) | Self::Struct(_) => None,
        }
    }
}

impl From<bool> for StackItem {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<BigInt> for StackItem {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for StackItem {
    fn from(value: i64) -> Self {
        Self::Integer(BigInt::from(value))
    }
}

impl From<Vec<u8>> for StackItem {
    fn from(value: Vec<u8>) -> Self {
        Self::ByteArray(value)
    }
}

impl From<&[u8]> for StackItem {
    fn from(value: &[u8]) -> Self {
        Self::ByteArray(value.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_queries() {
        let arr = StackItem::Array(vec![StackItem::int(1), StackItem::int(2)]);
        let st = StackItem::Struct(vec![StackItem::Boolean(true)]);
        assert!(arr.is_container());
        assert!(st.is_container());
        assert_eq!(arr.container_len(), Some(2));
        assert_eq!(st.container_len(), Some(1));
        assert_eq!(arr.kind(), ItemKind::Array);
        assert_eq!(st.kind(), ItemKind::Struct);

        let scalar = StackItem::bytes(vec![1, 2, 3]);
        assert!(!scalar.is_container());
        assert_eq!(scalar.as_container(), None);
    }

    #[test]
    fn test_integer_view() {
        assert_eq!(StackItem::int(-7).as_integer(), Some(BigInt::from(-7)));
        assert_eq!(StackItem::Boolean(true).as_integer(), Some(BigInt::one()));
        assert_eq!(StackItem::Boolean(false).as_integer(), Some(BigInt::zero()));
        assert_eq!(
            StackItem::bytes(vec![0x80, 0x00]).as_integer(),
            Some(BigInt::from(128))
        );
        assert_eq!(StackItem::bytes(Vec::new()).as_integer(), Some(BigInt::zero()));
        assert_eq!(StackItem::Array(vec![]).as_integer(), None);
    }

    #[test]
    fn test_bytes_view() {
        assert_eq!(StackItem::int(128).as_bytes(), Some(vec![0x80, 0x00]));
        assert_eq!(StackItem::int(0).as_bytes(), Some(vec![]));
        assert_eq!(StackItem::Boolean(true).as_bytes(), Some(vec![1]));
        assert_eq!(StackItem::Boolean(false).as_bytes(), Some(vec![0]));
        assert_eq!(StackItem::Struct(vec![]).as_bytes(), None);
    }

    #[test]
    fn test_byte_len_matches_bytes() {
        let items = [
            StackItem::int(-129),
            StackItem::int(0),
            StackItem::Boolean(false),
            StackItem::bytes(vec![9; 17]),
        ];
        for item in &items {
            assert_eq!(item.byte_len(), item.as_bytes().map(|b| b.len()));
        }
    }
}
