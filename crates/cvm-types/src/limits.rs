//! Machine limits shared by the engine and the guard layer.

use serde::{Deserialize, Serialize};

use crate::error::LimitsError;

/// Resource bounds fixed for the lifetime of an engine.
///
/// Hosts either take [`VmLimits::default`] or load their own from JSON;
/// two engines with different limits can coexist in one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmLimits {
    /// Maximum canonical byte length of an integer.
    pub max_bigint_size: usize,
    /// Maximum byte length of a byte sequence or inline data push.
    pub max_item_size: usize,
    /// Maximum element count of an array or struct.
    pub max_array_size: usize,
    /// Maximum depth of the invocation stack.
    pub max_invocation_stack_size: usize,
}

impl VmLimits {
    pub const DEFAULT_MAX_BIGINT_SIZE: usize = 32;
    pub const DEFAULT_MAX_ITEM_SIZE: usize = 1024 * 1024;
    pub const DEFAULT_MAX_ARRAY_SIZE: usize = 1024;
    pub const DEFAULT_MAX_INVOCATION_STACK_SIZE: usize = 1024;

    /// Parse limits from a JSON document and check them.
    ///
    /// Fields that are absent keep their default value.
    pub fn from_json(json: &str) -> Result<Self, LimitsError> {
        let limits: VmLimits = serde_json::from_str(json)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Reject configurations where any limit is zero.
    pub fn validate(&self) -> Result<(), LimitsError> {
        let fields = [
            ("max_bigint_size", self.max_bigint_size),
            ("max_item_size", self.max_item_size),
            ("max_array_size", self.max_array_size),
            ("max_invocation_stack_size", self.max_invocation_stack_size),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(LimitsError::ZeroLimit(*name)),
            None => Ok(()),
        }
    }

    /// Largest left-shift, in bits, that can still produce an in-bounds
    /// nonzero integer.
    pub fn max_shift_bits(&self) -> usize {
        self.max_bigint_size.saturating_mul(8)
    }
}

impl Default for VmLimits {
    fn default() -> Self {
        Self {
            max_bigint_size: Self::DEFAULT_MAX_BIGINT_SIZE,
            max_item_size: Self::DEFAULT_MAX_ITEM_SIZE,
            max_array_size: Self::DEFAULT_MAX_ARRAY_SIZE,
            max_invocation_stack_size: Self::DEFAULT_MAX_INVOCATION_STACK_SIZE,
        }
    }
}
