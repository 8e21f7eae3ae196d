use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error family, determined by code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorFamily {
    Stack,
    Value,
    Limit,
    Arithmetic,
    Type,
    Binding,
    Code,
}

impl fmt::Display for ErrorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stack => write!(f, "stack"),
            Self::Value => write!(f, "value"),
            Self::Limit => write!(f, "limit"),
            Self::Arithmetic => write!(f, "arithmetic"),
            Self::Type => write!(f, "type"),
            Self::Binding => write!(f, "binding"),
            Self::Code => write!(f, "code"),
        }
    }
}

/// Reason a guard refused to let an instruction execute.
///
/// Every kind is stable across releases: peers compare verdicts by kind,
/// and hosts may persist the numeric [`code`](GuardError::code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardError {
    // ── Stack (100–199) ──
    #[error("evaluation stack holds fewer items than the instruction needs")]
    StackUnderflow,
    #[error("invocation stack is at its maximum depth")]
    InvocationStackOverflow,

    // ── Value (200–299) ──
    #[error("operand has a bad value")]
    BadValue,

    // ── Limit (300–399) ──
    #[error("index is out of range")]
    ArrayIndexOutOfRange,
    #[error("container element count exceeds the limit")]
    ArrayTooLarge,
    #[error("byte sequence exceeds the maximum item size")]
    ItemTooLarge,

    // ── Arithmetic (400–499) ──
    #[error("integer exceeds the maximum canonical size")]
    IntegerOverflow,
    #[error("division or modulo by zero")]
    DivideByZero,
    #[error("shift by a negative amount")]
    NegativeShift,

    // ── Type (500–599) ──
    #[error("operand is not an array or struct")]
    NotAnArray,

    // ── Binding (600–699) ──
    #[error("no call table is bound to the engine")]
    MissingCallTable,
    #[error("no host service is bound to the engine")]
    MissingService,

    // ── Code (700–799) ──
    #[error("inline data runs past the end of the code buffer")]
    CodeBufferOverrun,
}

impl GuardError {
    /// Every kind, in code order.
    pub const ALL: [GuardError; 13] = [
        Self::StackUnderflow,
        Self::InvocationStackOverflow,
        Self::BadValue,
        Self::ArrayIndexOutOfRange,
        Self::ArrayTooLarge,
        Self::ItemTooLarge,
        Self::IntegerOverflow,
        Self::DivideByZero,
        Self::NegativeShift,
        Self::NotAnArray,
        Self::MissingCallTable,
        Self::MissingService,
        Self::CodeBufferOverrun,
    ];

    /// Stable numeric code for this kind.
    pub fn code(self) -> u16 {
        match self {
            Self::StackUnderflow => 100,
            Self::InvocationStackOverflow => 101,
            Self::BadValue => 200,
            Self::ArrayIndexOutOfRange => 300,
            Self::ArrayTooLarge => 301,
            Self::ItemTooLarge => 302,
            Self::IntegerOverflow => 400,
            Self::DivideByZero => 401,
            Self::NegativeShift => 402,
            Self::NotAnArray => 500,
            Self::MissingCallTable => 600,
            Self::MissingService => 601,
            Self::CodeBufferOverrun => 700,
        }
    }

    /// Get the family for this kind.
    pub fn family(self) -> ErrorFamily {
        match self.code() {
            100..=199 => ErrorFamily::Stack,
            200..=299 => ErrorFamily::Value,
            300..=399 => ErrorFamily::Limit,
            400..=499 => ErrorFamily::Arithmetic,
            500..=599 => ErrorFamily::Type,
            600..=699 => ErrorFamily::Binding,
            _ => ErrorFamily::Code,
        }
    }
}

/// Errors raised while loading or checking [`VmLimits`](crate::VmLimits).
#[derive(Debug, Error)]
pub enum LimitsError {
    /// The configuration document is not valid JSON for `VmLimits`.
    #[error("invalid limits document: {0}")]
    Json(#[from] serde_json::Error),

    /// A limit was configured as zero, which would reject every program.
    #[error("limit `{0}` must be greater than zero")]
    ZeroLimit(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<u16> = GuardError::ALL.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), GuardError::ALL.len());
    }

    #[test]
    fn test_error_family() {
        assert_eq!(GuardError::StackUnderflow.family(), ErrorFamily::Stack);
        assert_eq!(GuardError::BadValue.family(), ErrorFamily::Value);
        assert_eq!(GuardError::ItemTooLarge.family(), ErrorFamily::Limit);
        assert_eq!(GuardError::DivideByZero.family(), ErrorFamily::Arithmetic);
        assert_eq!(GuardError::NotAnArray.family(), ErrorFamily::Type);
        assert_eq!(GuardError::MissingService.family(), ErrorFamily::Binding);
        assert_eq!(GuardError::CodeBufferOverrun.family(), ErrorFamily::Code);
    }

    #[test]
    fn test_json_serialization() {
        let json = serde_json::to_string(&GuardError::ArrayIndexOutOfRange).unwrap();
        assert_eq!(json, "\"array_index_out_of_range\"");
        let back: GuardError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GuardError::ArrayIndexOutOfRange);
    }

    #[test]
    fn test_display_is_not_empty() {
        for err in GuardError::ALL {
            assert!(!err.to_string().is_empty(), "{err:?} has no message");
        }
    }

    #[test]
    fn test_zero_limit_message() {
        let err = LimitsError::ZeroLimit("max_item_size");
        assert_eq!(err.to_string(), "limit `max_item_size` must be greater than zero");
    }
}
