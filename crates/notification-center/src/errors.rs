//! # Error Types
//!
//! Dispatch errors are synchronous and raised straight from the call that
//! caused them. A center that still holds bindings at teardown is reported
//! through `TeardownReport`, not through an error.

use crate::binding::BindingId;
use crate::name::NotificationName;
use crate::payload::PayloadShape;
use thiserror::Error;

/// Errors raised while invoking bindings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// A binding was invoked with a payload it does not take, or without one
    /// it requires. The procedure was not called.
    #[error("Shape mismatch on binding {binding} for {name:?}: expects {expected}, supplied {supplied}")]
    ShapeMismatch {
        binding: BindingId,
        name: NotificationName,
        expected: PayloadShape,
        supplied: PayloadShape,
    },

    /// The payload's runtime type is not exactly the registered type.
    /// Dispatch stopped here; `delivered` bindings ran before it.
    #[error("Type mismatch on binding {binding} for {name:?}: expects {expected}, found {found} ({delivered} delivered before failure)")]
    TypeMismatch {
        binding: BindingId,
        name: NotificationName,
        expected: PayloadShape,
        found: PayloadShape,
        delivered: usize,
    },
}

impl DispatchError {
    /// The binding that rejected the call.
    #[must_use]
    pub fn binding(&self) -> BindingId {
        match self {
            Self::ShapeMismatch { binding, .. } | Self::TypeMismatch { binding, .. } => *binding,
        }
    }

    /// Bindings invoked by the failing call before it stopped.
    #[must_use]
    pub fn delivered(&self) -> usize {
        match self {
            Self::ShapeMismatch { .. } => 0,
            Self::TypeMismatch { delivered, .. } => *delivered,
        }
    }

    pub(crate) fn with_delivered(self, count: usize) -> Self {
        match self {
            Self::TypeMismatch {
                binding,
                name,
                expected,
                found,
                ..
            } => Self::TypeMismatch {
                binding,
                name,
                expected,
                found,
                delivered: count,
            },
            other => other,
        }
    }
}

/// Errors from reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid leak policy: {0} (expected ignore, log or assert)")]
    InvalidLeakPolicy(String),

    #[error("Invalid boolean for {key}: {value}")]
    InvalidBool { key: &'static str, value: String },

    #[error("Empty center label")]
    EmptyLabel,
}
