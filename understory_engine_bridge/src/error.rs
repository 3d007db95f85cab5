// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Failure reported by an [`EngineBridge`](crate::EngineBridge) implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// No engine is attached, or the integration is compiled out.
    #[error("engine bridge is unavailable")]
    Unavailable,
    /// The engine exists but has not finished initializing.
    #[error("engine bridge is not initialized")]
    NotInitialized,
    /// A native entry point could not be resolved.
    #[error("engine entry point `{0}` is missing")]
    MissingSymbol(&'static str),
    /// The engine received the call and refused it.
    #[error("engine rejected the call: {0}")]
    Rejected(String),
}

/// Coarse classification of a [`BridgeError`], used to deduplicate failure logs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FailureKind {
    /// See [`BridgeError::Unavailable`].
    Unavailable,
    /// See [`BridgeError::NotInitialized`].
    NotInitialized,
    /// See [`BridgeError::MissingSymbol`].
    MissingSymbol,
    /// See [`BridgeError::Rejected`].
    Rejected,
}

impl FailureKind {
    pub(crate) const COUNT: usize = 4;

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Unavailable => 0,
            Self::NotInitialized => 1,
            Self::MissingSymbol => 2,
            Self::Rejected => 3,
        }
    }
}

impl BridgeError {
    /// The failure kind, ignoring payloads.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Unavailable => FailureKind::Unavailable,
            Self::NotInitialized => FailureKind::NotInitialized,
            Self::MissingSymbol(_) => FailureKind::MissingSymbol,
            Self::Rejected(_) => FailureKind::Rejected,
        }
    }
}
