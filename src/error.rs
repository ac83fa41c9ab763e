// src/error.rs

use thiserror::Error;

/// Fatal error kinds surfaced by the codec, parameter, registry and
/// envelope layers.
///
/// Non-fatal problems (excess trailing bytes, a per-variant soft
/// validation check) never produce a `KeyCodecError`; see
/// [`crate::diagnostics::Warning`].
#[derive(Error, Debug)]
pub enum KeyCodecError {
    #[error("short read: expected {expected} byte(s), only {available} remaining")]
    ShortRead { expected: usize, available: usize },

    #[error("format mismatch: {0}")]
    FormatMismatch(String),

    #[error("unknown key type: {0}")]
    UnknownKeyType(String),

    #[error("key type {0} has no private key representation")]
    NoPrivateForKeyType(String),

    #[error("unsupported conversion for key type {0}")]
    UnsupportedConversion(String),

    #[error("invalid parameter value: {0}")]
    InvalidParameterValue(String),

    #[error("RSA key error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("elliptic curve key error: {0}")]
    EllipticCurve(#[from] p256::elliptic_curve::Error),

    #[error("ed25519 key error: {0}")]
    Ed25519(#[from] ed25519_dalek::SignatureError),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KeyCodecError>;