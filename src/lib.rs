// src/lib.rs

//! Typed wire codec and parameter model for OpenSSH public and private
//! keys.
//!
//! This crate reads and writes the Pascal-style (length-prefixed) byte
//! streams OpenSSH uses for key material, and represents the decoded
//! parameters of every algorithm OpenSSH defines (RSA, Ed25519, DSA,
//! ECDSA over the NIST P-256/P-384/P-521 curves, their FIDO/U2F
//! "security key" variants, and certificates over all of the above) as
//! a closed, tagged [`params::KeyType`] rather than an open class
//! hierarchy.
//!
//! Decoding never aborts on a soft problem — trailing bytes, a field
//! whose runtime type doesn't match its schema — it records a
//! [`diagnostics::Warning`] in the caller-supplied [`diagnostics::Diagnostics`]
//! instead. Only a structurally malformed stream (a length prefix
//! running past the end of the buffer, an unrecognized algorithm
//! identifier) produces an [`error::KeyCodecError`].
//!
//! Signing, verification, passphrase-based private key encryption, PEM
//! armor, and the SSH agent/transport protocols are out of scope: this
//! crate only reads and writes the key material itself.

pub mod codec;
pub mod diagnostics;
pub mod error;
pub mod key;
pub mod params;
pub mod registry;
pub mod schema;
pub mod value;

pub use diagnostics::{Diagnostics, Warning};
pub use error::{KeyCodecError, Result};
pub use key::{PrivateKey, PublicKey};
pub use params::{ExternalPrivateKey, ExternalPublicKey, GenerateOptions, KeyType, PrivateKeyParams, PublicKeyParams};
