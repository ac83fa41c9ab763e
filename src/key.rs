// src/key.rs
//
// The key envelope of spec.md §5.1, grounded on
// original_source/openssh_key/key.py's `PublicKey`/`PrivateKey`:
// header (`key_type: STRING`) + algorithm-specific params + footer
// (empty for public keys, `comment: STRING` for private keys), with
// `from_bytes`'s excess-byte warning and the header/params/footer
// `__eq__` (remainder excluded).

use crate::codec::ByteStream;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{KeyCodecError, Result};
use crate::params::{GenerateOptions, KeyType, PrivateKeyParams, PublicKeyParams};
use crate::registry;

/// A decoded or to-be-encoded OpenSSH public key (spec.md §5.1).
#[derive(Debug, Clone)]
pub struct PublicKey {
    pub params: PublicKeyParams,
    /// Bytes left over after decoding, if any (spec.md §5.2's excess-byte
    /// edge case). Never populated by [`PublicKey::new`]; only by
    /// [`PublicKey::decode`].
    pub remainder: Vec<u8>,
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl PublicKey {
    pub fn new(params: PublicKeyParams) -> Self {
        PublicKey { params, remainder: Vec::new() }
    }

    pub fn key_type(&self) -> KeyType {
        self.params.key_type
    }

    /// Decodes a public key blob, consuming the header (`key_type`),
    /// dispatching to that type's public schema, and capturing any
    /// trailing bytes as a warning rather than an error.
    pub fn decode(bytes: &[u8], diagnostics: &mut Diagnostics) -> Result<PublicKey> {
        let mut stream = ByteStream::new(bytes.to_vec());
        let key_type_name = stream.read_string()?;
        let key_type = registry::public_variant_for(&key_type_name)?;

        let values = stream.read_struct(&key_type.public_schema())?;
        let params = PublicKeyParams::new(key_type, values);
        params.validate(diagnostics);

        let remainder_len = stream.remaining();
        let remainder = stream.read_bytes(remainder_len)?;
        if !remainder.is_empty() {
            diagnostics.push(Warning::ExcessBytes { trailing: remainder.len() });
        }

        Ok(PublicKey { params, remainder })
    }

    /// Encodes this key back to its wire representation: header, then
    /// the params in schema order. The captured `remainder` (if any) is
    /// never re-emitted.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut stream = ByteStream::empty();
        stream.write_string(self.params.key_type.identifier());
        stream.write_struct(&self.params.key_type.public_schema(), &self.params.values)?;
        Ok(stream.into_bytes())
    }
}

/// A decoded or to-be-encoded OpenSSH private key (spec.md §5.1).
#[derive(Debug, Clone)]
pub struct PrivateKey {
    pub params: PrivateKeyParams,
    pub comment: String,
    pub remainder: Vec<u8>,
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params && self.comment == other.comment
    }
}

impl PrivateKey {
    pub fn new(params: PrivateKeyParams, comment: impl Into<String>) -> Self {
        PrivateKey {
            params,
            comment: comment.into(),
            remainder: Vec::new(),
        }
    }

    pub fn key_type(&self) -> KeyType {
        self.params.key_type
    }

    pub fn decode(bytes: &[u8], diagnostics: &mut Diagnostics) -> Result<PrivateKey> {
        let mut stream = ByteStream::new(bytes.to_vec());
        let key_type_name = stream.read_string()?;
        let key_type = registry::private_variant_for(&key_type_name)?;

        let values = stream.read_struct(&key_type.private_schema())?;
        let params = PrivateKeyParams::new(key_type, values);
        params.validate(diagnostics)?;

        let comment = stream.read_string()?;

        let remainder_len = stream.remaining();
        let remainder = stream.read_bytes(remainder_len)?;
        if !remainder.is_empty() {
            diagnostics.push(Warning::ExcessBytes { trailing: remainder.len() });
        }

        Ok(PrivateKey { params, comment, remainder })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut stream = ByteStream::empty();
        stream.write_string(self.params.key_type.identifier());
        stream.write_struct(&self.params.key_type.private_schema_checked()?, &self.params.values)?;
        stream.write_string(&self.comment);
        Ok(stream.into_bytes())
    }

    /// Generates a fresh private key of the given type (spec.md §4.3's
    /// `generate_private_params`, lifted to envelope level).
    pub fn generate(key_type: KeyType, comment: impl Into<String>, options: &GenerateOptions) -> Result<PrivateKey> {
        if !key_type.has_private() {
            return Err(KeyCodecError::NoPrivateForKeyType(key_type.identifier().to_string()));
        }
        let params = PrivateKeyParams::generate(key_type, options)?;
        Ok(PrivateKey::new(params, comment))
    }

    /// The public key derivable from this private key's params (every
    /// private schema is a superset of its public schema's field names).
    pub fn public_key(&self) -> Result<PublicKey> {
        let public_schema = self.params.key_type.public_schema();
        let mut values = crate::value::ParamsMap::new();
        for (name, _) in &public_schema {
            let value = self
                .params
                .values
                .get(name)
                .ok_or_else(|| KeyCodecError::FormatMismatch(format!("private params missing public field '{}'", name)))?;
            values.insert(*name, value.clone());
        }
        Ok(PublicKey::new(PublicKeyParams::new(self.params.key_type, values)))
    }
}
