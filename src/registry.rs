// src/registry.rs
//
// The algorithm registry/factory of spec.md §4.4. Grounded on
// original_source/openssh_key/key_params.py's `_KEY_TYPE_MAPPING`,
// `create_public_key_params` and `create_private_key_params`: a
// dictionary lookup keyed by wire identifier string, resolving to the
// type that knows how to decode/encode that algorithm's parameters.
//
// Here the "dictionary" is `KeyType::from_identifier`; this module is a
// thin, named entry point so call sites read like the original's
// `create_public_key_params(key_type)` / `create_private_key_params(key_type)`
// rather than reaching into `params::KeyType` directly.

use crate::error::Result;
use crate::params::KeyType;

/// Resolves a wire identifier to the key type usable for decoding or
/// encoding a *public* key blob. Every recognized identifier has a
/// public representation, certificates included.
pub fn public_variant_for(identifier: &str) -> Result<KeyType> {
    KeyType::from_identifier(identifier)
}

/// Resolves a wire identifier to the key type usable for decoding or
/// encoding a *private* key blob.
///
/// # Errors
/// Returns [`crate::error::KeyCodecError::NoPrivateForKeyType`] for
/// certificate identifiers, which have no private representation of
/// their own (spec.md §4.3 edge case).
pub fn private_variant_for(identifier: &str) -> Result<KeyType> {
    let key_type = KeyType::from_identifier(identifier)?;
    if !key_type.has_private() {
        return Err(crate::error::KeyCodecError::NoPrivateForKeyType(identifier.to_string()));
    }
    Ok(key_type)
}
