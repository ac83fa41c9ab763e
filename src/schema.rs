// src/schema.rs
//
// The format instruction schema of spec.md §4.2: a first-class, ordered
// description of a structured record. The schema is a pure value with no
// behavior beyond being enumerable in declaration order.

/// Tag for one wire primitive type (spec.md §4.1 / §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Length-prefixed text.
    Text,
    /// Length-prefixed opaque bytes.
    Bytes,
    /// Length-prefixed signed big-endian arbitrary-precision integer.
    Mpint,
    /// Unprefixed fixed-length byte sequence.
    FixedBytes(usize),
    /// Big-endian unsigned 8-bit integer.
    U8,
    /// Big-endian unsigned 32-bit integer.
    U32,
    /// Big-endian unsigned 64-bit integer.
    U64,
}

/// An ordered name -> type mapping. Iteration order is the canonical wire
/// order; two schemas with identical fields in different orders are
/// distinct schemas.
pub type Schema = Vec<(&'static str, FieldType)>;

/// Builds a `Schema` from a list of `(name, type)` pairs, preserving order.
pub fn schema(fields: &[(&'static str, FieldType)]) -> Schema {
    fields.to_vec()
}

/// Concatenates a prefix, a base schema and a suffix into one schema,
/// preserving the order of all three parts. Used by certificate variants
/// (spec.md §4.3), whose schema is "base public schema prefixed with
/// `nonce:BYTES`, and appended with certificate fields".
pub fn with_prefix_and_suffix(prefix: &[(&'static str, FieldType)], base: &Schema, suffix: &[(&'static str, FieldType)]) -> Schema {
    let mut out = Vec::with_capacity(prefix.len() + base.len() + suffix.len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(base);
    out.extend_from_slice(suffix);
    out
}
