// src/value.rs
//
// The dynamic typing of the Python source's parameter values (arbitrary-
// width integers, byte sequences, strings, each checked only by a schema
// at runtime) re-expressed per spec.md §9 as a closed sum type.

use std::collections::HashMap;

use num_bigint::BigInt;

use crate::schema::{FieldType, Schema};

/// One parameter value, tagged by the wire type it was read as (or will
/// be written as).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Mpint(BigInt),
    U8(u8),
    U32(u32),
    U64(u64),
}

impl Value {
    /// The field type this value satisfies, or `None` for `Bytes` values
    /// whose length hasn't been checked against a particular
    /// `FixedBytes(n)` requirement (that check happens in
    /// `matches_field_type`, since a single `Bytes` value can satisfy
    /// both `FieldType::Bytes` and any `FieldType::FixedBytes(n)` of the
    /// matching length).
    pub fn matches_field_type(&self, ty: FieldType) -> bool {
        match (self, ty) {
            (Value::Text(_), FieldType::Text) => true,
            (Value::Bytes(_), FieldType::Bytes) => true,
            (Value::Bytes(b), FieldType::FixedBytes(n)) => b.len() == n,
            (Value::Mpint(_), FieldType::Mpint) => true,
            (Value::U8(_), FieldType::U8) => true,
            (Value::U32(_), FieldType::U32) => true,
            (Value::U64(_), FieldType::U64) => true,
            _ => false,
        }
    }
}

/// An ordered name -> value mapping conforming to a variant's schema
/// (spec.md §3's "Parameter object"). Storage is a plain `HashMap`: wire
/// order is owned entirely by the `Schema`, never by map iteration.
///
/// Extra fields not named by the owning schema may be stored (accepted on
/// construction) but are never written on encode, and participate in
/// equality like any other field (spec.md §9 open question, resolved in
/// `DESIGN.md`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamsMap {
    values: HashMap<String, Value>,
}

impl ParamsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, Value)> for ParamsMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        ParamsMap {
            values: iter.into_iter().collect(),
        }
    }
}

/// Structural validation of a parameter map against a schema (spec.md
/// §4.1's `check_mapping_matches_schema`): for each field in the schema,
/// assert presence and a runtime type compatible with the tag. Mismatches
/// are non-fatal; the caller's `Diagnostics` collects a
/// `SoftValidationFailed` warning rather than erroring out.
pub fn check_mapping_matches_schema(values: &ParamsMap, schema: &Schema, diagnostics: &mut crate::diagnostics::Diagnostics) {
    for (name, ty) in schema {
        match values.get(name) {
            None => diagnostics.push(crate::diagnostics::Warning::SoftValidationFailed {
                message: format!("field '{}' is missing", name),
            }),
            Some(value) if !value.matches_field_type(*ty) => {
                diagnostics.push(crate::diagnostics::Warning::SoftValidationFailed {
                    message: format!("field '{}' does not match type {:?}", name, ty),
                })
            }
            Some(_) => {}
        }
    }
}
