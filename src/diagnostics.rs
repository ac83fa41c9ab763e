// src/diagnostics.rs

/// A non-fatal problem detected while decoding or validating a key.
///
/// Warnings never abort the operation that raised them; they accumulate
/// in a [`Diagnostics`] collaborator that the caller inspects afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Bytes remained in the input after a key was fully decoded.
    ExcessBytes { trailing: usize },
    /// A per-variant soft validation check failed (e.g. an Ed25519 public
    /// key whose length isn't 32, or a key/value whose runtime type
    /// doesn't match its schema).
    SoftValidationFailed { message: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::ExcessBytes { trailing } => {
                write!(f, "excess bytes in key: {} byte(s) remained", trailing)
            }
            Warning::SoftValidationFailed { message } => {
                write!(f, "soft validation failed: {}", message)
            }
        }
    }
}

/// Collects warnings raised during a decode or validation pass.
///
/// Handed to operations by `&mut` reference rather than kept as
/// process-global state, so callers can run decodes concurrently without
/// interfering with each other's diagnostics.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_accumulate_in_push_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Warning::ExcessBytes { trailing: 3 });
        diagnostics.push(Warning::SoftValidationFailed { message: "oops".to_string() });
        assert_eq!(diagnostics.warnings().len(), 2);
        assert_eq!(diagnostics.warnings()[0], Warning::ExcessBytes { trailing: 3 });
    }

    #[test]
    fn fresh_diagnostics_is_empty() {
        assert!(Diagnostics::new().is_empty());
    }
}
