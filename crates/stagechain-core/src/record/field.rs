//! Clasificación de campos: `Carried` (sobrevive al siguiente stage) o
//! `Residual` (se materializa en el artifact y se descarta del carry).
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldClass {
    /// Se copia al carry y llega al siguiente stage.
    Carried,
    /// Se captura en el artifact del stage y no continúa.
    Residual,
}

/// Descriptor estático de un campo de record.
///
/// Invariante: la clasificación se fija al definir el schema y no cambia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub value_type: &'static str,
    pub class: FieldClass,
}

impl FieldDescriptor {
    /// Adjunta la clasificación a un campo. Es `const` para que los schemas se
    /// declaren en tiempo de compilación (ver `record!`).
    pub const fn classify(name: &'static str, value_type: &'static str, class: FieldClass) -> Self {
        Self { name,
               value_type,
               class }
    }

    pub const fn carried(name: &'static str, value_type: &'static str) -> Self {
        Self::classify(name, value_type, FieldClass::Carried)
    }

    pub const fn residual(name: &'static str, value_type: &'static str) -> Self {
        Self::classify(name, value_type, FieldClass::Residual)
    }

    pub const fn is_carried(&self) -> bool {
        matches!(self.class, FieldClass::Carried)
    }
}
