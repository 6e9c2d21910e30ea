use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{Record, SchemaRef};
use crate::errors::CoreEngineError;

/// Subconjunto `Carried` de un record.
///
/// Es el material con el que un stage construye el record siguiente:
///
/// ```ignore
/// let next: OutputTest = input.carry()?.with("c", "C")?.into_record()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carry {
    source: SchemaRef,
    fields: IndexMap<String, Value>,
}

impl Carry {
    pub(crate) fn new(source: SchemaRef, fields: IndexMap<String, Value>) -> Self {
        Self { source, fields }
    }

    /// Schema del record del que proviene el carry.
    pub fn source_type(&self) -> SchemaRef {
        self.source
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Lee un campo decodificándolo a `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, CoreEngineError> {
        let value = self.fields.get(name).cloned().ok_or_else(|| CoreEngineError::RecordDecode {
                                                      schema: self.source.name(),
                                                      reason: format!("carry has no field `{name}`"),
                                                  })?;
        serde_json::from_value(value).map_err(|e| CoreEngineError::RecordDecode { schema: self.source.name(),
                                                                                  reason: e.to_string() })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Añade (o reemplaza) un campo.
    pub fn with(mut self, name: impl Into<String>, value: impl Serialize) -> Result<Self, CoreEngineError> {
        let value = serde_json::to_value(value).map_err(|e| CoreEngineError::RecordDecode { schema: self.source.name(),
                                                                                            reason: e.to_string() })?;
        self.fields.insert(name.into(), value);
        Ok(self)
    }

    /// Descarta un campo del carry (si existe).
    pub fn without(mut self, name: &str) -> Self {
        self.fields.shift_remove(name);
        self
    }

    pub fn into_record<R: Record>(self) -> Result<R, CoreEngineError> {
        R::from_fields(self.fields)
    }

    pub fn into_fields(self) -> IndexMap<String, Value> {
        self.fields
    }
}
