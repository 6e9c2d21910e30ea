//! Artifact: snapshot inmutable de los campos `Residual` de un record.
//!
//! - `source_type` apunta al schema del record de origen.
//! - `residual_fields` contiene exactamente el complemento del carry.
//! - `hash` se calcula sobre el JSON canónico de `{source, fields}` al crear
//!   el artifact; sirve como identidad para trazabilidad y deduplicación.
//!
//! Un artifact sólo se usa para inspección histórica: nunca vuelve a entrar al
//! pipeline.
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::errors::CoreEngineError;
use crate::hashing::hash_value;
use crate::record::{Record, SchemaRef};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    source_type: SchemaRef,
    residual_fields: IndexMap<String, Value>,
    hash: String,
}

impl Artifact {
    /// Constructor interno; los artifacts se crean con
    /// `Record::derive_artifact`.
    pub(crate) fn new(source_type: SchemaRef, residual_fields: IndexMap<String, Value>) -> Self {
        let hash = hash_value(&json!({ "source": source_type.name(), "fields": residual_fields }));
        Self { source_type,
               residual_fields,
               hash }
    }

    pub fn source_type(&self) -> SchemaRef {
        self.source_type
    }

    /// `true` si el artifact proviene de un record de tipo `R`.
    pub fn is_from<R: Record>(&self) -> bool {
        self.source_type.is::<R>()
    }

    pub fn residual_fields(&self) -> &IndexMap<String, Value> {
        &self.residual_fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.residual_fields.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.residual_fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.residual_fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residual_fields.is_empty()
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Vista tipada de los campos residuales (p. ej. un struct con sólo los
    /// campos `Residual` del schema de origen).
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CoreEngineError> {
        let object: serde_json::Map<String, Value> =
            self.residual_fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        serde_json::from_value(Value::Object(object)).map_err(|e| CoreEngineError::RecordDecode { schema: self.source_type.name(),
                                                                                                   reason: e.to_string() })
    }
}
