//! Trait `Record`: valor tipado con campos nombrados y clasificados.
//!
//! La representación neutra de un record es su serialización JSON (objeto).
//! El trait compara esa representación con `FIELDS` para partir el record en
//! carry y artifact sin reflexión en runtime.

use std::fmt::Debug;

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::introspect::{serde_shape, SerdeShape};
use super::{Carry, FieldDescriptor};
use crate::errors::CoreEngineError;
use crate::model::Artifact;

/// Referencia al tipo declarado de un record (back-reference de artifacts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaRef {
    name: &'static str,
    rust_type: &'static str,
}

impl SchemaRef {
    pub fn of<R: Record>() -> Self {
        Self { name: R::NAME,
               rust_type: std::any::type_name::<R>() }
    }

    /// Nombre declarado del schema (p. ej. `InputTest`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ruta completa del tipo Rust.
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    pub fn is<R: Record>(&self) -> bool {
        *self == Self::of::<R>()
    }
}

impl std::fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Record (schema) consumido y producido por los stages.
///
/// Normalmente se implementa con la macro `record!`, que obliga a clasificar
/// cada campo. Implementaciones manuales deben mantener `FIELDS` alineado con
/// la serialización; cualquier desvío se reporta como `MalformedSchema`.
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + 'static {
    /// Nombre declarado del schema.
    const NAME: &'static str;
    /// Campos en orden de declaración, cada uno con su clasificación.
    const FIELDS: &'static [FieldDescriptor];

    fn schema() -> SchemaRef {
        SchemaRef::of::<Self>()
    }

    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }

    /// Comprobación estática del schema (no necesita instancia):
    /// - nombres de campo únicos;
    /// - el record se deserializa como struct con campos nombrados (o unitario
    ///   si no declara campos);
    /// - los nombres serde (tras `rename`/`skip`) coinciden con `FIELDS`.
    fn validate_schema() -> Result<(), CoreEngineError> {
        for (i, f) in Self::FIELDS.iter().enumerate() {
            if Self::FIELDS[..i].iter().any(|prev| prev.name == f.name) {
                return Err(malformed::<Self>(format!("field `{}` is declared more than once", f.name)));
            }
        }
        match serde_shape::<Self>() {
            Some(SerdeShape::Struct(names)) => {
                if let Some(unclassified) = names.iter().find(|n| Self::field(n).is_none()) {
                    return Err(malformed::<Self>(format!("field `{unclassified}` has no Carried/Residual classification")));
                }
                if let Some(f) = Self::FIELDS.iter().find(|f| !names.contains(&f.name)) {
                    return Err(malformed::<Self>(format!("declared field `{}` is missing from the record", f.name)));
                }
                Ok(())
            }
            Some(SerdeShape::Unit) if Self::FIELDS.is_empty() => Ok(()),
            Some(other) => Err(malformed::<Self>(format!("record must be a struct with named fields, found {other}"))),
            None => Err(malformed::<Self>("record does not declare its shape to serde".to_string())),
        }
    }

    /// Campos del record en orden de declaración.
    fn to_fields(&self) -> Result<IndexMap<String, Value>, CoreEngineError> {
        Self::validate_schema()?;
        let mut map = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) if Self::FIELDS.is_empty() => serde_json::Map::new(),
            Ok(other) => {
                return Err(malformed::<Self>(format!("record serializes to {} instead of an object", json_kind(&other))))
            }
            Err(e) => return Err(malformed::<Self>(e.to_string())),
        };
        if let Some(unclassified) = map.keys().find(|k| Self::field(k).is_none()) {
            return Err(malformed::<Self>(format!("field `{unclassified}` has no Carried/Residual classification")));
        }
        let mut fields = IndexMap::with_capacity(Self::FIELDS.len());
        for f in Self::FIELDS {
            let value = map.remove(f.name)
                           .ok_or_else(|| malformed::<Self>(format!("declared field `{}` is missing from the record", f.name)))?;
            fields.insert(f.name.to_string(), value);
        }
        Ok(fields)
    }

    /// Parte el record en (carry, artifact). Ambos conjuntos son disjuntos y su
    /// unión es el conjunto de campos del record.
    fn split(&self) -> Result<(Carry, Artifact), CoreEngineError> {
        let mut carried = IndexMap::new();
        let mut residual = IndexMap::new();
        for (name, value) in self.to_fields()? {
            match Self::field(&name).map(|f| f.is_carried()) {
                Some(true) => {
                    carried.insert(name, value);
                }
                _ => {
                    residual.insert(name, value);
                }
            }
        }
        Ok((Carry::new(Self::schema(), carried), Artifact::new(Self::schema(), residual)))
    }

    /// Sólo los campos `Carried`.
    fn carry(&self) -> Result<Carry, CoreEngineError> {
        self.split().map(|(carry, _)| carry)
    }

    /// Sólo los campos `Residual` + `source_type`.
    fn derive_artifact(&self) -> Result<Artifact, CoreEngineError> {
        self.split().map(|(_, artifact)| artifact)
    }

    /// Construye el record desde un mapa de campos (carry + campos nuevos).
    fn from_fields(fields: IndexMap<String, Value>) -> Result<Self, CoreEngineError> {
        let object: serde_json::Map<String, Value> = fields.into_iter().collect();
        serde_json::from_value(Value::Object(object)).map_err(|e| CoreEngineError::RecordDecode { schema: Self::NAME,
                                                                                                   reason: e.to_string() })
    }
}

fn malformed<R: Record>(reason: String) -> CoreEngineError {
    CoreEngineError::MalformedSchema { schema: R::NAME, reason }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
