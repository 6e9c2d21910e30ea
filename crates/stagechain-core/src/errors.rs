//! Errores específicos del core.
//!
//! Todos los errores fatales abortan la llamada `start()` en curso. La cache de
//! artifacts puede conservar las entradas de stages visitados antes del fallo
//! (rastro de diagnóstico).

use thiserror::Error;

use crate::stage::StageStatus;

/// Error devuelto por los cuerpos de `compute` / `get_output` de un stage de
/// usuario. El core no lo clasifica: lo propaga tal cual dentro de
/// `CoreEngineError::Stage`.
pub type StageError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum CoreEngineError {
    /// Operación invocada fuera del orden `Created -> InputSet -> Computed ->
    /// OutputRetrieved`.
    #[error("invalid stage state: `{operation}` on stage {stage} while {state:?}")]
    InvalidStageState { stage: &'static str, operation: &'static str, state: StageStatus },

    /// `get_output()` devolvió una referencia al siguiente stage sin instancia.
    #[error("unresolved stage reference: {stage} was declared but never instantiated")]
    UnresolvedStageReference { stage: &'static str },

    /// Campos sin clasificación, declaraciones duplicadas o un record que no
    /// serializa a un objeto.
    #[error("malformed schema {schema}: {reason}")]
    MalformedSchema { schema: &'static str, reason: String },

    /// Un `Carry` (o mapa de campos) no pudo convertirse al record destino.
    #[error("cannot build record {schema}: {reason}")]
    RecordDecode { schema: &'static str, reason: String },

    /// Error de usuario surgido dentro de un stage.
    #[error("stage {stage} failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: StageError,
    },
}

impl CoreEngineError {
    /// Envuelve un error de usuario asociándolo al stage donde ocurrió.
    ///
    /// Si el error ya es un `CoreEngineError` (p. ej. un `carry()?` dentro de
    /// `compute`) se devuelve sin envolver.
    pub fn from_stage(stage: &'static str, source: StageError) -> Self {
        match source.downcast::<CoreEngineError>() {
            Ok(core) => *core,
            Err(source) => CoreEngineError::Stage { stage, source },
        }
    }

    /// Nombre corto de la variante (usado en eventos y logs).
    pub fn variant_name(&self) -> &'static str {
        match self {
            CoreEngineError::InvalidStageState { .. } => "InvalidStageState",
            CoreEngineError::UnresolvedStageReference { .. } => "UnresolvedStageReference",
            CoreEngineError::MalformedSchema { .. } => "MalformedSchema",
            CoreEngineError::RecordDecode { .. } => "RecordDecode",
            CoreEngineError::Stage { .. } => "Stage",
        }
    }
}
