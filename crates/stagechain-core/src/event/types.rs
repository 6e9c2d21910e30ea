//! Tipos de evento de un run y estructura `RunEvent`.
//!
//! Cada ejecución del `Controller` emite eventos a un `EventStore`
//! append-only. Son el rastro de diagnóstico del run: qué stages se
//! visitaron, en qué orden, qué artifacts se escribieron y dónde falló.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Primer evento de un `run_id`.
    RunStarted { initial_stage: String, engine_version: String },
    /// Un stage recibió su input. No implica éxito.
    StageStarted { index: usize, stage: String },
    /// Se escribió un artifact en la cache. `replaced` indica que pisó uno
    /// previo con la misma clave (sólo ocurre en el stage terminal).
    ArtifactRecorded {
        stage: String,
        source_type: String,
        hash: String,
        replaced: bool,
    },
    /// `compute` y `get_output` del stage terminaron correctamente.
    StageFinished { index: usize, stage: String },
    /// Error de `compute` / `get_output` del stage. `error_kind` es el nombre
    /// de la variante de `CoreEngineError`.
    StageFailed {
        index: usize,
        stage: String,
        error_kind: String,
        error: String,
    },
    /// El run abortó; ningún output fue devuelto.
    RunFailed { error_kind: String, error: String },
    /// Evento de cierre con la cantidad de stages visitados.
    RunCompleted { stage_count: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>,
}
