use serde::{Deserialize, Serialize};

/// Estado de una instancia de stage dentro de un run.
///
/// Las transiciones válidas son estrictamente:
/// - `Created` -> `InputSet`
/// - `InputSet` -> `Computed`
/// - `Computed` -> `OutputRetrieved`
///
/// Cualquier otra operación produce `CoreEngineError::InvalidStageState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    /// Instancia recién creada, sin input.
    Created,
    /// `set_input` enlazó el record de entrada.
    InputSet,
    /// `compute` terminó correctamente.
    Computed,
    /// `get_output` ya entregó la salida; la instancia está agotada.
    OutputRetrieved,
}
