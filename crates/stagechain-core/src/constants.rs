//! Constantes del motor core.

/// Versión lógica del motor. Se registra en el evento `RunStarted` para poder
/// correlacionar rastros de diagnóstico con la versión que los produjo.
pub const ENGINE_VERSION: &str = "S1.0";

/// Texto usado al presentar el centinela "sin sucesor" de un stage terminal.
pub const NO_SUCCESSOR: &str = "-";
