//! Configuración del controller.

/// Opciones del `Controller`. El binario las construye desde variables de
/// entorno; el core sólo conoce los valores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Emitir eventos de run al `EventStore`. Desactivarlo no afecta a la
    /// cache de artifacts.
    pub record_events: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { record_events: true }
    }
}
