use stagechain_core::CoreEngineError;
use thiserror::Error;

/// Errores de la aplicación (binario y helpers de la librería raíz).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error del motor: {0}")]
    Engine(#[from] CoreEngineError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Error al iniciar logging: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_variant_format() {
        let err = AppError::Config("mala configuración".into());
        assert_eq!(err.to_string(), "Error de configuración: mala configuración");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: AppError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_engine_variant_from() {
        let err: AppError = CoreEngineError::UnresolvedStageReference { stage: "Tokenize" }.into();
        assert!(err.to_string().starts_with("Error del motor: unresolved stage reference"));
    }
}
