//! StageChain
//!
//! Librería raíz del workspace:
//! - Usa `stagechain_core` (records, stages, controller) como motor.
//! - Expone `config`, `errors` y `logging` para el binario.
//! - `textflow` contiene un pipeline de ejemplo de tres stages.

pub mod config;
pub mod errors;
pub mod logging;
pub mod textflow;

#[cfg(test)]
mod tests {
    use super::errors::AppError;

    #[test]
    fn app_error_tests() {
        let e = AppError::Logging("x".into()).to_string();
        assert_eq!(e, "Error al iniciar logging: x");
    }
}
