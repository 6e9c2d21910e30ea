//! Inicialización del backend de logging del binario.
//!
//! El core emite por la fachada `log`; `tracing-subscriber` (con el puente
//! `tracing-log`) recoge esos registros y los formatea.
use tracing_subscriber::EnvFilter;

use crate::errors::AppError;

pub fn init_logging(filter: &str) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(filter).map_err(|e| AppError::Logging(e.to_string()))?;
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_target(true)
                             .try_init()
                             .map_err(|e| AppError::Logging(e.to_string()))
}
