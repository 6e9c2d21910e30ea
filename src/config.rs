//! Configuración de la aplicación.
//!
//! Se lee de variables de entorno (previamente cargadas desde `.env` con
//! `dotenvy`). Valores inválidos producen `AppError::Config`; las variables
//! ausentes toman su valor por defecto.
use std::env;
use std::path::PathBuf;

use stagechain_core::ControllerConfig;

use crate::errors::AppError;

pub const ENV_LOG: &str = "STAGECHAIN_LOG";
pub const ENV_RECORD_EVENTS: &str = "STAGECHAIN_RECORD_EVENTS";
pub const ENV_ARTIFACT_DUMP: &str = "STAGECHAIN_ARTIFACT_DUMP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Filtro de logging (sintaxis `EnvFilter`, p. ej. `info,stagechain_core=debug`).
    pub log_filter: String,
    /// Opciones que se pasan al `Controller`.
    pub controller: ControllerConfig,
    /// Si está presente, el binario vuelca los artifacts de cada run como JSON.
    pub artifact_dump: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_filter: "info".to_string(),
               controller: ControllerConfig::default(),
               artifact_dump: None }
    }
}

impl AppConfig {
    /// Carga `.env` (si existe) y lee la configuración del entorno del proceso.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables (permite testear sin tocar el entorno global).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let mut config = Self::default();
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(raw) = lookup(ENV_RECORD_EVENTS) {
            config.controller.record_events = parse_bool(ENV_RECORD_EVENTS, &raw)?;
        }
        config.artifact_dump = lookup(ENV_ARTIFACT_DUMP).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Ok(config)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("{key} debe ser booleano, se recibió `{other}`"))),
    }
}
