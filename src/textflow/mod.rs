//! Pipeline de demostración sobre documentos de texto.
//!
//! `Normalize` (initial) -> `Tokenize` (forward) -> `Summarize` (terminal).
//! `run_demo` ejecuta un run por documento con el mismo `Controller` y
//! opcionalmente vuelca los artifacts de cada run a un archivo JSON.

pub mod records;
pub mod stages;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use stagechain_core::{Controller, RunArtifacts};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;

pub use records::{Normalized, RawDocument, Summary, TokenStats};
pub use stages::{Normalize, Summarize, Tokenize};

/// Controller del pipeline de texto.
pub type TextController = Controller<Normalize>;

/// Resultado de un run de la demo.
#[derive(Debug, Clone, Serialize)]
pub struct DemoRun {
    pub run_id: Uuid,
    pub summary: Summary,
    pub artifacts: RunArtifacts,
}

#[derive(Serialize)]
struct ArtifactDump<'a> {
    generated_at: DateTime<Utc>,
    runs: &'a [DemoRun],
}

/// Documentos de ejemplo usados por el binario.
pub fn sample_documents() -> Vec<RawDocument> {
    vec![RawDocument { doc_id: "doc-1".into(),
                       body: "The quick brown fox jumps over the lazy dog. The dog sleeps.".into(),
                       origin: "memory://samples/fox".into() },
         RawDocument { doc_id: "doc-2".into(),
                       body: "Stages carry fields forward; residual fields stay behind, stay put!".into(),
                       origin: "memory://samples/stages".into() },]
}

/// Ejecuta el pipeline sobre `documents` y devuelve un `DemoRun` por documento.
pub fn run_demo(config: &AppConfig, documents: Vec<RawDocument>) -> Result<Vec<DemoRun>, AppError> {
    let mut controller = TextController::builder().config(config.controller.clone()).build();
    for descriptor in controller.discover() {
        info!("demo:discover index={} stage={} role={:?} next={}",
              descriptor.index, descriptor.stage_name, descriptor.role, descriptor.next_stage);
    }

    let mut runs = Vec::with_capacity(documents.len());
    for document in documents {
        let (summary, run_id) = controller.start(document)?;
        info!("demo:run run_id={} doc_id={} tokens={} top={:?}",
              run_id, summary.doc_id, summary.token_count, summary.top_terms);
        runs.push(DemoRun { run_id,
                            summary,
                            artifacts: controller.get_artifacts(run_id) });
    }

    if let Some(path) = &config.artifact_dump {
        dump_artifacts(path, &runs)?;
    }
    Ok(runs)
}

/// Escribe los runs (con sus artifacts) como JSON legible.
pub fn dump_artifacts(path: &Path, runs: &[DemoRun]) -> Result<(), AppError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &ArtifactDump { generated_at: Utc::now(),
                                                         runs })?;
    info!("demo:dump path={} runs={}", path.display(), runs.len());
    Ok(())
}
