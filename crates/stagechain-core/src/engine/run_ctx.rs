//! Contexto de un run en curso y el bucle de ejecución por stage.

use log::debug;
use uuid::Uuid;

use crate::errors::CoreEngineError;
use crate::event::{EventStore, RunEventKind};
use crate::model::{Artifact, ArtifactCache};
use crate::record::Record;
use crate::stage::{FinalOutput, Stage, StageRunner, Successor};

/// Estado mutable de un run: su `run_id`, la cache de artifacts y (opcional)
/// el event store.
pub struct RunContext<'a> {
    run_id: Uuid,
    cache: &'a mut ArtifactCache,
    events: Option<&'a mut dyn EventStore>,
    visited: usize,
}

impl<'a> RunContext<'a> {
    pub(crate) fn new(run_id: Uuid, cache: &'a mut ArtifactCache, events: Option<&'a mut dyn EventStore>) -> Self {
        cache.open_run(run_id);
        Self { run_id,
               cache,
               events,
               visited: 0 }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Stages que han recibido input en este run.
    pub fn visited(&self) -> usize {
        self.visited
    }

    pub(crate) fn emit(&mut self, kind: RunEventKind) {
        if let Some(store) = self.events.as_deref_mut() {
            store.append_kind(self.run_id, kind);
        }
    }

    pub(crate) fn record_artifact(&mut self, stage: &'static str, artifact: Artifact) {
        let source_type = artifact.source_type().name().to_string();
        let hash = artifact.hash().to_string();
        let replaced = self.cache.record(self.run_id, stage, artifact).is_some();
        debug!("artifact:record run_id={} stage={stage} source={source_type} replaced={replaced}", self.run_id);
        self.emit(RunEventKind::ArtifactRecorded { stage: stage.to_string(),
                                                   source_type,
                                                   hash,
                                                   replaced });
    }
}

/// Ejecuta `stage` con `input` y continúa por la cadena hasta el terminal.
///
/// El artifact del stage se deriva del input *antes* de `compute`, de modo que
/// refleja lo que el stage recibió.
pub(crate) fn run_stage<S: Stage>(stage: S, input: S::Input, run: &mut RunContext<'_>)
                                  -> Result<FinalOutput<S>, CoreEngineError> {
    let index = run.visited;
    run.visited += 1;
    debug!("stage:start run_id={} index={index} stage={}", run.run_id, S::name());
    run.emit(RunEventKind::StageStarted { index,
                                          stage: S::name().to_string() });

    run.record_artifact(S::name(), input.derive_artifact()?);

    let mut runner = StageRunner::new(stage);
    let yielded = runner.set_input(input)
                        .and_then(|_| runner.compute())
                        .and_then(|_| runner.get_output());
    let yielded = match yielded {
        Ok(yielded) => yielded,
        Err(e) => {
            debug!("stage:failed run_id={} index={index} stage={} kind={}", run.run_id, S::name(), e.variant_name());
            run.emit(RunEventKind::StageFailed { index,
                                                 stage: S::name().to_string(),
                                                 error_kind: e.variant_name().to_string(),
                                                 error: e.to_string() });
            return Err(e);
        }
    };

    debug!("stage:done run_id={} index={index} stage={}", run.run_id, S::name());
    run.emit(RunEventKind::StageFinished { index,
                                           stage: S::name().to_string() });

    <S::Next as Successor<S::Output>>::advance::<S>(yielded, run)
}
