//! Controller: orquesta un run completo y expone la discovery de la cadena.

use std::marker::PhantomData;

use log::{debug, warn};
use uuid::Uuid;

use super::builder::ControllerBuilder;
use super::run_ctx::{run_stage, RunContext};
use crate::config::ControllerConfig;
use crate::constants::ENGINE_VERSION;
use crate::errors::CoreEngineError;
use crate::event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
use crate::model::{ArtifactCache, RunArtifacts};
use crate::stage::{validate_stage, Discovery, FinalOutput, InitialStage, Successor};

/// Motor de ejecución de pipelines tipados.
///
/// Parametrizado por el stage initial `I`; el resto de la cadena se deduce
/// de los `Next` declarados. La cache de artifacts es una estructura mutable
/// compartida por todos los runs de esta instancia: usar el mismo controller
/// desde varios hilos requiere sincronización externa.
#[derive(Debug)]
pub struct Controller<I, E = InMemoryEventStore>
    where I: InitialStage,
          E: EventStore
{
    cache: ArtifactCache,
    event_store: E,
    config: ControllerConfig,
    _initial: PhantomData<fn() -> I>,
}

impl<I: InitialStage> Controller<I, InMemoryEventStore> {
    /// Controller con event store en memoria y configuración por defecto.
    pub fn new() -> Self {
        Self::with_stores(InMemoryEventStore::default(), ControllerConfig::default())
    }

    /// Builder para configurar stores y opciones.
    pub fn builder() -> ControllerBuilder<I, InMemoryEventStore> {
        ControllerBuilder::new()
    }
}

impl<I: InitialStage> Default for Controller<I, InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, E> Controller<I, E>
    where I: InitialStage,
          E: EventStore
{
    /// Falla la compilación (al monomorfizar) si el stage initial no declara
    /// sucesor.
    const INITIAL_HAS_SUCCESSOR: () =
        assert!(!<I::Next as Successor<I::Output>>::TERMINAL, "an initial stage must declare a successor stage");

    pub fn with_stores(event_store: E, config: ControllerConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::INITIAL_HAS_SUCCESSOR;
        Self { cache: ArtifactCache::new(),
               event_store,
               config,
               _initial: PhantomData }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    /// Descriptores de la cadena en orden de visita, sin ejecutar nada.
    pub fn discover(&self) -> Discovery {
        Discovery::new::<I>()
    }

    /// Valida los schemas de todos los records de la cadena.
    pub fn validate(&self) -> Result<(), CoreEngineError> {
        validate_stage::<I>()
    }

    /// Ejecuta un run completo desde `initial` hasta el stage terminal.
    ///
    /// Devuelve el output terminal y el `run_id`. Ante un error fatal no se
    /// devuelve output, pero la cache conserva los artifacts de los stages
    /// visitados (ver `run_ids` / `get_artifacts`).
    pub fn start(&mut self, initial: I::Input) -> Result<(FinalOutput<I>, Uuid), CoreEngineError> {
        self.validate()?;
        let run_id = Uuid::new_v4();
        debug!("run:start run_id={run_id} initial={}", I::name());

        let events: Option<&mut dyn EventStore> = if self.config.record_events {
            Some(&mut self.event_store)
        } else {
            None
        };
        let mut run = RunContext::new(run_id, &mut self.cache, events);
        run.emit(RunEventKind::RunStarted { initial_stage: I::name().to_string(),
                                            engine_version: ENGINE_VERSION.to_string() });

        match run_stage(I::default(), initial, &mut run) {
            Ok(output) => {
                let stage_count = run.visited();
                run.emit(RunEventKind::RunCompleted { stage_count });
                debug!("run:done run_id={run_id} stages={stage_count}");
                Ok((output, run_id))
            }
            Err(e) => {
                warn!("run:failed run_id={run_id} stages={} kind={} err={e}", run.visited(), e.variant_name());
                run.emit(RunEventKind::RunFailed { error_kind: e.variant_name().to_string(),
                                                   error: e.to_string() });
                Err(e)
            }
        }
    }

    /// Artifacts del run indexados por nombre de stage. Un `run_id`
    /// desconocido devuelve un mapa vacío.
    pub fn get_artifacts(&self, run_id: Uuid) -> RunArtifacts {
        self.cache.get(run_id)
    }

    /// Runs en orden de creación (incluye runs fallidos).
    pub fn run_ids(&self) -> &[Uuid] {
        self.cache.run_ids()
    }

    pub fn last_run_id(&self) -> Option<Uuid> {
        self.cache.run_ids().last().copied()
    }

    pub fn events_for(&self, run_id: Uuid) -> Vec<RunEvent> {
        self.event_store.list(run_id)
    }

    /// Nombres de los stages visitados por el run, en orden de ejecución.
    ///
    /// Se lee de la cache de artifacts (cada stage visitado escribe el
    /// artifact de su input antes de ejecutar), así que no depende de
    /// `record_events`.
    pub fn visited(&self, run_id: Uuid) -> Vec<String> {
        self.cache.stage_names(run_id).into_iter().map(str::to_string).collect()
    }
}
