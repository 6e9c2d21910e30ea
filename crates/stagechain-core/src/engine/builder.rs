//! Builder para `Controller`.
//!
//! La cadena de stages ya queda fijada por los tipos (`I` y sus `Next`), así
//! que el builder sólo reúne lo que no es estático: event store y
//! configuración.
//!
//! ```ignore
//! let controller = Controller::<InitStage>::builder()
//!     .record_events(false)
//!     .build();
//! ```

use std::marker::PhantomData;

use crate::config::ControllerConfig;
use crate::engine::Controller;
use crate::event::{EventStore, InMemoryEventStore};
use crate::stage::InitialStage;

#[derive(Debug)]
pub struct ControllerBuilder<I: InitialStage, E: EventStore> {
    event_store: E,
    config: ControllerConfig,
    _initial: PhantomData<fn() -> I>,
}

impl<I: InitialStage> ControllerBuilder<I, InMemoryEventStore> {
    pub fn new() -> Self {
        Self { event_store: InMemoryEventStore::default(),
               config: ControllerConfig::default(),
               _initial: PhantomData }
    }
}

impl<I: InitialStage> Default for ControllerBuilder<I, InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: InitialStage, E: EventStore> ControllerBuilder<I, E> {
    /// Reemplaza la configuración completa.
    #[inline]
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn record_events(mut self, enabled: bool) -> Self {
        self.config.record_events = enabled;
        self
    }

    /// Cambia el event store; el tipo del builder cambia con él.
    #[inline]
    pub fn event_store<E2: EventStore>(self, event_store: E2) -> ControllerBuilder<I, E2> {
        ControllerBuilder { event_store,
                            config: self.config,
                            _initial: PhantomData }
    }

    #[inline]
    pub fn build(self) -> Controller<I, E> {
        Controller::with_stores(self.event_store, self.config)
    }
}
