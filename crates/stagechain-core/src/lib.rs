//! stagechain-core: motor de pipelines tipados por stages.
//!
//! - `record`: records con campos `Carried` / `Residual` y su partición en
//!   carry + artifact.
//! - `stage`: stages initial / forward / terminal encadenados por tipo.
//! - `engine`: `Controller` (run completo, cache de artifacts, discovery).
//! - `event`: rastro append-only de cada run.
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod record;
pub mod stage;

pub use config::ControllerConfig;
pub use engine::{Controller, ControllerBuilder, RunContext};
pub use errors::{CoreEngineError, StageError};
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use model::{Artifact, ArtifactCache, RunArtifacts};
pub use record::{Carry, FieldClass, FieldDescriptor, Record, SchemaRef};
pub use stage::{discover, discover_chain, Discovery, End, FinalOutput, InitialStage, NextStage, Stage, StageDescriptor,
                StageRef, StageRole, StageRunner, StageStatus, Yield};

// `record!` se exporta en la raíz vía #[macro_export].
