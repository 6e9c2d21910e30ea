//! Stages: unidades de cómputo encadenadas por tipo.
//!
//! - `Stage`: interfaz implementada por el usuario (Input / Output / Next).
//! - `End`: centinela de stage terminal.
//! - `StageRunner`: máquina de estados por instancia.
//! - `Discovery`: recorrido de la cadena sin ejecutarla.

pub mod definition;
pub mod descriptor;
pub mod runner;
mod status;

pub use definition::{discover, is_terminal, short_type_name, validate_stage, End, FinalOutput, InitialStage, NextStage,
                     Stage, StageRef, Successor, Yield};
pub use descriptor::{discover_chain, Discovery, StageDescriptor, StageRole};
pub use runner::StageRunner;
pub use status::StageStatus;
