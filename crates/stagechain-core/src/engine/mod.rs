//! Engine module: controller, builder y contexto de run.

pub mod builder;
pub mod core;
pub mod run_ctx;

pub use builder::ControllerBuilder;
pub use self::core::Controller;
pub use run_ctx::RunContext;
