//! Máquina de estados de una instancia de stage.

use log::debug;

use super::definition::{discover, NextStage, Stage, Yield};
use super::StageStatus;
use crate::errors::CoreEngineError;

/// Envuelve un stage de usuario y fuerza el orden
/// `set_input -> compute -> get_output`.
///
/// Puede usarse sin controller para avanzar stages a mano:
///
/// ```ignore
/// let mut first = StageRunner::new(InitStage::default());
/// first.set_input(input)?;
/// first.compute()?;
/// let (next, output) = first.get_output()?;
/// ```
#[derive(Debug)]
pub struct StageRunner<S: Stage> {
    stage: S,
    input: Option<S::Input>,
    status: StageStatus,
}

impl<S: Stage> StageRunner<S> {
    pub fn new(stage: S) -> Self {
        Self { stage,
               input: None,
               status: StageStatus::Created }
    }

    pub fn name(&self) -> &'static str {
        S::name()
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn input(&self) -> Option<&S::Input> {
        self.input.as_ref()
    }

    /// Sucesor declarado; válido en cualquier estado, incluso `Created`.
    pub fn discover(&self) -> NextStage {
        discover::<S>()
    }

    pub fn set_input(&mut self, input: S::Input) -> Result<(), CoreEngineError> {
        self.require(StageStatus::Created, "set_input")?;
        self.input = Some(input);
        self.status = StageStatus::InputSet;
        Ok(())
    }

    pub fn compute(&mut self) -> Result<(), CoreEngineError> {
        self.require(StageStatus::InputSet, "compute")?;
        let input = self.input.as_ref().ok_or(CoreEngineError::InvalidStageState { stage: S::name(),
                                                                                  operation: "compute",
                                                                                  state: self.status })?;
        self.stage.compute(input).map_err(|e| CoreEngineError::from_stage(S::name(), e))?;
        self.status = StageStatus::Computed;
        Ok(())
    }

    pub fn get_output(&mut self) -> Result<Yield<S>, CoreEngineError> {
        self.require(StageStatus::Computed, "get_output")?;
        let input = self.input.as_ref().ok_or(CoreEngineError::InvalidStageState { stage: S::name(),
                                                                                  operation: "get_output",
                                                                                  state: self.status })?;
        let out = self.stage.get_output(input).map_err(|e| CoreEngineError::from_stage(S::name(), e))?;
        self.status = StageStatus::OutputRetrieved;
        Ok(out)
    }

    fn require(&self, expected: StageStatus, operation: &'static str) -> Result<(), CoreEngineError> {
        if self.status == expected {
            return Ok(());
        }
        debug!("stage:reject stage={} op={operation} state={:?}", S::name(), self.status);
        Err(CoreEngineError::InvalidStageState { stage: S::name(),
                                                 operation,
                                                 state: self.status })
    }
}
