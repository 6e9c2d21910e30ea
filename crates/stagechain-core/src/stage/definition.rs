//! Definición de stages y del enlace estático al stage siguiente.
//!
//! Un stage declara tres tipos asociados: `Input`, `Output` y `Next`. `Next`
//! es otro stage (variantes Initial / Forward) o el centinela `End`
//! (variante Terminal). La compatibilidad `Next::Input == Output` se exige en
//! compilación por el bound `Next: Successor<Output>`, de modo que una cadena
//! mal tipada no compila.
//!
//! ```ignore
//! impl Stage for InitStage {
//!     type Input = InputTest;
//!     type Output = OutputTest;
//!     type Next = TerminalStageTest;   // o `End` para un stage terminal
//!     ...
//! }
//! ```

use serde::Serialize;

use crate::constants::NO_SUCCESSOR;
use crate::engine::run_ctx::{run_stage, RunContext};
use crate::errors::{CoreEngineError, StageError};
use crate::record::Record;
use crate::stage::descriptor::{describe, Link};

/// Unidad de cómputo sobre un record de entrada que produce un record de
/// salida.
///
/// `Default` es la forma en que el framework instancia stages: tanto la
/// discovery como `StageRef::next()` parten de una instancia por defecto.
pub trait Stage: Default + 'static {
    type Input: Record;
    type Output: Record;
    /// Stage siguiente, o `End` si el stage es terminal.
    type Next: Successor<Self::Output>;

    /// Identificador del stage (clave de la cache de artifacts). Por defecto
    /// el nombre corto del tipo.
    fn name() -> &'static str {
        short_type_name::<Self>()
    }

    /// Lógica de transformación del usuario. Puede leer `input` y escribir
    /// estado local del stage.
    fn compute(&mut self, input: &Self::Input) -> Result<(), StageError>;

    /// Salida del stage. Para stages no terminales devuelve
    /// `(StageRef<Next>, Output)`; para terminales sólo `Output`.
    fn get_output(&mut self, input: &Self::Input) -> Result<Yield<Self>, StageError>;
}

/// Marca el stage de entrada de un pipeline (sin predecesor). Debe declarar un
/// sucesor: `Controller` rechaza en compilación un initial con `Next = End`.
pub trait InitialStage: Stage {}

/// Lo que devuelve `get_output` para el stage `S`.
pub type Yield<S> = <<S as Stage>::Next as Successor<<S as Stage>::Output>>::Yield;

/// Output del stage terminal alcanzado desde `S`.
pub type FinalOutput<S> = <<S as Stage>::Next as Successor<<S as Stage>::Output>>::Final;

/// Centinela "sin sucesor" de los stages terminales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct End;

/// Respuesta de `discover()`: el sucesor declarado o el centinela.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NextStage {
    Stage(&'static str),
    End,
}

impl NextStage {
    pub fn name(&self) -> Option<&'static str> {
        match self {
            NextStage::Stage(name) => Some(name),
            NextStage::End => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, NextStage::End)
    }
}

impl std::fmt::Display for NextStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name().unwrap_or(NO_SUCCESSOR))
    }
}

/// Referencia al siguiente stage devuelta por `get_output`.
///
/// `Declared` sólo nombra el tipo sin instanciarlo; el controller lo rechaza
/// con `UnresolvedStageReference`.
#[derive(Debug)]
pub enum StageRef<N> {
    Instance(N),
    Declared,
}

impl<N: Stage> StageRef<N> {
    /// Instancia por defecto del stage siguiente (caso habitual).
    pub fn next() -> Self {
        StageRef::Instance(N::default())
    }

    /// Stage siguiente ya configurado por el stage actual.
    pub fn instance(stage: N) -> Self {
        StageRef::Instance(stage)
    }

    pub fn declared() -> Self {
        StageRef::Declared
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, StageRef::Instance(_))
    }

    pub fn resolve(self) -> Result<N, CoreEngineError> {
        match self {
            StageRef::Instance(stage) => Ok(stage),
            StageRef::Declared => Err(CoreEngineError::UnresolvedStageReference { stage: N::name() }),
        }
    }
}

/// Enlace tipado entre un stage con salida `O` y lo que viene después.
///
/// Implementado por todo `Stage` cuyo `Input` es `O` (stage siguiente) y por
/// `End`. No se implementa a mano.
pub trait Successor<O: Record>: Sized + 'static {
    /// Valor devuelto por `get_output` del stage predecesor.
    type Yield;
    /// Output del stage terminal de la cadena restante.
    type Final: Record;
    /// `true` sólo para `End`.
    const TERMINAL: bool;

    fn next_stage() -> NextStage;

    #[doc(hidden)]
    fn link() -> Option<Link>;

    #[doc(hidden)]
    fn validate_chain() -> Result<(), CoreEngineError>;

    #[doc(hidden)]
    fn advance<S>(yielded: Self::Yield, run: &mut RunContext<'_>) -> Result<Self::Final, CoreEngineError>
        where S: Stage<Output = O, Next = Self>;
}

impl<O, N> Successor<O> for N
    where O: Record,
          N: Stage<Input = O>
{
    type Yield = (StageRef<N>, O);
    type Final = FinalOutput<N>;
    const TERMINAL: bool = false;

    fn next_stage() -> NextStage {
        NextStage::Stage(N::name())
    }

    fn link() -> Option<Link> {
        Some(describe::<N>)
    }

    fn validate_chain() -> Result<(), CoreEngineError> {
        validate_stage::<N>()
    }

    fn advance<S>(yielded: Self::Yield, run: &mut RunContext<'_>) -> Result<Self::Final, CoreEngineError>
        where S: Stage<Output = O, Next = Self>
    {
        let (next_ref, output) = yielded;
        let next = next_ref.resolve()?;
        run_stage(next, output, run)
    }
}

impl<O: Record> Successor<O> for End {
    type Yield = O;
    type Final = O;
    const TERMINAL: bool = true;

    fn next_stage() -> NextStage {
        NextStage::End
    }

    fn link() -> Option<Link> {
        None
    }

    fn validate_chain() -> Result<(), CoreEngineError> {
        Ok(())
    }

    fn advance<S>(output: O, run: &mut RunContext<'_>) -> Result<O, CoreEngineError>
        where S: Stage<Output = O, Next = Self>
    {
        // El artifact de salida reemplaza al de entrada bajo la misma clave.
        let artifact = output.derive_artifact()?;
        run.record_artifact(S::name(), artifact);
        Ok(output)
    }
}

/// Sucesor declarado por `S`, consultado sólo por tipo (sin instancia ni
/// ejecución).
pub fn discover<S: Stage>() -> NextStage {
    <S::Next as Successor<S::Output>>::next_stage()
}

/// `true` si `S` es un stage terminal.
pub fn is_terminal<S: Stage>() -> bool {
    <S::Next as Successor<S::Output>>::TERMINAL
}

/// Valida los schemas de entrada/salida de `S` y de todos sus sucesores.
pub fn validate_stage<S: Stage>() -> Result<(), CoreEngineError> {
    S::Input::validate_schema()?;
    S::Output::validate_schema()?;
    <S::Next as Successor<S::Output>>::validate_chain()
}

/// Último segmento de `type_name`, sin parámetros genéricos.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod nested {
        pub struct Deep<T>(pub T);
    }

    #[test]
    fn short_type_name_strips_path_and_generics() {
        assert_eq!(short_type_name::<nested::Deep<String>>(), "Deep");
        assert_eq!(short_type_name::<End>(), "End");
    }

    #[test]
    fn next_stage_display_uses_sentinel() {
        assert_eq!(NextStage::End.to_string(), NO_SUCCESSOR);
        assert_eq!(NextStage::Stage("Parse").to_string(), "Parse");
        assert!(NextStage::End.is_end());
    }
}
