//! Discovery: recorrido de la cadena de stages por tipo, sin ejecutarla.
//!
//! Cada paso del iterador resuelve el sucesor declarado del stage actual a
//! través de un puntero a función monomorfizado (`Link`), por lo que la
//! secuencia es perezosa, finita y reiniciable (`Discovery: Clone`). No crea
//! instancias de stages ni toca datos del pipeline.

use std::iter::FusedIterator;

use serde::Serialize;

use super::definition::{InitialStage, NextStage, Stage, Successor};
use crate::record::Record;

/// Variante de un stage dentro de la cadena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StageRole {
    Initial,
    Forward,
    Terminal,
}

/// Descripción de un stage para inspección (tabla, grafo, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageDescriptor {
    /// Posición en orden de visita (0 = initial).
    pub index: usize,
    pub stage_name: &'static str,
    pub role: StageRole,
    pub input_type: &'static str,
    pub output_type: &'static str,
    /// Sucesor declarado; `NextStage::End` para el terminal.
    pub next_stage: NextStage,
}

#[doc(hidden)]
pub struct LinkInfo {
    stage_name: &'static str,
    input_type: &'static str,
    output_type: &'static str,
    next_stage: NextStage,
    next: Option<Link>,
}

#[doc(hidden)]
pub type Link = fn() -> LinkInfo;

pub(crate) fn describe<S: Stage>() -> LinkInfo {
    LinkInfo { stage_name: S::name(),
               input_type: S::Input::NAME,
               output_type: S::Output::NAME,
               next_stage: <S::Next as Successor<S::Output>>::next_stage(),
               next: <S::Next as Successor<S::Output>>::link() }
}

/// Secuencia de descriptores desde un stage initial hasta el terminal.
#[derive(Debug, Clone)]
pub struct Discovery {
    next: Option<Link>,
    index: usize,
}

impl Discovery {
    pub fn new<I: InitialStage>() -> Self {
        Self { next: Some(describe::<I>),
               index: 0 }
    }
}

impl Iterator for Discovery {
    type Item = StageDescriptor;

    fn next(&mut self) -> Option<StageDescriptor> {
        let info = (self.next.take()?)();
        self.next = info.next;
        let role = if self.index == 0 {
            StageRole::Initial
        } else if info.next_stage.is_end() {
            StageRole::Terminal
        } else {
            StageRole::Forward
        };
        let descriptor = StageDescriptor { index: self.index,
                                           stage_name: info.stage_name,
                                           role,
                                           input_type: info.input_type,
                                           output_type: info.output_type,
                                           next_stage: info.next_stage };
        self.index += 1;
        Some(descriptor)
    }
}

impl FusedIterator for Discovery {}

/// Atajo de `Discovery::new::<I>()`.
pub fn discover_chain<I: InitialStage>() -> Discovery {
    Discovery::new::<I>()
}
