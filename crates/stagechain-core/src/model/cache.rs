//! Cache de artifacts por run.
//!
//! Estructura compartida y mutable propiedad del `Controller`. La búsqueda de
//! un `run_id` desconocido devuelve un mapa vacío: es el default explícito del
//! contrato, no un error.
use std::collections::HashMap;

use indexmap::IndexMap;
use uuid::Uuid;

use super::Artifact;

/// Artifacts de un run, indexados por nombre de stage en orden de visita.
pub type RunArtifacts = IndexMap<&'static str, Artifact>;

#[derive(Debug, Default)]
pub struct ArtifactCache {
    runs: HashMap<Uuid, RunArtifacts>,
    order: Vec<Uuid>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un run vacío. Idempotente.
    pub fn open_run(&mut self, run_id: Uuid) {
        if !self.runs.contains_key(&run_id) {
            self.runs.insert(run_id, RunArtifacts::new());
            self.order.push(run_id);
        }
    }

    /// Escribe el artifact de `stage`. Una segunda escritura con la misma clave
    /// reemplaza el valor y conserva la posición original. Devuelve el
    /// artifact reemplazado, si lo había.
    pub fn record(&mut self, run_id: Uuid, stage: &'static str, artifact: Artifact) -> Option<Artifact> {
        self.open_run(run_id);
        self.runs.get_mut(&run_id).and_then(|arts| arts.insert(stage, artifact))
    }

    /// Copia de los artifacts del run; vacío si el run no existe.
    pub fn get(&self, run_id: Uuid) -> RunArtifacts {
        self.runs.get(&run_id).cloned().unwrap_or_default()
    }

    pub fn get_stage(&self, run_id: Uuid, stage: &str) -> Option<&Artifact> {
        self.runs.get(&run_id).and_then(|arts| arts.get(stage))
    }

    /// Claves de stage del run en orden de primera escritura.
    pub fn stage_names(&self, run_id: Uuid) -> Vec<&'static str> {
        self.runs.get(&run_id).map(|arts| arts.keys().copied().collect()).unwrap_or_default()
    }

    pub fn contains_run(&self, run_id: Uuid) -> bool {
        self.runs.contains_key(&run_id)
    }

    /// Runs en orden de creación.
    pub fn run_ids(&self) -> &[Uuid] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldDescriptor, Record};

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Snap {
        note: String,
    }

    impl Record for Snap {
        const NAME: &'static str = "Snap";
        const FIELDS: &'static [FieldDescriptor] = &[FieldDescriptor::residual("note", "String")];
    }

    fn artifact(note: &str) -> Artifact {
        Snap { note: note.to_string() }.derive_artifact().expect("artifact")
    }

    #[test]
    fn unknown_run_yields_empty_map() {
        let cache = ArtifactCache::new();
        assert!(cache.get(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn second_write_replaces_and_keeps_position() {
        let mut cache = ArtifactCache::new();
        let run = Uuid::new_v4();
        assert!(cache.record(run, "first", artifact("1")).is_none());
        cache.record(run, "second", artifact("2"));
        let replaced = cache.record(run, "first", artifact("1b")).expect("replaced");
        assert_eq!(replaced.get("note"), Some(&serde_json::json!("1")));

        let arts = cache.get(run);
        let keys: Vec<_> = arts.keys().copied().collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(arts["first"].get("note"), Some(&serde_json::json!("1b")));
        assert_eq!(cache.run_ids(), &[run]);
    }

    #[test]
    fn stage_lookup_per_run() {
        let mut cache = ArtifactCache::new();
        let (run, other) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(!cache.contains_run(run));

        cache.record(run, "first", artifact("1"));
        cache.record(run, "second", artifact("2"));
        cache.open_run(other);

        assert!(cache.contains_run(run) && cache.contains_run(other));
        assert_eq!(cache.get_stage(run, "second").and_then(|a| a.get("note")), Some(&serde_json::json!("2")));
        assert!(cache.get_stage(other, "second").is_none());
        assert_eq!(cache.stage_names(run), vec!["first", "second"]);
        assert!(cache.stage_names(other).is_empty());
        assert_eq!(cache.run_ids(), &[run, other]);
    }
}
