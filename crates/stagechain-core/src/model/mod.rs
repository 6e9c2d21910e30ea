//! Modelos neutrales del core (Artifact, cache de artifacts por run).

pub mod artifact;
pub mod cache;

pub use artifact::Artifact;
pub use cache::{ArtifactCache, RunArtifacts};
