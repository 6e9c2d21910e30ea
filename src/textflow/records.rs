//! Records del pipeline de texto.
use stagechain_core::record;

record! {
    /// Documento tal como llega al pipeline.
    pub struct RawDocument {
        pub doc_id: String => Carried,
        pub body: String => Carried,
        /// Procedencia (ruta, URL...). Sólo queda en el artifact del stage inicial.
        pub origin: String => Residual,
    }
}

record! {
    /// Texto normalizado: minúsculas, sin puntuación, espacios colapsados.
    pub struct Normalized {
        pub doc_id: String => Carried,
        pub text: String => Carried,
        pub raw_len: usize => Residual,
    }
}

record! {
    pub struct TokenStats {
        pub doc_id: String => Carried,
        pub tokens: Vec<String> => Residual,
        pub token_count: usize => Carried,
    }
}

record! {
    /// Resumen final de un documento.
    pub struct Summary {
        pub doc_id: String => Carried,
        pub token_count: usize => Carried,
        pub top_terms: Vec<String> => Carried,
    }
}
