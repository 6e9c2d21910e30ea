//! Stages del pipeline de texto: `Normalize -> Tokenize -> Summarize`.
use std::collections::HashMap;

use log::debug;
use stagechain_core::{End, InitialStage, Record, Stage, StageError, StageRef, Yield};

use super::records::{Normalized, RawDocument, Summary, TokenStats};

/// Cantidad de términos que conserva el resumen.
pub const TOP_TERMS: usize = 3;

/// Initial: normaliza el cuerpo del documento.
#[derive(Debug, Default)]
pub struct Normalize {
    text: Option<String>,
}

impl Stage for Normalize {
    type Input = RawDocument;
    type Output = Normalized;
    type Next = Tokenize;

    fn compute(&mut self, input: &RawDocument) -> Result<(), StageError> {
        self.text = Some(normalize_text(&input.body));
        Ok(())
    }

    fn get_output(&mut self, input: &RawDocument) -> Result<Yield<Self>, StageError> {
        let text = self.text.take().ok_or("normalize: compute was not run")?;
        let output = Normalized { doc_id: input.doc_id.clone(),
                                  text,
                                  raw_len: input.body.chars().count() };
        Ok((StageRef::next(), output))
    }
}

impl InitialStage for Normalize {}

/// Forward: parte el texto en tokens.
#[derive(Debug, Default)]
pub struct Tokenize {
    tokens: Vec<String>,
}

impl Stage for Tokenize {
    type Input = Normalized;
    type Output = TokenStats;
    type Next = Summarize;

    fn compute(&mut self, input: &Normalized) -> Result<(), StageError> {
        self.tokens = input.text.split_whitespace().map(str::to_string).collect();
        debug!("tokenize:done doc_id={} tokens={}", input.doc_id, self.tokens.len());
        Ok(())
    }

    fn get_output(&mut self, input: &Normalized) -> Result<Yield<Self>, StageError> {
        let tokens = std::mem::take(&mut self.tokens);
        // doc_id viaja como campo carried; el resto se agrega sobre el carry.
        let output: TokenStats = input.carry()?
                                      .without("text")
                                      .with("token_count", tokens.len())?
                                      .with("tokens", &tokens)?
                                      .into_record()?;
        Ok((StageRef::next(), output))
    }
}

/// Terminal: se queda con los términos más frecuentes.
#[derive(Debug, Default)]
pub struct Summarize {
    top_terms: Vec<String>,
}

impl Stage for Summarize {
    type Input = TokenStats;
    type Output = Summary;
    type Next = End;

    fn compute(&mut self, input: &TokenStats) -> Result<(), StageError> {
        self.top_terms = top_terms(&input.tokens, TOP_TERMS);
        Ok(())
    }

    fn get_output(&mut self, input: &TokenStats) -> Result<Summary, StageError> {
        Ok(Summary { doc_id: input.doc_id.clone(),
                     token_count: input.token_count,
                     top_terms: std::mem::take(&mut self.top_terms) })
    }
}

/// Minúsculas, puntuación a espacio y espacios colapsados.
pub fn normalize_text(body: &str) -> String {
    let cleaned: String = body.chars()
                              .map(|c| if c.is_alphanumeric() { c.to_lowercase().next().unwrap_or(c) } else { ' ' })
                              .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Los `limit` términos más frecuentes; empates por orden alfabético.
pub fn top_terms(tokens: &[String], limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(limit).map(|(term, _)| term.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_and_lowercases() {
        assert_eq!(normalize_text("  Hola,   MUNDO!\n¿Qué tal? "), "hola mundo qué tal");
        assert_eq!(normalize_text("...!!!"), "");
    }

    #[test]
    fn top_terms_breaks_ties_alphabetically() {
        let tokens: Vec<String> = "b a c a b d".split(' ').map(str::to_string).collect();
        assert_eq!(top_terms(&tokens, 3), vec!["a", "b", "c"]);
        assert!(top_terms(&[], 3).is_empty());
    }
}
