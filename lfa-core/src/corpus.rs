//! # Corpus Anotado por Fontes (LFs)
//!
//! Em supervisão fraca, várias **funções de rotulagem** (LFs) independentes e
//! possivelmente ruidosas anotam o mesmo corpus: cada uma atribui spans
//! rotulados a faixas de tokens de cada documento. O motor de análise não
//! tokeniza nem executa LFs — ele consome um corpus já anotado através da
//! capacidade [`Document`].
//!
//! ## O contrato `Document`
//!
//! Qualquer tipo concreto serve para a análise desde que exponha:
//! - `token_count()`: quantos tokens o documento tem;
//! - `source_names()`: quais fontes anotaram o documento;
//! - `spans_for(fonte)`: os spans (início, fim, rótulo) daquela fonte.
//!
//! ## Corpus de Demonstração
//!
//! O módulo inclui um pequeno corpus PT-BR anotado por três LFs simuladas,
//! com sobreposições e conflitos deliberados:
//!
//! | Fonte            | Estratégia simulada                          |
//! |------------------|----------------------------------------------|
//! | `lf_gazetteer`   | listas de entidades conhecidas (precisa)     |
//! | `lf_maiusculas`  | palavras capitalizadas viram PER (ruidosa)   |
//! | `lf_siglas`      | siglas em caixa alta viram ORG (específica)  |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Um span de tokens contíguos com um rótulo associado.
///
/// # Exemplo
/// Em "Rio de Janeiro", o span inteiro:
/// `Span { start: 0, end: 3, label: "LOC" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Índice do token inicial (inclusivo)
    pub start: usize,
    /// Índice do token final (exclusivo)
    pub end: usize,
    /// Rótulo atribuído pela fonte (ex: "PER", "B-DATE")
    pub label: String,
}

impl Span {
    pub fn new(start: usize, end: usize, label: &str) -> Self {
        Self {
            start,
            end,
            label: label.to_string(),
        }
    }
}

/// Capacidade mínima que um documento precisa expor para ser analisado.
///
/// O motor só enxerga contagem de tokens e spans por fonte; representação de
/// texto, offsets de byte e tokenização ficam por conta do chamador.
pub trait Document {
    /// Quantidade de tokens do documento.
    fn token_count(&self) -> usize;

    /// Nomes das fontes que anotaram este documento, em ordem estável.
    fn source_names(&self) -> Vec<&str>;

    /// Spans atribuídos por uma fonte; vazio se a fonte não anotou
    /// este documento.
    fn spans_for(&self, source: &str) -> &[Span];
}

/// Documento concreto: lista de tokens + mapa fonte → spans.
///
/// O mapa é um `BTreeMap` para que a ordem das fontes derivada do corpus
/// seja determinística entre construções (invariante de idempotência do
/// motor).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Tokens do documento, na ordem original.
    pub tokens: Vec<String>,
    /// Spans de cada fonte, indexados pelo nome da fonte.
    pub annotations: BTreeMap<String, Vec<Span>>,
}

impl AnnotatedDocument {
    /// Cria um documento a partir dos tokens, sem anotações.
    pub fn new<S: Into<String>>(tokens: Vec<S>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            annotations: BTreeMap::new(),
        }
    }

    /// Registra um span de uma fonte (estilo builder, para corpus de teste).
    pub fn with_span(mut self, source: &str, start: usize, end: usize, label: &str) -> Self {
        self.annotate(source, Span::new(start, end, label));
        self
    }

    /// Adiciona um span à lista de uma fonte.
    pub fn annotate(&mut self, source: &str, span: Span) {
        self.annotations
            .entry(source.to_string())
            .or_default()
            .push(span);
    }
}

impl Document for AnnotatedDocument {
    fn token_count(&self) -> usize {
        self.tokens.len()
    }

    fn source_names(&self) -> Vec<&str> {
        self.annotations.keys().map(String::as_str).collect()
    }

    fn spans_for(&self, source: &str) -> &[Span] {
        self.annotations
            .get(source)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Vocabulário usado pelo corpus de demonstração.
pub fn demo_labels() -> Vec<String> {
    ["O", "PER", "ORG", "LOC"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Corpus PT-BR de demonstração com três LFs simuladas.
///
/// As anotações foram desenhadas para exercitar os três fenômenos que o
/// motor mede:
/// - **cobertura**: `lf_siglas` só anota siglas; `lf_maiusculas` anota muito;
/// - **sobreposição**: "Lula" e "BNDES" recebem anotação de duas fontes;
/// - **conflito**: "Petrobras" (ORG × PER) e "São Paulo" (LOC × PER).
pub fn demo_corpus() -> Vec<AnnotatedDocument> {
    vec![
        // "Lula visitou a Petrobras no Rio de Janeiro ."
        AnnotatedDocument::new(vec![
            "Lula", "visitou", "a", "Petrobras", "no", "Rio", "de", "Janeiro", ".",
        ])
        .with_span("lf_gazetteer", 0, 1, "PER")
        .with_span("lf_gazetteer", 3, 4, "ORG")
        .with_span("lf_gazetteer", 5, 8, "LOC")
        .with_span("lf_maiusculas", 0, 1, "PER")
        .with_span("lf_maiusculas", 3, 4, "PER"),
        // "O BNDES financiou obras em São Paulo ."
        AnnotatedDocument::new(vec![
            "O", "BNDES", "financiou", "obras", "em", "São", "Paulo", ".",
        ])
        .with_span("lf_siglas", 1, 2, "ORG")
        .with_span("lf_gazetteer", 5, 7, "LOC")
        .with_span("lf_maiusculas", 1, 2, "ORG")
        .with_span("lf_maiusculas", 5, 7, "PER"),
        // "A Embrapa pesquisa o cerrado ."
        AnnotatedDocument::new(vec!["A", "Embrapa", "pesquisa", "o", "cerrado", "."])
            .with_span("lf_siglas", 1, 2, "ORG"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_for_unknown_source_is_empty() {
        let doc = AnnotatedDocument::new(vec!["a", "b"]);
        assert!(doc.spans_for("lf_inexistente").is_empty());
    }

    #[test]
    fn test_annotate_accumulates() {
        let mut doc = AnnotatedDocument::new(vec!["a", "b", "c"]);
        doc.annotate("lf_x", Span::new(0, 1, "PER"));
        doc.annotate("lf_x", Span::new(2, 3, "LOC"));
        assert_eq!(doc.spans_for("lf_x").len(), 2);
        assert_eq!(doc.source_names(), vec!["lf_x"]);
    }

    #[test]
    fn test_source_names_sorted() {
        let doc = AnnotatedDocument::new(vec!["a"])
            .with_span("lf_z", 0, 1, "PER")
            .with_span("lf_a", 0, 1, "PER");
        // BTreeMap garante ordem lexicográfica
        assert_eq!(doc.source_names(), vec!["lf_a", "lf_z"]);
    }

    #[test]
    fn test_demo_corpus_spans_within_bounds() {
        for doc in demo_corpus() {
            for source in doc.source_names() {
                for span in doc.spans_for(source) {
                    assert!(span.start < span.end);
                    assert!(span.end <= doc.token_count());
                }
            }
        }
    }
}
