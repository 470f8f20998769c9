//! # Resolução de Fontes
//!
//! Determina o conjunto ordenado de fontes (LFs) que participam da análise e
//! atribui a cada uma um índice de coluna fixo na matriz token × fonte.
//!
//! Se o chamador fornece uma lista explícita, ela é deduplicada preservando a
//! primeira ocorrência. Caso contrário, o conjunto é a união das fontes que
//! aparecem em qualquer documento do corpus, na ordem de primeira aparição —
//! estável entre construções, mas dependente do corpus.

use std::collections::HashMap;

use crate::corpus::Document;
use crate::error::AnalysisError;

/// Conjunto ordenado de fontes com índices de coluna fixos.
#[derive(Debug, Clone)]
pub struct SourceSet {
    names: Vec<String>,
    name_to_col: HashMap<String, usize>,
}

impl SourceSet {
    /// Resolve as fontes da análise.
    ///
    /// Fontes ausentes de um documento simplesmente não contribuem células
    /// não-nulas naquele bloco da matriz; fontes do corpus fora da lista
    /// explícita são ignoradas por completo.
    pub fn resolve<D: Document>(
        corpus: &[D],
        explicit: Option<Vec<String>>,
    ) -> Result<Self, AnalysisError> {
        let mut names: Vec<String> = Vec::new();
        match explicit {
            Some(list) => {
                for name in list {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
            None => {
                for doc in corpus {
                    for name in doc.source_names() {
                        if !names.iter().any(|n| n == name) {
                            names.push(name.to_string());
                        }
                    }
                }
            }
        }

        if names.is_empty() {
            return Err(AnalysisError::NoSources);
        }

        let name_to_col = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Ok(Self { names, name_to_col })
    }

    /// Nomes das fontes, em ordem de coluna.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Índice de coluna de uma fonte.
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.name_to_col.get(name).copied()
    }

    /// Quantidade de fontes (colunas da matriz).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::AnnotatedDocument;

    #[test]
    fn test_explicit_list_deduplicated_in_order() {
        let corpus: Vec<AnnotatedDocument> = vec![];
        let set = SourceSet::resolve(
            &corpus,
            Some(vec![
                "lf_b".to_string(),
                "lf_a".to_string(),
                "lf_b".to_string(),
            ]),
        )
        .unwrap();
        assert_eq!(set.names(), &["lf_b", "lf_a"]);
        assert_eq!(set.column_of("lf_a"), Some(1));
    }

    #[test]
    fn test_corpus_union_in_first_appearance_order() {
        let corpus = vec![
            AnnotatedDocument::new(vec!["x"]).with_span("lf_c", 0, 1, "PER"),
            AnnotatedDocument::new(vec!["y"])
                .with_span("lf_a", 0, 1, "PER")
                .with_span("lf_c", 0, 1, "ORG"),
        ];
        let set = SourceSet::resolve(&corpus, None).unwrap();
        assert_eq!(set.names(), &["lf_c", "lf_a"]);
    }

    #[test]
    fn test_no_sources_is_an_error() {
        let corpus = vec![AnnotatedDocument::new(vec!["x", "y"])];
        assert_eq!(
            SourceSet::resolve(&corpus, None).unwrap_err(),
            AnalysisError::NoSources
        );
        assert_eq!(
            SourceSet::resolve(&corpus, Some(vec![])).unwrap_err(),
            AnalysisError::NoSources
        );
    }
}
