//! # Matriz Token × Fonte
//!
//! Converte o corpus anotado na matriz `L` de dimensões
//! `(total de tokens, número de fontes)`, onde `L[i, j]` é o índice do
//! rótulo que a fonte `j` atribuiu ao token `i`, ou 0 na ausência de
//! anotação. O valor 0 e o rótulo nulo `"O"` são indistinguíveis por
//! construção.
//!
//! ## Invariantes
//!
//! - As linhas concatenam os documentos na ordem do corpus; a identidade
//!   linha ↔ token é estável durante toda a vida do motor.
//! - Toda célula está em `[0, num_rotulos - 1]`.
//! - A forma densa e a forma esparsa (CSR) descrevem a mesma matriz e são
//!   materializadas uma única vez, na construção.
//!
//! ## Pintura de spans
//!
//! Cada span pinta `L[start..end, coluna]` com seu índice de rótulo. Spans
//! aplicados depois sobrescrevem células já pintadas (último vence), e o fim
//! do span é limitado ao tamanho do documento. Rótulos fora do vocabulário
//! indexado são ignorados com um aviso.

use tracing::warn;

use crate::corpus::Document;
use crate::label_index::LabelIndex;
use crate::sources::SourceSet;

/// Matriz de rótulos token × fonte, imutável após a construção.
///
/// Mantém a forma densa (row-major) para acesso direto `get(i, j)` e a
/// forma CSR (apenas células não-nulas) para as reduções por linha e por
/// coluna das estatísticas.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMatrix {
    rows: usize,
    cols: usize,
    /// Células em ordem row-major: `dense[i * cols + j]`.
    dense: Vec<u16>,
    /// CSR: início de cada linha em `col_idx`/`values` (`rows + 1` entradas).
    row_ptr: Vec<usize>,
    /// CSR: coluna de cada célula não-nula.
    col_idx: Vec<usize>,
    /// CSR: valor (índice de rótulo) de cada célula não-nula.
    values: Vec<u16>,
}

impl LabelMatrix {
    /// Constrói a matriz pintando os spans de cada documento, bloco a bloco.
    pub fn build<D: Document>(
        corpus: &[D],
        sources: &SourceSet,
        labels: &LabelIndex,
    ) -> LabelMatrix {
        let cols = sources.len();
        let rows: usize = corpus.iter().map(|doc| doc.token_count()).sum();
        let mut dense = vec![0u16; rows * cols];

        let mut offset = 0usize;
        for doc in corpus {
            let n = doc.token_count();
            for (col, source) in sources.names().iter().enumerate() {
                for span in doc.spans_for(source) {
                    let label_idx = match labels.resolve(&span.label) {
                        Some(idx) => idx,
                        None => {
                            warn!(
                                label = %span.label,
                                source = %source,
                                "rótulo de span fora do vocabulário indexado; span ignorado"
                            );
                            continue;
                        }
                    };
                    let end = span.end.min(n);
                    for t in span.start..end {
                        dense[(offset + t) * cols + col] = label_idx;
                    }
                }
            }
            offset += n;
        }

        // Forma esparsa derivada da densa, uma única vez
        let mut row_ptr = Vec::with_capacity(rows + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        row_ptr.push(0);
        for i in 0..rows {
            for j in 0..cols {
                let v = dense[i * cols + j];
                if v != 0 {
                    col_idx.push(j);
                    values.push(v);
                }
            }
            row_ptr.push(col_idx.len());
        }

        LabelMatrix {
            rows,
            cols,
            dense,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Número de linhas (tokens do corpus).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Número de colunas (fontes).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Célula `L[i, j]` na forma densa.
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.dense[row * self.cols + col]
    }

    /// Linha densa completa do token `i`.
    pub fn row(&self, row: usize) -> &[u16] {
        &self.dense[row * self.cols..(row + 1) * self.cols]
    }

    /// Células não-nulas da linha `i`: (colunas, valores) alinhados.
    pub fn row_nonzeros(&self, row: usize) -> (&[usize], &[u16]) {
        let span = self.row_ptr[row]..self.row_ptr[row + 1];
        (&self.col_idx[span.clone()], &self.values[span])
    }

    /// Itera todas as células não-nulas como `(linha, coluna, valor)`.
    pub fn nonzeros(&self) -> impl Iterator<Item = (usize, usize, u16)> + '_ {
        (0..self.rows).flat_map(move |i| {
            let (cols, vals) = self.row_nonzeros(i);
            cols.iter().zip(vals).map(move |(&j, &v)| (i, j, v))
        })
    }

    /// Quantidade total de células não-nulas.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::AnnotatedDocument;
    use crate::error::AnalysisError;

    fn vocab(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn build_all(
        corpus: &[AnnotatedDocument],
        labels: &[&str],
        strict: bool,
    ) -> Result<(LabelMatrix, SourceSet, LabelIndex), AnalysisError> {
        let index = LabelIndex::build(&vocab(labels), strict)?;
        let sources = SourceSet::resolve(corpus, None)?;
        let matrix = LabelMatrix::build(corpus, &sources, &index);
        Ok((matrix, sources, index))
    }

    #[test]
    fn test_span_painting_and_null_cells() {
        let corpus = vec![AnnotatedDocument::new(vec!["a", "b", "c"])
            .with_span("lf_1", 0, 2, "PER")
            .with_span("lf_2", 1, 2, "ORG")];
        let (m, sources, index) = build_all(&corpus, &["O", "PER", "ORG"], false).unwrap();

        let c1 = sources.column_of("lf_1").unwrap();
        let c2 = sources.column_of("lf_2").unwrap();
        let per = index.index_of("PER").unwrap();
        let org = index.index_of("ORG").unwrap();

        assert_eq!(m.rows(), 3);
        assert_eq!(m.get(0, c1), per);
        assert_eq!(m.get(1, c1), per);
        assert_eq!(m.get(2, c1), 0);
        assert_eq!(m.get(0, c2), 0);
        assert_eq!(m.get(1, c2), org);
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn test_blocks_concatenate_in_corpus_order() {
        let doc_a = AnnotatedDocument::new(vec!["a1", "a2"]).with_span("lf", 0, 1, "PER");
        let doc_b = AnnotatedDocument::new(vec!["b1", "b2", "b3"]).with_span("lf", 2, 3, "ORG");

        let (m_a, ..) = build_all(&[doc_a.clone()], &["O", "PER", "ORG"], false).unwrap();
        let (m_b, ..) = build_all(&[doc_b.clone()], &["O", "PER", "ORG"], false).unwrap();
        let (m_ab, ..) = build_all(&[doc_a, doc_b], &["O", "PER", "ORG"], false).unwrap();

        assert_eq!(m_ab.rows(), m_a.rows() + m_b.rows());
        for i in 0..m_a.rows() {
            assert_eq!(m_ab.row(i), m_a.row(i));
        }
        for i in 0..m_b.rows() {
            assert_eq!(m_ab.row(m_a.rows() + i), m_b.row(i));
        }
    }

    #[test]
    fn test_strict_and_normalized_modes_differ() {
        let corpus = vec![AnnotatedDocument::new(vec!["dia", "10"])
            .with_span("lf", 0, 1, "B-DATE")
            .with_span("lf", 1, 2, "I-DATE")];

        let (strict, _, strict_idx) = build_all(&corpus, &["O", "B-DATE", "I-DATE"], true).unwrap();
        let (norm, _, norm_idx) = build_all(&corpus, &["O", "B-DATE", "I-DATE"], false).unwrap();

        // Estrito: índices distintos por variante de prefixo
        assert_eq!(strict.get(0, 0), strict_idx.index_of("B-DATE").unwrap());
        assert_eq!(strict.get(1, 0), strict_idx.index_of("I-DATE").unwrap());
        assert_ne!(strict.get(0, 0), strict.get(1, 0));

        // Normalizado: ambos colapsam no índice de "DATE"
        let date = norm_idx.index_of("DATE").unwrap();
        assert_eq!(norm.get(0, 0), date);
        assert_eq!(norm.get(1, 0), date);
    }

    #[test]
    fn test_unknown_span_label_is_skipped() {
        let corpus = vec![AnnotatedDocument::new(vec!["a", "b"])
            .with_span("lf", 0, 2, "MISC")
            .with_span("lf", 0, 1, "PER")];
        let (m, ..) = build_all(&corpus, &["O", "PER"], false).unwrap();
        // O span MISC não pinta nada; só o PER sobrevive
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(1, 0), 0);
    }

    #[test]
    fn test_span_end_clamped_to_document() {
        let corpus =
            vec![AnnotatedDocument::new(vec!["a", "b"]).with_span("lf", 1, 5, "PER")];
        let (m, ..) = build_all(&corpus, &["O", "PER"], false).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.get(1, 0), 1);
    }

    #[test]
    fn test_later_span_overwrites_earlier() {
        let corpus = vec![AnnotatedDocument::new(vec!["a"])
            .with_span("lf", 0, 1, "PER")
            .with_span("lf", 0, 1, "ORG")];
        let (m, _, index) = build_all(&corpus, &["O", "PER", "ORG"], false).unwrap();
        assert_eq!(m.get(0, 0), index.index_of("ORG").unwrap());
    }

    #[test]
    fn test_row_nonzeros_matches_dense() {
        let corpus = vec![AnnotatedDocument::new(vec!["a", "b"])
            .with_span("lf_1", 0, 2, "PER")
            .with_span("lf_2", 1, 2, "ORG")];
        let (m, ..) = build_all(&corpus, &["O", "PER", "ORG"], false).unwrap();

        let (cols, vals) = m.row_nonzeros(0);
        assert_eq!((cols, vals), (&[0usize][..], &[1u16][..]));
        let (cols, vals) = m.row_nonzeros(1);
        assert_eq!(cols.len(), 2);
        assert_eq!(vals.len(), 2);

        let triplets: Vec<_> = m.nonzeros().collect();
        assert_eq!(triplets.len(), m.nnz());
        for (i, j, v) in triplets {
            assert_eq!(m.get(i, j), v);
        }
    }
}
