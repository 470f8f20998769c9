//! # Vetores Indicadores
//!
//! Reduções por linha e por coluna sobre a matriz token × fonte, que
//! alimentam todas as estatísticas públicas:
//!
//! | Indicador        | Definição (por token `i`)                                |
//! |------------------|----------------------------------------------------------|
//! | coberto          | ≥ 1 fonte anotou o token                                 |
//! | sobreposto       | ≥ 2 fontes anotaram o token (concordando ou não)         |
//! | conflitante      | ≥ 2 fontes anotaram com valores não-nulos **distintos**  |
//!
//! Um token anotado com o mesmo rótulo por várias fontes é sobreposto mas
//! não conflitante; anotação não-nula de uma fonte ao lado do nulo de outra
//! não é sobreposição nem conflito.
//!
//! Cada linha é independente das demais, então as derivações usam `rayon`
//! para mapear linhas em paralelo; a ordem do resultado é a ordem das
//! linhas, idêntica à redução sequencial.

use rayon::prelude::*;

use crate::matrix::LabelMatrix;

/// Indicador por token: alguma fonte anotou o token.
pub fn covered_data_points(matrix: &LabelMatrix) -> Vec<bool> {
    (0..matrix.rows())
        .into_par_iter()
        .map(|i| {
            let (cols, _) = matrix.row_nonzeros(i);
            !cols.is_empty()
        })
        .collect()
}

/// Indicador por token: duas ou mais fontes anotaram o token.
pub fn overlapped_data_points(matrix: &LabelMatrix) -> Vec<bool> {
    (0..matrix.rows())
        .into_par_iter()
        .map(|i| {
            let (cols, _) = matrix.row_nonzeros(i);
            cols.len() >= 2
        })
        .collect()
}

/// Indicador por token: fontes atribuíram valores não-nulos distintos.
pub fn conflicted_data_points(matrix: &LabelMatrix) -> Vec<bool> {
    (0..matrix.rows())
        .into_par_iter()
        .map(|i| {
            let (_, vals) = matrix.row_nonzeros(i);
            match vals.split_first() {
                Some((first, rest)) => rest.iter().any(|v| v != first),
                None => false,
            }
        })
        .collect()
}

/// Indicador por token: o valor `label_idx` aparece em alguma coluna da linha.
pub fn covered_by_label(matrix: &LabelMatrix, label_idx: u16) -> Vec<bool> {
    (0..matrix.rows())
        .into_par_iter()
        .map(|i| {
            let (_, vals) = matrix.row_nonzeros(i);
            vals.contains(&label_idx)
        })
        .collect()
}

/// Contagem por fonte: quantos tokens cada coluna anotou com `label_idx`.
pub fn covered_by_label_counts(matrix: &LabelMatrix, label_idx: u16) -> Vec<usize> {
    let mut counts = vec![0usize; matrix.cols()];
    for (_, col, val) in matrix.nonzeros() {
        if val == label_idx {
            counts[col] += 1;
        }
    }
    counts
}

/// Índice invertido rótulo → linhas: para cada índice de rótulo, as linhas
/// (ascendentes) em que o valor aparece em pelo menos uma coluna.
///
/// A posição 0 (rótulo nulo) fica vazia: o nulo é indistinguível da ausência
/// de anotação e está excluído de todas as estatísticas.
pub fn label_row_indices(matrix: &LabelMatrix, num_labels: usize) -> Vec<Vec<usize>> {
    let mut rows_per_label: Vec<Vec<usize>> = vec![Vec::new(); num_labels];
    for (row, _, val) in matrix.nonzeros() {
        let entry = &mut rows_per_label[val as usize];
        // nonzeros() percorre linha a linha; basta deduplicar o último
        if entry.last() != Some(&row) {
            entry.push(row);
        }
    }
    rows_per_label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::AnnotatedDocument;
    use crate::label_index::LabelIndex;
    use crate::sources::SourceSet;

    /// Corpus mínimo de 4 tokens e 2 fontes:
    ///   token 0: PER × ORG (conflito), token 1: PER × PER (concordância),
    ///   token 2: só PER, token 3: nada.
    fn sample_matrix() -> LabelMatrix {
        let labels: Vec<String> = ["O", "PER", "ORG"].iter().map(|s| s.to_string()).collect();
        let corpus = vec![AnnotatedDocument::new(vec!["t0", "t1", "t2", "t3"])
            .with_span("lf_1", 0, 3, "PER")
            .with_span("lf_2", 0, 1, "ORG")
            .with_span("lf_2", 1, 2, "PER")];
        let index = LabelIndex::build(&labels, false).unwrap();
        let sources = SourceSet::resolve(&corpus, None).unwrap();
        LabelMatrix::build(&corpus, &sources, &index)
    }

    #[test]
    fn test_covered() {
        let m = sample_matrix();
        assert_eq!(covered_data_points(&m), vec![true, true, true, false]);
    }

    #[test]
    fn test_overlapped_ignores_agreement() {
        let m = sample_matrix();
        // tokens 0 e 1 têm duas fontes, concordando ou não
        assert_eq!(overlapped_data_points(&m), vec![true, true, false, false]);
    }

    #[test]
    fn test_conflicted_requires_distinct_values() {
        let m = sample_matrix();
        // só o token 0 tem valores não-nulos distintos
        assert_eq!(
            conflicted_data_points(&m),
            vec![true, false, false, false]
        );
    }

    #[test]
    fn test_covered_by_label() {
        let m = sample_matrix();
        // ORG (índice 2) só aparece no token 0
        assert_eq!(covered_by_label(&m, 2), vec![true, false, false, false]);
        // PER (índice 1) aparece nos tokens 0, 1 e 2
        assert_eq!(covered_by_label(&m, 1), vec![true, true, true, false]);
    }

    #[test]
    fn test_covered_by_label_counts_per_source() {
        let m = sample_matrix();
        // lf_1 (coluna 0) deu PER a 3 tokens; lf_2 (coluna 1) a 1 token
        assert_eq!(covered_by_label_counts(&m, 1), vec![3, 1]);
        assert_eq!(covered_by_label_counts(&m, 2), vec![0, 1]);
    }

    #[test]
    fn test_label_row_indices() {
        let m = sample_matrix();
        let rows = label_row_indices(&m, 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec![0, 1, 2]);
        assert_eq!(rows[2], vec![0]);
    }
}
