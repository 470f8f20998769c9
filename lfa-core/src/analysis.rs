//! # Motor de Análise de LFs
//!
//! Executa as análises sobre um corpus de documentos aos quais as fontes
//! (LFs) foram aplicadas. Todas as análises são conduzidas em **nível de
//! token**, sobre a matriz token × fonte construída uma única vez.
//!
//! ## Métricas
//!
//! | Métrica                  | Escopo           | Fórmula                                                        |
//! |--------------------------|------------------|----------------------------------------------------------------|
//! | `label_overlap`          | por rótulo       | tokens do rótulo sobrepostos / tokens do rótulo                |
//! | `label_conflict`         | por rótulo       | tokens do rótulo em conflito / tokens do rótulo                |
//! | `lf_target_labels`       | por fonte        | valores não-nulos distintos que a fonte emite                  |
//! | `lf_coverages`           | fonte × rótulo   | tokens que a fonte rotulou como Y / tokens distintos com Y     |
//! | `lf_coverages(agg)`      | por fonte        | tokens que a fonte rotulou / tokens cobertos pelos seus alvos  |
//! | `lf_overlaps`            | fonte × rótulo   | tokens da fonte com Y e sobrepostos / tokens da fonte com Y    |
//! | `lf_conflicts`           | fonte × rótulo   | idem, substituindo sobreposição por conflito                   |
//!
//! Toda divisão 0/0 resolve para 0.0; o rótulo nulo `"O"` e rótulos sem
//! ocorrência no corpus nunca aparecem nas tabelas.
//!
//! ## Ciclo de Vida
//!
//! O motor é um valor imutável: construído uma vez a partir de
//! (corpus, vocabulário, fontes, modo), serve qualquer número de consultas
//! com `&self`. Mudou um parâmetro? Constrói-se um motor novo.

use std::collections::HashMap;

use tracing::debug;

use crate::corpus::Document;
use crate::error::AnalysisError;
use crate::indicators;
use crate::label_index::{LabelIndex, NULL_LABEL};
use crate::matrix::LabelMatrix;
use crate::sources::SourceSet;
use crate::table::Table;

/// Divisão segura das métricas: 0/0 vale 0, nunca NaN.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Motor de análise de funções de rotulagem.
///
/// Estado imutável após a construção: índice de rótulos, conjunto de
/// fontes, a matriz token × fonte (densa + esparsa) e o índice invertido
/// rótulo → linhas, reutilizado por todas as estatísticas por rótulo.
#[derive(Debug)]
pub struct LfAnalysis {
    labels: LabelIndex,
    sources: SourceSet,
    matrix: LabelMatrix,
    label_rows: Vec<Vec<usize>>,
}

impl LfAnalysis {
    /// Constrói o motor sobre um corpus já anotado pelas fontes.
    ///
    /// Se `sources` for fornecido, apenas esse subconjunto participa da
    /// análise; caso contrário, usa-se a união das fontes de todos os
    /// documentos. Com `strict_match`, rótulos como `I-DATE` e `B-DATE`
    /// são índices distintos; sem, ambos normalizam para `DATE`.
    ///
    /// # Erros
    /// - [`AnalysisError::EmptyLabels`] para vocabulário vazio;
    /// - [`AnalysisError::NoSources`] quando nenhuma fonte é resolvível.
    pub fn new<D: Document>(
        corpus: &[D],
        labels: &[String],
        sources: Option<Vec<String>>,
        strict_match: bool,
    ) -> Result<Self, AnalysisError> {
        let labels = LabelIndex::build(labels, strict_match)?;
        let sources = SourceSet::resolve(corpus, sources)?;
        let matrix = LabelMatrix::build(corpus, &sources, &labels);
        let label_rows = indicators::label_row_indices(&matrix, labels.len());

        debug!(
            tokens = matrix.rows(),
            sources = matrix.cols(),
            nonzeros = matrix.nnz(),
            strict = strict_match,
            "matriz token × fonte construída"
        );

        Ok(Self {
            labels,
            sources,
            matrix,
            label_rows,
        })
    }

    // ------------------
    // Métricas públicas
    // ------------------

    /// Para cada rótulo, a fração de tokens com 2+ fontes fornecendo
    /// anotação não-nula. Computada para rótulos com 1+ ocorrência.
    pub fn label_overlap(&self) -> Table {
        let overlaps = indicators::overlapped_data_points(&self.matrix);
        self.label_fraction(&overlaps, "overlap")
    }

    /// Para cada rótulo, a fração de tokens com rótulos não-nulos
    /// conflitantes.
    ///
    /// Um conflito exige duas fontes anotando o **mesmo** token com valores
    /// não-nulos **diferentes**. Exemplo: LF1 diz "PER" e LF2 diz "ORG"
    /// para "Apple" → conflito. LF1 diz "ORG" e LF2 não anota → sem
    /// conflito.
    pub fn label_conflict(&self) -> Table {
        let conflicts = indicators::conflicted_data_points(&self.matrix);
        self.label_fraction(&conflicts, "conflict")
    }

    /// Infere os rótulos-alvo de cada fonte a partir da evidência na
    /// matriz: o conjunto ordenado de valores não-nulos que ela emite.
    pub fn lf_target_labels(&self) -> HashMap<String, Vec<u16>> {
        self.sources
            .names()
            .iter()
            .enumerate()
            .map(|(col, name)| (name.clone(), self.target_labels_of_column(col)))
            .collect()
    }

    /// Coberturas das fontes.
    ///
    /// Com `agg`, por fonte, sobre todos os seus rótulos-alvo:
    ///
    /// ```text
    /// Cobertura(LF X) = tokens anotados não-nulos por X
    ///                   ÷ tokens anotados não-nulos por qualquer LF
    ///                     dentre os rótulos-alvo de X
    /// ```
    ///
    /// Sem `agg`, individualmente por rótulo e fonte:
    ///
    /// ```text
    /// Cobertura(LF X, rótulo Y) = tokens anotados Y por X
    ///                             ÷ tokens distintos anotados Y por alguma LF
    /// ```
    pub fn lf_coverages(&self, agg: bool) -> Table {
        let num_sources = self.sources.len();
        if agg {
            // Tokens cobertos por cada fonte (células não-nulas da coluna)
            let mut covered_counts = vec![0usize; num_sources];
            for (_, col, _) in self.matrix.nonzeros() {
                covered_counts[col] += 1;
            }

            // Denominador: união das linhas cobertas pelos rótulos-alvo da fonte
            let values: Vec<f64> = (0..num_sources)
                .map(|col| {
                    let mut union = vec![false; self.matrix.rows()];
                    for label_idx in self.target_labels_of_column(col) {
                        let covered = indicators::covered_by_label(&self.matrix, label_idx);
                        for (row, hit) in covered.iter().enumerate() {
                            if *hit {
                                union[row] = true;
                            }
                        }
                    }
                    let total = union.iter().filter(|&&b| b).count();
                    ratio(covered_counts[col], total)
                })
                .collect();

            Table::new(
                vec!["coverage".to_string()],
                self.sources.names().to_vec(),
                vec![values],
            )
        } else {
            let mut row_labels = Vec::new();
            let mut rows = Vec::new();
            for (label_idx, indices) in self.label_rows.iter().enumerate() {
                let label = self.labels.label(label_idx as u16);
                if label == NULL_LABEL || indices.is_empty() {
                    continue;
                }
                let counts =
                    indicators::covered_by_label_counts(&self.matrix, label_idx as u16);
                row_labels.push(label.to_string());
                rows.push(
                    counts
                        .iter()
                        .map(|&c| ratio(c, indices.len()))
                        .collect(),
                );
            }
            Table::new(row_labels, self.sources.names().to_vec(), rows)
        }
    }

    /// Sobreposições das fontes (tokens anotados por 2+ LFs).
    ///
    /// Com `agg`:
    ///
    /// ```text
    /// Sobreposição(LF X) = tokens não-nulos de X também anotados por outra LF
    ///                      ÷ tokens não-nulos de X
    /// ```
    ///
    /// Sem `agg`, por rótulo e fonte:
    ///
    /// ```text
    /// Sobreposição(LF X, rótulo Y) = tokens Y de X anotados por outra LF
    ///                                ÷ tokens Y de X
    /// ```
    pub fn lf_overlaps(&self, agg: bool) -> Table {
        let overlaps = indicators::overlapped_data_points(&self.matrix);
        self.source_fraction(&overlaps, agg, "overlap")
    }

    /// Conflitos das fontes (2 LFs atribuindo rótulos não-nulos diferentes
    /// ao mesmo token). Espelha [`LfAnalysis::lf_overlaps`], trocando
    /// sobreposição por conflito.
    pub fn lf_conflicts(&self, agg: bool) -> Table {
        let conflicts = indicators::conflicted_data_points(&self.matrix);
        self.source_fraction(&conflicts, agg, "conflict")
    }

    /// Acurácias empíricas contra um corpus com anotação-ouro.
    ///
    /// Contrato documentado:
    /// - rótulos-ouro fora do conjunto-alvo da LF são remapeados para o
    ///   nulo antes da pontuação;
    /// - assume-se que os rótulos-ouro não carregam prefixo (PERSON, não
    ///   I-PERSON);
    /// - rótulos-ouro fora do vocabulário indexado recebem o nulo.
    ///
    /// Operação declarada e **não implementada**: retorna sempre
    /// [`AnalysisError::NotImplemented`]. A comparação com anotação-ouro
    /// fica a cargo do chamador.
    pub fn lf_empirical_accuracies<D: Document>(
        &self,
        _gold_corpus: &[D],
        _gold_span_name: &str,
        _gold_labels: &[String],
    ) -> Result<Table, AnalysisError> {
        Err(AnalysisError::NotImplemented("lf_empirical_accuracies"))
    }

    // ------------------------
    // Indicadores diagnósticos
    // ------------------------

    /// Indicador por token: alguma fonte anotou o token.
    pub fn covered_data_points(&self) -> Vec<bool> {
        indicators::covered_data_points(&self.matrix)
    }

    /// Indicador por token: 2+ fontes anotaram o token.
    pub fn overlapped_data_points(&self) -> Vec<bool> {
        indicators::overlapped_data_points(&self.matrix)
    }

    /// Indicador por token: fontes anotaram valores não-nulos distintos.
    pub fn conflicted_data_points(&self) -> Vec<bool> {
        indicators::conflicted_data_points(&self.matrix)
    }

    // ---------
    // Acessores
    // ---------

    /// A matriz token × fonte subjacente.
    pub fn matrix(&self) -> &LabelMatrix {
        &self.matrix
    }

    /// O vocabulário indexado.
    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    /// O conjunto de fontes da análise.
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Índice invertido rótulo → linhas, cacheado na construção.
    pub fn label_row_indices(&self) -> &[Vec<usize>] {
        &self.label_rows
    }

    // --------
    // Internos
    // --------

    /// Valores não-nulos distintos (ordenados) emitidos por uma coluna.
    fn target_labels_of_column(&self, col: usize) -> Vec<u16> {
        let mut targets: Vec<u16> = Vec::new();
        for (_, c, val) in self.matrix.nonzeros() {
            if c == col && !targets.contains(&val) {
                targets.push(val);
            }
        }
        targets.sort_unstable();
        targets
    }

    /// Tabela por rótulo com uma única coluna: fração das linhas do rótulo
    /// marcadas em `flags`.
    fn label_fraction(&self, flags: &[bool], metric: &str) -> Table {
        let mut row_labels = Vec::new();
        let mut rows = Vec::new();
        for (label_idx, indices) in self.label_rows.iter().enumerate() {
            let label = self.labels.label(label_idx as u16);
            if label == NULL_LABEL || indices.is_empty() {
                continue;
            }
            let hits = indices.iter().filter(|&&row| flags[row]).count();
            row_labels.push(label.to_string());
            rows.push(vec![ratio(hits, indices.len())]);
        }
        Table::new(row_labels, vec![metric.to_string()], rows)
    }

    /// Tabelas de sobreposição/conflito por fonte, agregadas ou por rótulo.
    fn source_fraction(&self, flags: &[bool], agg: bool, metric: &str) -> Table {
        let num_sources = self.sources.len();
        if agg {
            let mut numerators = vec![0usize; num_sources];
            let mut denominators = vec![0usize; num_sources];
            for (row, col, _) in self.matrix.nonzeros() {
                denominators[col] += 1;
                if flags[row] {
                    numerators[col] += 1;
                }
            }
            let values = numerators
                .iter()
                .zip(&denominators)
                .map(|(&n, &d)| ratio(n, d))
                .collect();
            Table::new(
                vec![metric.to_string()],
                self.sources.names().to_vec(),
                vec![values],
            )
        } else {
            let mut row_labels = Vec::new();
            let mut rows = Vec::new();
            for (label_idx, indices) in self.label_rows.iter().enumerate() {
                let label = self.labels.label(label_idx as u16);
                if label == NULL_LABEL || indices.is_empty() {
                    continue;
                }
                let label_idx = label_idx as u16;
                // Denominador: quantos tokens cada fonte anotou com o rótulo
                let denominators =
                    indicators::covered_by_label_counts(&self.matrix, label_idx);
                // Numerador: dentre as linhas do rótulo marcadas em `flags`,
                // quantas cada fonte anotou com o rótulo
                let mut numerators = vec![0usize; num_sources];
                for &row in indices {
                    if !flags[row] {
                        continue;
                    }
                    let (cols, vals) = self.matrix.row_nonzeros(row);
                    for (&col, &val) in cols.iter().zip(vals) {
                        if val == label_idx {
                            numerators[col] += 1;
                        }
                    }
                }
                row_labels.push(label.to_string());
                rows.push(
                    numerators
                        .iter()
                        .zip(&denominators)
                        .map(|(&n, &d)| ratio(n, d))
                        .collect(),
                );
            }
            Table::new(row_labels, self.sources.names().to_vec(), rows)
        }
    }
}
