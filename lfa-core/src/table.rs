//! # Tabela de Resultados
//!
//! Todas as métricas do motor retornam uma [`Table`]: linhas e colunas
//! identificadas por strings e células `f64`. É a abstração mínima de um
//! DataFrame — suficiente para o chamador ordenar, serializar ou formatar
//! como quiser, sem que o núcleo dependa de nenhum formato de apresentação.
//!
//! ## Convenções
//!
//! - Métricas por rótulo: uma linha por rótulo, colunas por fonte (ou uma
//!   única coluna com o nome da métrica).
//! - Métricas agregadas por fonte: uma única linha, uma coluna por fonte.
//! - Rótulo nulo `"O"` e rótulos sem ocorrência no corpus nunca aparecem
//!   como linha.

use serde::{Deserialize, Serialize};

/// Tabela bidimensional com linhas e colunas nomeadas.
///
/// Invariante de forma: `values.len() == row_labels.len()` e cada linha tem
/// `column_labels.len()` células.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Nomes das linhas (ex: rótulos, ou o nome da métrica agregada).
    pub row_labels: Vec<String>,
    /// Nomes das colunas (ex: fontes, ou o nome da métrica).
    pub column_labels: Vec<String>,
    /// Células, indexadas `values[linha][coluna]`.
    pub values: Vec<Vec<f64>>,
}

impl Table {
    /// Cria uma tabela a partir das partes, verificando a forma.
    pub fn new(row_labels: Vec<String>, column_labels: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(row_labels.len(), values.len());
        debug_assert!(values.iter().all(|row| row.len() == column_labels.len()));
        Self {
            row_labels,
            column_labels,
            values,
        }
    }

    /// Número de linhas.
    pub fn num_rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Número de colunas.
    pub fn num_columns(&self) -> usize {
        self.column_labels.len()
    }

    /// Tabela sem nenhuma linha (ex: corpus sem rótulos não-nulos).
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty()
    }

    /// Busca uma célula pelos nomes de linha e coluna.
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        Some(self.values[r][c])
    }

    /// Retorna a linha inteira pelo nome, na ordem das colunas.
    pub fn row(&self, row: &str) -> Option<&[f64]> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        Some(&self.values[r])
    }

    /// Verifica se um rótulo aparece entre as linhas.
    pub fn has_row(&self, row: &str) -> bool {
        self.row_labels.iter().any(|l| l == row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["PER".to_string(), "ORG".to_string()],
            vec!["lf_a".to_string(), "lf_b".to_string()],
            vec![vec![0.5, 1.0], vec![0.0, 0.25]],
        )
    }

    #[test]
    fn test_get_by_names() {
        let t = sample();
        assert_eq!(t.get("PER", "lf_b"), Some(1.0));
        assert_eq!(t.get("ORG", "lf_a"), Some(0.0));
        assert_eq!(t.get("LOC", "lf_a"), None);
        assert_eq!(t.get("PER", "lf_c"), None);
    }

    #[test]
    fn test_row_access() {
        let t = sample();
        assert_eq!(t.row("ORG"), Some(&[0.0, 0.25][..]));
        assert!(t.row("MISC").is_none());
        assert!(t.has_row("PER"));
        assert!(!t.has_row("O"));
    }

    #[test]
    fn test_serde_json_round_trip() {
        let t = sample();
        let json = serde_json::to_string(&t).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
