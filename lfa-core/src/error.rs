//! # Erros do Motor de Análise
//!
//! A análise falha cedo, na construção: vocabulário vazio ou ausência de
//! fontes são erros de programação do chamador e nunca produzem tabelas
//! silenciosamente vazias. Divisões 0/0 dentro das métricas **não** são
//! erros — resolvem para 0.0 no cálculo.

use thiserror::Error;

/// Erros retornados pelo motor de análise de LFs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// O vocabulário de rótulos fornecido na construção estava vazio.
    #[error("vocabulário de rótulos vazio: a análise exige ao menos um rótulo além do nulo \"O\"")]
    EmptyLabels,

    /// Nenhuma fonte para analisar: a lista explícita foi vazia (ou só
    /// continha duplicatas vazias) e nenhum documento do corpus carrega spans.
    #[error("nenhuma fonte de anotação para analisar: lista explícita vazia e corpus sem spans")]
    NoSources,

    /// Operação declarada no contrato mas sem implementação.
    #[error("operação não implementada: {0}")]
    NotImplemented(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert!(AnalysisError::EmptyLabels.to_string().contains("vocabulário"));
        assert!(AnalysisError::NotImplemented("lf_empirical_accuracies")
            .to_string()
            .contains("lf_empirical_accuracies"));
    }
}
