//! # Índice de Rótulos
//!
//! Normaliza e indexa o vocabulário de rótulos da análise, tratando esquemas
//! com prefixo (BIO/BILOU). O rótulo nulo `"O"` ocupa **sempre** o índice 0 —
//! é o mesmo valor que representa "nenhuma fonte anotou este token" na
//! matriz, por construção.
//!
//! ## Modos de Indexação
//!
//! | Modo            | `"B-DATE"` e `"I-DATE"`                       |
//! |-----------------|-----------------------------------------------|
//! | normalizado     | colapsam em um único índice `"DATE"`          |
//! | estrito         | cada string com prefixo é seu próprio índice  |
//!
//! O modo estrito só faz sentido quando o vocabulário (e os spans das
//! fontes) usam o formato com prefixo explícito.

use std::collections::{HashMap, HashSet};

use crate::error::AnalysisError;

/// Rótulo nulo reservado, sempre no índice 0.
pub const NULL_LABEL: &str = "O";

/// Separa um rótulo `P-BASE` em (prefixo, base), se houver prefixo.
///
/// Um prefixo é um único caractere ASCII alfabético antes do primeiro `-`
/// (esquemas BIO/BILOU). Rótulos como "COVID-19" não são separados.
fn split_prefix(label: &str) -> Option<(&str, &str)> {
    let (prefix, base) = label.split_once('-')?;
    let mut chars = prefix.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() && !base.is_empty() => Some((prefix, base)),
        _ => None,
    }
}

/// Vocabulário de rótulos indexado, imutável após a construção.
#[derive(Debug, Clone)]
pub struct LabelIndex {
    /// Rótulos indexados, na ordem de atribuição (`labels[0] == "O"`).
    labels: Vec<String>,
    /// Mapa rótulo → índice na matriz.
    label_to_idx: HashMap<String, u16>,
    /// Prefixos distintos observados no vocabulário original (ex: {"B", "I"}).
    prefixes: HashSet<String>,
    /// Nomes-base (sem prefixo) observados no vocabulário original.
    base_labels: HashSet<String>,
    /// Modo estrito: strings com prefixo permanecem distintas.
    strict: bool,
}

impl LabelIndex {
    /// Constrói o índice a partir do vocabulário bruto.
    ///
    /// Garantias:
    /// - `"O"` é inserido se ausente; se presente fora da posição 0, é
    ///   movido para a frente (sem duplicar).
    /// - Índices são contíguos a partir de 0 e atribuídos uma única vez,
    ///   na ordem de primeira ocorrência.
    pub fn build(original_labels: &[String], strict_match: bool) -> Result<Self, AnalysisError> {
        if original_labels.is_empty() {
            return Err(AnalysisError::EmptyLabels);
        }

        // "O" forçado ao índice 0, removendo ocorrências duplicadas
        let mut ordered: Vec<&str> = original_labels
            .iter()
            .map(String::as_str)
            .filter(|l| *l != NULL_LABEL)
            .collect();
        ordered.insert(0, NULL_LABEL);

        let mut labels: Vec<String> = Vec::new();
        let mut label_to_idx: HashMap<String, u16> = HashMap::new();
        let mut prefixes: HashSet<String> = HashSet::new();
        let mut base_labels: HashSet<String> = HashSet::new();

        for raw in ordered {
            let (prefix, base) = match split_prefix(raw) {
                Some((p, b)) => (Some(p), b),
                None => (None, raw),
            };
            if let Some(p) = prefix {
                prefixes.insert(p.to_string());
            }
            base_labels.insert(base.to_string());

            // Chave de indexação: a string exata no modo estrito,
            // o nome-base no modo normalizado
            let key = if strict_match { raw } else { base };
            if !label_to_idx.contains_key(key) {
                label_to_idx.insert(key.to_string(), labels.len() as u16);
                labels.push(key.to_string());
            }
        }

        Ok(Self {
            labels,
            label_to_idx,
            prefixes,
            base_labels,
            strict: strict_match,
        })
    }

    /// Resolve o rótulo de um span para seu índice na matriz.
    ///
    /// - Modo estrito: a string exata determina o índice.
    /// - Modo normalizado: o prefixo (se houver) é descartado antes da busca.
    ///
    /// Retorna `None` para rótulos fora do vocabulário indexado.
    pub fn resolve(&self, span_label: &str) -> Option<u16> {
        if self.strict {
            self.label_to_idx.get(span_label).copied()
        } else {
            let base = split_prefix(span_label)
                .map(|(_, b)| b)
                .unwrap_or(span_label);
            self.label_to_idx.get(base).copied()
        }
    }

    /// Índice de um rótulo indexado (busca exata, sem normalização).
    pub fn index_of(&self, label: &str) -> Option<u16> {
        self.label_to_idx.get(label).copied()
    }

    /// Nome do rótulo de um índice.
    pub fn label(&self, idx: u16) -> &str {
        &self.labels[idx as usize]
    }

    /// Rótulos indexados, em ordem de índice.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Quantidade de índices distintos (incluindo o nulo).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Prefixos distintos observados no vocabulário original.
    pub fn prefixes(&self) -> &HashSet<String> {
        &self.prefixes
    }

    /// Nomes-base (sem prefixo) do vocabulário original.
    pub fn base_labels(&self) -> &HashSet<String> {
        &self.base_labels
    }

    /// Modo de indexação em uso.
    pub fn strict(&self) -> bool {
        self.strict
    }
}
