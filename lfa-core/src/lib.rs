//! # lfa-core — Análise de Funções de Rotulagem (LFs) para Supervisão Fraca
//!
//! Este crate implementa o motor de diagnóstico para supervisão fraca: dado
//! um corpus de documentos anotado por várias fontes independentes (e
//! possivelmente ruidosas), ele quantifica, por rótulo e por fonte, quanto
//! as fontes cobrem, se sobrepõem e conflitam entre si — e infere o que
//! cada fonte está "tentando" prever. Nenhuma agregação ou aprendizado:
//! apenas estatística descritiva em nível de token.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em um pipeline linear de construção, seguido de consultas:
//!
//! 1.  **Entrada**: corpus anotado (qualquer tipo com a capacidade
//!     [`Document`]), vocabulário de rótulos e, opcionalmente, a lista de
//!     fontes.
//! 2.  **Indexação** ([`label_index`]): o vocabulário é normalizado
//!     (prefixos BIO/BILOU) e indexado, com o rótulo nulo `"O"` no índice 0.
//! 3.  **Resolução de Fontes** ([`sources`]): cada fonte recebe uma coluna
//!     fixa da matriz.
//! 4.  **Matriz** ([`matrix`]): os spans de cada documento pintam a matriz
//!     token × fonte, mantida nas formas densa e esparsa (CSR).
//! 5.  **Indicadores** ([`indicators`]): vetores coberto/sobreposto/
//!     conflitante derivados por reduções de linha.
//! 6.  **Saída** ([`analysis`]): métricas tabulares ([`Table`]) por rótulo e
//!     por fonte.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use lfa_core::{demo_corpus, demo_labels, LfAnalysis};
//!
//! // 1. Corpus de demonstração: três LFs simuladas anotando PT-BR
//! let corpus = demo_corpus();
//!
//! // 2. Constrói o motor (modo normalizado, fontes inferidas do corpus)
//! let engine = LfAnalysis::new(&corpus, &demo_labels(), None, false).unwrap();
//!
//! // 3. Quanto cada rótulo aparece em conflito entre as fontes?
//! let conflicts = engine.label_conflict();
//! for (label, row) in conflicts.row_labels.iter().zip(&conflicts.values) {
//!     println!("{}: {:.2}", label, row[0]);
//! }
//! ```
//!
//! ## Módulos Principais
//!
//! - [`analysis`]: o motor [`LfAnalysis`] e as métricas públicas.
//! - [`corpus`]: a capacidade [`Document`] e o corpus de demonstração.
//! - [`matrix`]: a matriz token × fonte e seus invariantes.
//! - [`table`]: a abstração tabular dos resultados.

pub mod analysis;
pub mod corpus;
pub mod error;
pub mod indicators;
pub mod label_index;
pub mod matrix;
pub mod sources;
pub mod table;

pub use analysis::LfAnalysis;
pub use corpus::{demo_corpus, demo_labels, AnnotatedDocument, Document, Span};
pub use error::AnalysisError;
pub use label_index::{LabelIndex, NULL_LABEL};
pub use matrix::LabelMatrix;
pub use sources::SourceSet;
pub use table::Table;
