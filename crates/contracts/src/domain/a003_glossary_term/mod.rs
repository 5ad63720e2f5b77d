//! Глоссарий проекта: подсказки терминов для текущей строки редактора.

pub mod aggregate;

pub use aggregate::{relevant_terms, search_terms, GlossaryTerm};
