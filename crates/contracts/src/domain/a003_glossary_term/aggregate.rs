use crate::domain::a001_project::aggregate::ProjectId;
use serde::{Deserialize, Serialize};

/// Термин глоссария проекта
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    pub term: String,
    pub translation: String,
    #[serde(default)]
    pub description: String,
}

/// Термины, встречающиеся в исходном тексте текущего элемента
pub fn relevant_terms<'a>(glossary: &'a [GlossaryTerm], source_text: &str) -> Vec<&'a GlossaryTerm> {
    if source_text.is_empty() {
        return Vec::new();
    }
    let source = source_text.to_lowercase();
    glossary
        .iter()
        .filter(|t| !t.term.is_empty() && source.contains(&t.term.to_lowercase()))
        .collect()
}

/// Поиск по термину или переводу, результат отсортирован по термину
pub fn search_terms<'a>(glossary: &'a [GlossaryTerm], query: &str) -> Vec<&'a GlossaryTerm> {
    let query = query.trim().to_lowercase();
    let mut result: Vec<&GlossaryTerm> = glossary
        .iter()
        .filter(|t| {
            query.is_empty()
                || t.term.to_lowercase().contains(&query)
                || t.translation.to_lowercase().contains(&query)
        })
        .collect();
    result.sort_by(|a, b| a.term.to_lowercase().cmp(&b.term.to_lowercase()));
    result
}
