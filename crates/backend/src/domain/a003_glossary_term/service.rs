use crate::shared::data::store::get_store;
use contracts::domain::a001_project::aggregate::ProjectId;
use contracts::domain::a003_glossary_term::aggregate::{search_terms, GlossaryTerm};

/// Глоссарий проекта; с непустым `query` только совпадения, по алфавиту
pub async fn list_by_project(
    project_id: ProjectId,
    query: Option<&str>,
) -> anyhow::Result<Option<Vec<GlossaryTerm>>> {
    let Some(terms) = get_store().list_glossary(project_id).await? else {
        return Ok(None);
    };
    let terms = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => search_terms(&terms, q).into_iter().cloned().collect(),
        None => terms,
    };
    Ok(Some(terms))
}
