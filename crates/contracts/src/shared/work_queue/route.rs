use super::query_params::{to_query_string, QueryParams};
use crate::domain::a001_project::aggregate::ProjectId;
use crate::domain::a002_translation_item::aggregate::TranslationItemId;
use crate::domain::common::AggregateId;

const EDITOR_PREFIX: &str = "/translation-editor/";
const LIST_PREFIX: &str = "/translations/";
const NEW_SEGMENT: &str = "new";

fn with_query(path: String, params: &QueryParams) -> String {
    let query = to_query_string(params);
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

fn project_segment(segment: &str) -> Option<ProjectId> {
    let segment = segment.trim_end_matches('/');
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    let decoded = urlencoding::decode(segment).ok()?;
    ProjectId::from_string(&decoded).ok()
}

/// Точка входа в редактор: конкретный элемент или «следующий к работе»
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    New,
    Item(TranslationItemId),
}

/// Маршрут редактора `/translation-editor/{project}/{item|new}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorRoute {
    pub project_id: ProjectId,
    pub entry: EntryPoint,
}

impl EditorRoute {
    pub fn new(project_id: ProjectId, entry: EntryPoint) -> Self {
        Self { project_id, entry }
    }

    pub fn path(&self) -> String {
        let entry = match self.entry {
            EntryPoint::New => NEW_SEGMENT.to_string(),
            EntryPoint::Item(id) => id.as_string(),
        };
        format!(
            "{}{}/{}",
            EDITOR_PREFIX,
            urlencoding::encode(self.project_id.value()),
            entry
        )
    }

    /// Путь вместе со строкой запроса
    pub fn href(&self, params: &QueryParams) -> String {
        with_query(self.path(), params)
    }

    /// Разбор пути; нераспознанный сегмент элемента трактуется как `new`
    pub fn parse_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(EDITOR_PREFIX)?;
        let mut segments = rest.trim_end_matches('/').splitn(2, '/');
        let project = segments.next().filter(|s| !s.is_empty())?;
        let project = urlencoding::decode(project).ok()?;
        let project_id = ProjectId::from_string(&project).ok()?;
        let entry = match segments.next() {
            None | Some(NEW_SEGMENT) => EntryPoint::New,
            Some(raw) => TranslationItemId::from_string(raw)
                .map(EntryPoint::Item)
                .unwrap_or(EntryPoint::New),
        };
        Some(Self { project_id, entry })
    }
}

/// Маршрут списка переводов проекта `/translations/{project}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRoute {
    pub project_id: ProjectId,
}

impl ListRoute {
    pub fn new(project_id: ProjectId) -> Self {
        Self { project_id }
    }

    pub fn path(&self) -> String {
        format!("{}{}", LIST_PREFIX, urlencoding::encode(self.project_id.value()))
    }

    pub fn href(&self, params: &QueryParams) -> String {
        with_query(self.path(), params)
    }

    pub fn parse_path(path: &str) -> Option<Self> {
        let project_id = project_segment(path.strip_prefix(LIST_PREFIX)?)?;
        Some(Self { project_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        let route = EditorRoute::new(ProjectId::new("spt"), EntryPoint::Item(TranslationItemId(42)));
        assert_eq!(route.path(), "/translation-editor/spt/42");
        assert_eq!(EditorRoute::parse_path(&route.path()), Some(route));
    }

    #[test]
    fn test_parse_new_and_garbage_entry() {
        let parsed = EditorRoute::parse_path("/translation-editor/spt/new").unwrap();
        assert_eq!(parsed.entry, EntryPoint::New);
        let parsed = EditorRoute::parse_path("/translation-editor/spt/abc").unwrap();
        assert_eq!(parsed.entry, EntryPoint::New);
        let parsed = EditorRoute::parse_path("/translation-editor/spt").unwrap();
        assert_eq!(parsed.entry, EntryPoint::New);
        assert_eq!(EditorRoute::parse_path("/translations/spt"), None);
        assert_eq!(EditorRoute::parse_path("/translation-editor/"), None);
    }

    #[test]
    fn test_href_without_params_is_plain_path() {
        let route = EditorRoute::new(ProjectId::new("spt"), EntryPoint::New);
        assert_eq!(route.href(&QueryParams::new()), "/translation-editor/spt/new");
    }

    #[test]
    fn test_list_route_path() {
        let route = ListRoute::new(ProjectId::new("spt tarkov"));
        assert_eq!(route.path(), "/translations/spt%20tarkov");
        assert_eq!(ListRoute::parse_path(&route.path()), Some(route));
        assert_eq!(ListRoute::parse_path("/translations/spt/"), Some(ListRoute::new(ProjectId::new("spt"))));
        assert_eq!(ListRoute::parse_path("/translations/"), None);
        assert_eq!(ListRoute::parse_path("/translations/spt/7"), None);
        assert_eq!(ListRoute::parse_path("/translation-editor/spt/new"), None);
    }
}
