use contracts::domain::a001_project::aggregate::Project;
use contracts::domain::a002_translation_item::aggregate::TranslationItemDto;
use contracts::domain::a003_glossary_term::aggregate::GlossaryTerm;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Встроенный набор начальных данных
const DEFAULT_SEED: &str = include_str!("seed.json");

/// Начальное содержимое хранилища
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    pub projects: Vec<Project>,
    #[serde(default)]
    pub items: Vec<TranslationItemDto>,
    #[serde(default)]
    pub glossary: Vec<GlossaryTerm>,
}

impl SeedData {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        seed.check()?;
        Ok(seed)
    }

    pub fn embedded() -> anyhow::Result<Self> {
        Self::parse(DEFAULT_SEED)
    }

    /// Файл, если путь задан, иначе встроенный набор
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("Loading seed data from: {}", path.display());
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("seed file {}: {}", path.display(), e))?;
                Self::parse(&contents)
            }
            None => {
                tracing::info!("Using embedded seed data");
                Self::embedded()
            }
        }
    }

    /// Целостность набора: проекты уникальны, id элементов уникальны,
    /// каждый элемент и термин ссылается на существующий проект, статус
    /// элемента известен, а категории разрешаются в таксономии проекта
    fn check(&self) -> anyhow::Result<()> {
        let mut projects = HashMap::new();
        for project in &self.projects {
            if project.taxonomy.project_id() != &project.id {
                anyhow::bail!("project {}: taxonomy belongs to {}", project.id, project.taxonomy.project_id());
            }
            if projects.insert(project.id.clone(), project).is_some() {
                anyhow::bail!("duplicate project {}", project.id);
            }
        }

        let mut item_ids = HashSet::new();
        for dto in &self.items {
            let Some(project) = projects.get(&dto.project_id) else {
                anyhow::bail!("item {}: unknown project {}", dto.id, dto.project_id);
            };
            if !item_ids.insert(dto.id) {
                anyhow::bail!("duplicate item {}", dto.id);
            }
            if dto.backend_status().is_none() {
                anyhow::bail!("item {}: unknown status '{}'", dto.id, dto.status);
            }
            let item = dto
                .to_item()
                .ok_or_else(|| anyhow::anyhow!("item {}: status '{}' has no editor mapping", dto.id, dto.status))?;
            item.validate(&project.taxonomy)?;
        }

        for term in &self.glossary {
            if !projects.contains_key(&term.project_id) {
                anyhow::bail!("glossary term '{}': unknown project {}", term.term, term.project_id);
            }
        }
        Ok(())
    }
}
