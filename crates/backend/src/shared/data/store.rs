//! Хранилище элементов перевода в памяти.
//!
//! Данными владеет одна задача tokio; обработчики общаются с ней через
//! `mpsc`-канал команд и получают ответы через `oneshot`. Все изменения
//! таким образом сериализованы без блокировок.

use super::seed::SeedData;
use chrono::Utc;
use contracts::domain::a001_project::aggregate::{Project, ProjectId, ProjectSummary};
use contracts::domain::a002_translation_item::aggregate::{TranslationItemDto, TranslationItemId};
use contracts::domain::a003_glossary_term::aggregate::GlossaryTerm;
use contracts::shared::errors::ValidationError;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

const STORE_COMMAND_CHANNEL_CAPACITY: usize = 64;

static STORE: OnceCell<StoreHandle> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("translation item {0} not found")]
    ItemNotFound(TranslationItemId),
    #[error("translation item {id}: stored status '{status}' is not recognised")]
    UnknownStatus { id: TranslationItemId, status: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("store task is not running")]
    Closed,
}

enum Command {
    ListProjects {
        reply: oneshot::Sender<Vec<ProjectSummary>>,
    },
    GetProject {
        id: ProjectId,
        reply: oneshot::Sender<Option<Project>>,
    },
    ListItems {
        project_id: ProjectId,
        reply: oneshot::Sender<Option<Vec<TranslationItemDto>>>,
    },
    ListGlossary {
        project_id: ProjectId,
        reply: oneshot::Sender<Option<Vec<GlossaryTerm>>>,
    },
    SaveTranslation {
        id: TranslationItemId,
        target_text: String,
        reply: oneshot::Sender<Result<TranslationItemDto, StoreError>>,
    },
}

/// Состояние, которым владеет задача хранилища
struct StoreState {
    projects: Vec<Project>,
    items: Vec<TranslationItemDto>,
    index: HashMap<TranslationItemId, usize>,
    glossary: Vec<GlossaryTerm>,
}

impl StoreState {
    fn new(seed: SeedData) -> Self {
        let index = seed
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect();
        Self {
            projects: seed.projects,
            items: seed.items,
            index,
            glossary: seed.glossary,
        }
    }

    fn has_project(&self, id: &ProjectId) -> bool {
        self.projects.iter().any(|p| &p.id == id)
    }

    fn handle(&mut self, command: Command) {
        // получатель мог уже уйти (клиент закрыл соединение), ответ теряется
        match command {
            Command::ListProjects { reply } => {
                let _ = reply.send(self.projects.iter().map(ProjectSummary::from).collect());
            }
            Command::GetProject { id, reply } => {
                let _ = reply.send(self.projects.iter().find(|p| p.id == id).cloned());
            }
            Command::ListItems { project_id, reply } => {
                let items = self.has_project(&project_id).then(|| {
                    self.items
                        .iter()
                        .filter(|item| item.project_id == project_id)
                        .cloned()
                        .collect()
                });
                let _ = reply.send(items);
            }
            Command::ListGlossary { project_id, reply } => {
                let terms = self.has_project(&project_id).then(|| {
                    self.glossary
                        .iter()
                        .filter(|term| term.project_id == project_id)
                        .cloned()
                        .collect()
                });
                let _ = reply.send(terms);
            }
            Command::SaveTranslation {
                id,
                target_text,
                reply,
            } => {
                let _ = reply.send(self.save_translation(id, &target_text));
            }
        }
    }

    fn save_translation(
        &mut self,
        id: TranslationItemId,
        target_text: &str,
    ) -> Result<TranslationItemDto, StoreError> {
        let pos = *self.index.get(&id).ok_or(StoreError::ItemNotFound(id))?;
        let stored = &self.items[pos];
        let mut item = stored.to_item().ok_or_else(|| StoreError::UnknownStatus {
            id,
            status: stored.status.clone(),
        })?;
        item.apply_translation(target_text, Utc::now())?;
        let dto = item.to_dto();
        tracing::info!("translation item {} saved with status {}", id, dto.status);
        self.items[pos] = dto.clone();
        Ok(dto)
    }
}

async fn run(mut state: StoreState, mut commands: mpsc::Receiver<Command>) {
    while let Some(command) = commands.recv().await {
        state.handle(command);
    }
    tracing::info!("store task stopped");
}

/// Клиентская сторона хранилища; клонируется свободно
#[derive(Clone)]
pub struct StoreHandle {
    commands: mpsc::Sender<Command>,
}

impl StoreHandle {
    /// Запустить задачу хранилища в текущем рантайме
    pub fn spawn(seed: SeedData) -> Self {
        let (commands, receiver) = mpsc::channel(STORE_COMMAND_CHANNEL_CAPACITY);
        tokio::spawn(run(StoreState::new(seed), receiver));
        Self { commands }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, StoreError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(make(reply))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Closed)
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, StoreError> {
        self.request(|reply| Command::ListProjects { reply }).await
    }

    pub async fn get_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        self.request(|reply| Command::GetProject { id, reply }).await
    }

    /// Все элементы проекта; `None`, если проект не найден
    pub async fn list_items(
        &self,
        project_id: ProjectId,
    ) -> Result<Option<Vec<TranslationItemDto>>, StoreError> {
        self.request(|reply| Command::ListItems { project_id, reply })
            .await
    }

    pub async fn list_glossary(
        &self,
        project_id: ProjectId,
    ) -> Result<Option<Vec<GlossaryTerm>>, StoreError> {
        self.request(|reply| Command::ListGlossary { project_id, reply })
            .await
    }

    pub async fn save_translation(
        &self,
        id: TranslationItemId,
        target_text: String,
    ) -> Result<TranslationItemDto, StoreError> {
        self.request(|reply| Command::SaveTranslation {
            id,
            target_text,
            reply,
        })
        .await?
    }
}

pub fn initialize_store(seed: SeedData) -> anyhow::Result<()> {
    tracing::info!(
        "Starting store: {} projects, {} items, {} glossary terms",
        seed.projects.len(),
        seed.items.len(),
        seed.glossary.len()
    );
    STORE
        .set(StoreHandle::spawn(seed))
        .map_err(|_| anyhow::anyhow!("store already initialized"))
}

pub fn get_store() -> &'static StoreHandle {
    STORE
        .get()
        .expect("Store has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectId {
        ProjectId::new("spt-tarkov")
    }

    #[tokio::test]
    async fn test_lists_seeded_project() {
        let store = StoreHandle::spawn(SeedData::embedded().unwrap());
        let projects = store.list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].category_count, 3);

        let items = store.list_items(project()).await.unwrap().unwrap();
        assert_eq!(items.len(), 8);
        assert!(store.list_items(ProjectId::new("ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_moves_item_to_review() {
        let store = StoreHandle::spawn(SeedData::embedded().unwrap());
        let saved = store
            .save_translation(TranslationItemId(1), "플랫폼에 오신 것을 환영합니다".into())
            .await
            .unwrap();
        assert_eq!(saved.status, "reviewRequired");

        let items = store.list_items(project()).await.unwrap().unwrap();
        let stored = items.iter().find(|i| i.id == TranslationItemId(1)).unwrap();
        assert_eq!(stored.target_text, "플랫폼에 오신 것을 환영합니다");
    }

    #[tokio::test]
    async fn test_empty_save_is_rejected_and_item_unchanged() {
        let store = StoreHandle::spawn(SeedData::embedded().unwrap());
        let result = store
            .save_translation(TranslationItemId(2), "   ".into())
            .await;
        assert!(matches!(
            result,
            Err(StoreError::Validation(ValidationError::EmptyTranslation))
        ));
        let items = store.list_items(project()).await.unwrap().unwrap();
        let stored = items.iter().find(|i| i.id == TranslationItemId(2)).unwrap();
        assert_eq!(stored.status, "completed");
    }

    #[tokio::test]
    async fn test_save_unknown_item() {
        let store = StoreHandle::spawn(SeedData::embedded().unwrap());
        let result = store
            .save_translation(TranslationItemId(404), "x".into())
            .await;
        assert!(matches!(result, Err(StoreError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_saves_are_serialized() {
        let store = StoreHandle::spawn(SeedData::embedded().unwrap());
        let handles: Vec<_> = (0..10)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .save_translation(TranslationItemId(3), format!("번역 {n}"))
                        .await
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        let items = store.list_items(project()).await.unwrap().unwrap();
        let stored = items.iter().find(|i| i.id == TranslationItemId(3)).unwrap();
        assert!(stored.target_text.starts_with("번역 "));
        assert_eq!(stored.status, "reviewRequired");
    }
}
