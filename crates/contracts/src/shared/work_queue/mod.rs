pub mod command;
pub mod filter_engine;
pub mod filter_spec;
pub mod navigator;
pub mod pagination;
pub mod progress;
pub mod query_params;
pub mod route;
pub mod session;
pub mod store;

pub use command::EditorCommand;
pub use filter_engine::{apply, FilteredView};
pub use filter_spec::FilterSpec;
pub use navigator::QueueNavigator;
pub use pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use progress::{progress_by_category, CategoryProgress, TranslationProgress};
pub use query_params::{QueryHint, QueryParams, QueryState};
pub use route::{EditorRoute, EntryPoint, ListRoute};
pub use session::{EditorSession, FailedSave};
pub use store::{LoadReport, PendingSave, WorkItemStore};
