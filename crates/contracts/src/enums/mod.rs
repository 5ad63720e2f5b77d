pub mod translation_status;

pub use translation_status::{BackendStatus, TranslationStatus};
