//! Translation Editor UI Module
//!
//! MVVM:
//! - model.rs: API functions (project, items, glossary, save)
//! - view_model.rs: editor session in signals, keyboard commands, URL sync
//! - view.rs: Leptos components

pub(crate) mod model;
mod view;
mod view_model;

pub use view::TranslationEditor;
pub use view_model::TranslationEditorViewModel;
