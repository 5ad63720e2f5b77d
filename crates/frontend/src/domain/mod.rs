pub mod a001_project;
pub mod a002_translation_item;
