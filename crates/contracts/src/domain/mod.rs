pub mod a001_project;
pub mod a002_translation_item;
pub mod a003_glossary_term;
pub mod common;
