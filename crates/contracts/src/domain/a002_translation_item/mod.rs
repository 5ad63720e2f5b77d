pub mod aggregate;

pub use aggregate::{
    SaveTranslationRequest, TranslationItem, TranslationItemDto, TranslationItemId, TranslatorRef,
};
