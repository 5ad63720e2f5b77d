use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Идентификатор агрегата, который умеет жить в сегменте пути URL
/// и в ключах API.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    fn as_string(&self) -> String;

    /// Разбор из сегмента пути; ошибка содержит текст для лога
    fn from_string(s: &str) -> Result<Self, String>;
}
