//! Сериализация состояния фильтра в плоские параметры URL и обратно.
//!
//! `from_params` является единственной точкой, через которую недоверенные параметры
//! попадают в ядро: неизвестные категории отбрасываются здесь, поэтому
//! дальше по цепочке приходит только корректный фильтр.

use super::filter_spec::FilterSpec;
use crate::domain::a001_project::aggregate::Taxonomy;
use crate::enums::TranslationStatus;
use std::collections::BTreeMap;

pub const MAIN_CATEGORY: &str = "mainCategory";
pub const MAIN_CATEGORY_NAME: &str = "mainCategoryName";
pub const SUB_CATEGORY: &str = "subCategory";
pub const SUB_CATEGORIES: &str = "subCategories";
pub const STATUS: &str = "status";
pub const SEARCH: &str = "search";
/// Номер страницы списка; в фильтр не входит
pub const PAGE: &str = "page";

/// Значение `status`, означающее «без ограничения»
const STATUS_ALL: &str = "all";

pub type QueryParams = BTreeMap<String, String>;

/// Подсказки, которые передаются вместе с фильтром, но не влияют на отбор
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryHint {
    /// Отображаемое имя основной категории (не авторитетно)
    pub main_category_name: Option<String>,
    /// Явный список подкатегорий для выпадающего списка
    pub sub_categories: Option<Vec<String>>,
}

/// Результат разбора параметров
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub spec: FilterSpec,
    pub hint: QueryHint,
    pub available_sub_categories: Vec<String>,
}

fn non_empty<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Список `subCategories`: через запятую, каждый элемент percent-decoded
fn decode_sub_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| {
            urlencoding::decode(part)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| part.to_string())
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn encode_sub_categories(list: &[String]) -> String {
    list.iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Спецификация фильтра и подсказки → плоские параметры
pub fn to_params(spec: &FilterSpec, hint: &QueryHint) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(main) = spec.main_category_id() {
        params.insert(MAIN_CATEGORY.to_string(), main.to_string());
        if let Some(name) = hint.main_category_name.as_deref().filter(|n| !n.is_empty()) {
            params.insert(MAIN_CATEGORY_NAME.to_string(), name.to_string());
        }
    }
    if let Some(sub) = spec.sub_category_id() {
        params.insert(SUB_CATEGORY.to_string(), sub.to_string());
    }
    if let Some(list) = hint.sub_categories.as_deref().filter(|l| !l.is_empty()) {
        params.insert(SUB_CATEGORIES.to_string(), encode_sub_categories(list));
    }
    if let Some(status) = spec.status() {
        params.insert(STATUS.to_string(), status.code().to_string());
    }
    if let Some(search) = spec.search_text() {
        params.insert(SEARCH.to_string(), search.to_string());
    }
    params
}

/// Плоские параметры → санитизированная спецификация и доступные подкатегории.
///
/// - неизвестная `mainCategory` отбрасывается, доступные подкатегории:
///   объединение всех подкатегорий таксономии;
/// - известная `mainCategory` даёт её список, если явный `subCategories`
///   не передан (явный список имеет приоритет);
/// - `subCategory` вне выбранной категории отбрасывается, как и вместе
///   с отброшенной основной категорией;
/// - неизвестные ключи игнорируются.
pub fn from_params(params: &QueryParams, taxonomy: &Taxonomy) -> QueryState {
    let explicit = non_empty(params, SUB_CATEGORIES)
        .map(decode_sub_categories)
        .filter(|list| !list.is_empty());

    let requested_main = non_empty(params, MAIN_CATEGORY);
    let main = requested_main.and_then(|id| taxonomy.find_main(id));
    if let (Some(id), None) = (requested_main, main) {
        log::warn!("query: unknown main category '{}' dropped", id);
    }

    let (available, hint) = match (requested_main, main) {
        (Some(_), None) => (taxonomy.all_sub_categories(), QueryHint::default()),
        (Some(_), Some(category)) => {
            let hint = QueryHint {
                main_category_name: non_empty(params, MAIN_CATEGORY_NAME).map(str::to_string),
                sub_categories: explicit.clone(),
            };
            let available = explicit.unwrap_or_else(|| category.sub_categories.clone());
            (available, hint)
        }
        (None, _) => {
            let hint = QueryHint {
                main_category_name: None,
                sub_categories: explicit.clone(),
            };
            let available = explicit.unwrap_or_else(|| taxonomy.all_sub_categories());
            (available, hint)
        }
    };

    let mut spec = FilterSpec::new().with_main_category(main.map(|c| c.id.as_str()));
    // отброшенная основная категория сбрасывает и подкатегорию
    let main_dropped = requested_main.is_some() && main.is_none();
    if let Some(sub) = non_empty(params, SUB_CATEGORY).filter(|_| !main_dropped) {
        match spec.with_sub_category(Some(sub), taxonomy) {
            Ok(with_sub) => spec = with_sub,
            Err(e) => log::warn!("query: sub category dropped: {}", e),
        }
    }

    let status = non_empty(params, STATUS).and_then(|code| {
        if code == STATUS_ALL {
            return None;
        }
        let parsed = TranslationStatus::from_code(code);
        if parsed.is_none() {
            log::warn!("query: unknown status '{}' dropped", code);
        }
        parsed
    });
    let spec = spec
        .with_status(status)
        .with_search(non_empty(params, SEARCH));

    QueryState {
        spec,
        hint,
        available_sub_categories: available,
    }
}

/// Номер страницы из параметров; отсутствующий или некорректный даёт 1
pub fn page_number(params: &QueryParams) -> usize {
    non_empty(params, PAGE)
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Параметры с номером страницы; первая страница в URL не пишется
pub fn with_page(mut params: QueryParams, page: usize) -> QueryParams {
    if page > 1 {
        params.insert(PAGE.to_string(), page.to_string());
    } else {
        params.remove(PAGE);
    }
    params
}

/// Разбор строки запроса (`?a=b&c=d`) в плоские параметры.
///
/// Пары разбираются по одной: пара, которую не удаётся разобрать как плоскую
/// (`utm[src]=x`, битое экранирование), пропускается, остальные сохраняются.
/// Для повторяющегося ключа берётся первое значение.
pub fn parse_query_string(query: &str) -> QueryParams {
    let mut params = QueryParams::new();
    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        match serde_qs::from_str::<QueryParams>(pair) {
            Ok(parsed) => {
                for (key, value) in parsed {
                    params.entry(key).or_insert(value);
                }
            }
            Err(e) => log::warn!("query: pair '{}' ignored: {}", pair, e),
        }
    }
    params
}

/// Плоские параметры → строка запроса без ведущего `?`
pub fn to_query_string(params: &QueryParams) -> String {
    serde_qs::to_string(params).unwrap_or_default()
}
