//! Адрес backend и общий GET-запрос фронтенда

use contracts::shared::errors::PersistenceError;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// Базовый URL API: хост текущей страницы, порт backend 3000.
/// Без `window` (например, в нативных тестах) пустая строка.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Полный URL по пути API, например `api_url("/api/project")`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Путь ресурса проекта с экранированным идентификатором
pub fn project_path(project_id: &str, resource: Option<&str>) -> String {
    let base = format!("/api/project/{}", urlencoding::encode(project_id));
    match resource {
        Some(resource) => format!("{}/{}", base, resource),
        None => base,
    }
}

/// GET с разбором JSON; сбои транспорта, HTTP и декодирования различаются
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, PersistenceError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| PersistenceError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(PersistenceError::Http {
            status: response.status(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| PersistenceError::Transport(e.to_string()))?;

    serde_json::from_str::<T>(&text).map_err(|e| PersistenceError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_path_escapes_id() {
        assert_eq!(project_path("spt tarkov", None), "/api/project/spt%20tarkov");
        assert_eq!(project_path("spt", Some("items")), "/api/project/spt/items");
    }
}
