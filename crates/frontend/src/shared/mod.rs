pub mod api_utils;
pub mod url_state;
