use folio_core::error::{EngineError, Result};
use folio_core::PreferenceStore;
use web_sys as web;

/// `window.localStorage`. Private browsing modes may throw on access or
/// refuse writes; both surface as `StorageUnavailable`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

fn unavailable(e: wasm_bindgen::JsValue) -> EngineError {
    EngineError::StorageUnavailable(format!("{:?}", e))
}

fn local_storage() -> Result<web::Storage> {
    web::window()
        .ok_or_else(|| EngineError::StorageUnavailable("no window".into()))?
        .local_storage()
        .map_err(unavailable)?
        .ok_or_else(|| EngineError::StorageUnavailable("localStorage missing".into()))
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()?.get_item(key).map_err(unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        local_storage()?.set_item(key, value).map_err(unavailable)
    }
}

pub fn prefers_dark() -> bool {
    web::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map_or(false, |mq| mq.matches())
}
