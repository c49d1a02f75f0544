use folio_core::EngineConfig;
use web_sys as web;

/// `<script type="application/json" id="folio-config">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

pub fn parse_config(text: &str) -> anyhow::Result<EngineConfig> {
    let cfg: EngineConfig = serde_json::from_str(text)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Page overrides when present and valid, the built-in config otherwise.
pub fn load_config(document: &web::Document) -> EngineConfig {
    let Some(el) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return EngineConfig::default();
    };
    let text = el.text_content().unwrap_or_default();
    match parse_config(&text) {
        Ok(cfg) => {
            log::info!("[config] loaded {} behaviors from #{}", cfg.behaviors.len(), CONFIG_ELEMENT_ID);
            cfg
        }
        Err(e) => {
            log::warn!("[config] ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            EngineConfig::default()
        }
    }
}
