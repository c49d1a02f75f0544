use folio_core::{Typewriter, TypewriterConfig};
use web_sys as web;

const TYPED_ID: &str = "typed-text";

/// Hero tagline driven by the typewriter, ticked from the frame loop.
pub struct TypedText {
    el: web::Element,
    writer: Typewriter,
}

impl TypedText {
    pub fn attach(document: &web::Document, cfg: &TypewriterConfig) -> Option<Self> {
        let el = document.get_element_by_id(TYPED_ID)?;
        if !cfg.cursor_char.is_empty() {
            if let Ok(cursor) = document.create_element("span") {
                cursor.set_class_name("typed-cursor");
                cursor.set_text_content(Some(&cfg.cursor_char));
                let _ = el.after_with_node_1(&cursor);
            }
        }
        el.set_text_content(Some(""));
        Some(Self {
            el,
            writer: Typewriter::new(cfg),
        })
    }

    pub fn tick(&mut self, dt_ms: f32) {
        if self.writer.tick(dt_ms) {
            self.el.set_text_content(Some(self.writer.text()));
        }
    }

    pub fn text(&self) -> String {
        self.el.text_content().unwrap_or_default()
    }
}
