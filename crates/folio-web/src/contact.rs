use crate::dom;
use folio_core::contact::{self, ContactFields, FIELD_NAMES};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const FORM_SELECTOR: &str = ".contact__form";

const SUCCESS_HTML: &str = r#"
<div class="form__success">
  <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" class="form__success-icon">
    <path d="M12 0c-6.627 0-12 5.373-12 12s5.373 12 12 12 12-5.373 12-12-5.373-12-12-12zm-1.25 17.292l-4.5-4.364 1.857-1.858 2.643 2.506 5.643-5.784 1.857 1.857-7.5 7.643z"/>
  </svg>
  <h3 class="form__success-title">Message Sent!</h3>
  <p class="form__success-text">Thank you for reaching out. I'll get back to you soon.</p>
</div>"#;

fn field_value(document: &web::Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn read_fields(document: &web::Document) -> ContactFields {
    ContactFields {
        name: field_value(document, "name"),
        email: field_value(document, "email"),
        subject: field_value(document, "subject"),
        message: field_value(document, "message"),
    }
}

fn error_element(field: &web::Element) -> Option<web::Element> {
    field
        .parent_element()?
        .query_selector(".form__error")
        .ok()
        .flatten()
}

fn mark_invalid(document: &web::Document, field: &web::Element, message: &str) {
    let _ = field.class_list().add_1("invalid");
    let existing = error_element(field);
    let el = match existing {
        Some(el) => el,
        None => {
            let (Some(parent), Ok(el)) = (field.parent_element(), document.create_element("div"))
            else {
                return;
            };
            el.set_class_name("form__error");
            let _ = parent.append_child(&el);
            el
        }
    };
    el.set_text_content(Some(message));
}

fn mark_valid(field: &web::Element) {
    let _ = field.class_list().remove_1("invalid");
    if let Some(el) = error_element(field) {
        el.remove();
    }
}

/// Validates the form in place. On success the form body is replaced by the
/// confirmation panel; returns whether it was accepted.
pub fn handle_submit(document: &web::Document, form: &web::Element) -> bool {
    let fields = read_fields(document);
    let errors = match contact::submit(&fields) {
        Ok(()) => {
            form.set_inner_html(SUCCESS_HTML);
            log::info!("[contact] message accepted");
            return true;
        }
        Err(errors) => errors,
    };
    for name in FIELD_NAMES {
        let Some(field) = document.get_element_by_id(name) else {
            continue;
        };
        match errors.get(name) {
            Some(msg) => mark_invalid(document, &field, msg),
            None => mark_valid(&field),
        }
    }
    log::info!("[contact] {} invalid fields", errors.len());
    false
}

pub fn wire(document: &web::Document) {
    let Some(form) = dom::query_one(document, FORM_SELECTOR) else {
        return;
    };
    let doc = document.clone();
    let form_el: web::Element = form.clone().into();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
        handle_submit(&doc, &form_el);
    }) as Box<dyn FnMut(_)>);
    let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
    closure.forget();
}
