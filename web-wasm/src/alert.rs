//! 通知バナーの表示
//!
//! ログインフォームがあればその直前、なければ `.content` の先頭に差し込み、
//! 一定時間後にフェードアウトして取り除く。

use gloo::console;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};
use xiaoyu_common::{Alert, ALERT_DISMISS};

const FADE_MS: u32 = 600;

fn insert(document: &Document, element: &Element) -> bool {
    if let Ok(Some(form)) = document.query_selector(".login-form") {
        return form.before_with_node_1(element).is_ok();
    }
    if let Ok(Some(content)) = document.query_selector(".content") {
        return content.prepend_with_node_1(element).is_ok();
    }
    false
}

pub fn show_alert(alert: &Alert) {
    if alert.is_error() {
        console::error!(alert.message.as_str());
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(element) = document.create_element("div") else {
        return;
    };
    element.set_class_name(&format!("alert {}", alert.kind.css_class()));
    element.set_text_content(Some(&alert.message));

    if !insert(&document, &element) {
        console::warn!("通知の表示先が見つかりません", alert.message.as_str());
        return;
    }

    Timeout::new(ALERT_DISMISS.as_millis() as u32, move || {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            let style = html.style();
            let _ = style.set_property("transition", "opacity 0.6s");
            let _ = style.set_property("opacity", "0");
        }
        Timeout::new(FADE_MS, move || element.remove()).forget();
    })
    .forget();
}
