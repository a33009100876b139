//! ブラウザ環境へのアクセス

use gloo::timers::callback::Timeout;
use std::time::Duration;

/// 画面上で選択中のテキスト
pub fn selected_text() -> String {
    web_sys::window()
        .and_then(|w| w.get_selection().ok().flatten())
        .map(|s| String::from(s.to_string()))
        .unwrap_or_default()
}

/// 選択範囲を解除
pub fn clear_selected_text() {
    if let Some(selection) = web_sys::window().and_then(|w| w.get_selection().ok().flatten()) {
        let _ = selection.remove_all_ranges();
    }
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn current_href() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

/// 一定時間後に別ページへ移動
pub fn navigate_after(delay: Duration, path: &'static str) {
    Timeout::new(delay.as_millis() as u32, move || {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    })
    .forget();
}
