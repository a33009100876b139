//! 処理中表示コンポーネント

use leptos::prelude::*;
use xiaoyu_common::render::LOADING;

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading-container">
            <div class="loading-spinner"></div>
            <p class="loading-text">{LOADING}</p>
        </div>
    }
}
