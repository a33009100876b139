//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"小鱼搜索 - 信息采集与数据仓库"</h1>
        </header>
    }
}
