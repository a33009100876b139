//! 検索フォームコンポーネント

use leptos::prelude::*;
use xiaoyu_common::search::SEARCHING_LABEL;

#[component]
pub fn SearchForm<FS>(
    keyword: RwSignal<String>,
    is_searching: Signal<bool>,
    on_search: FS,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone,
{
    view! {
        <form
            id="search-form"
            class="search-form"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                on_search(());
            }
        >
            <input
                type="text"
                id="search-keyword"
                placeholder="输入关键词..."
                prop:value=move || keyword.get()
                on:input=move |ev| {
                    keyword.set(event_target_value(&ev));
                }
            />
            <button type="submit" id="search-btn" class="btn btn-primary" disabled=move || is_searching.get()>
                {move || if is_searching.get() {
                    view! { <i class="search-icon">"⏳"</i><span>{SEARCHING_LABEL}</span> }.into_any()
                } else {
                    view! { <i class="search-icon">"🔍"</i><span>"搜索"</span> }.into_any()
                }}
            </button>
        </form>
    }
}
