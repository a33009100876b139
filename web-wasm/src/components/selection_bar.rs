//! 全選択・保存ボタンコンポーネント

use leptos::prelude::*;
use std::collections::HashSet;
use xiaoyu_common::{select_all_label, AppState, RecordId};

#[component]
pub fn SelectionBar<FS>(
    state: RwSignal<AppState>,
    selected: RwSignal<HashSet<RecordId>>,
    on_save: FS,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone,
{
    // 表示中のページにあるチェックボックスだけが対象
    let visible_ids = move || {
        state.with(|s| s.search.page_results().iter().map(|r| r.id).collect::<Vec<_>>())
    };
    let label = move || {
        let ids = visible_ids();
        let checked = selected.with(|s| ids.iter().filter(|id| s.contains(id)).count());
        select_all_label(checked, ids.len())
    };

    view! {
        <div class="selection-bar">
            <button
                id="select-all-btn"
                class="btn btn-secondary"
                on:click=move |_| {
                    let ids = visible_ids();
                    selected.update(|s| s.extend(ids));
                }
            >
                {label}
            </button>
            <button
                id="deselect-all-btn"
                class="btn btn-secondary"
                on:click=move |_| selected.set(HashSet::new())
            >
                "取消全选"
            </button>
            <button
                id="save-selected-btn"
                class="btn btn-primary"
                disabled=move || state.with(|s| s.save.is_loading())
                on:click={
                    let on_save = on_save.clone();
                    move |_| on_save(())
                }
            >
                "保存选中"
            </button>
        </div>
    }
}
