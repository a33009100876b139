//! 検索結果一覧コンポーネント

use crate::components::loading::Loading;
use leptos::prelude::*;
use std::collections::HashSet;
use xiaoyu_common::render::EMPTY_RESULTS;
use xiaoyu_common::{AppState, RecordId, ResultRow};

#[component]
pub fn ResultsList(
    state: RwSignal<AppState>,
    selected: RwSignal<HashSet<RecordId>>,
) -> impl IntoView {
    let busy = move || state.with(|s| s.search.is_loading() || s.save.is_loading());

    view! {
        <div class="results-list">
            {move || {
                if busy() {
                    return view! { <Loading /> }.into_any();
                }
                let rows = state.with(|s| s.search.page_rows());
                if rows.is_empty() {
                    view! {
                        <div class="results-empty">
                            <p>{EMPTY_RESULTS}</p>
                        </div>
                    }
                    .into_any()
                } else {
                    rows.into_iter()
                        .map(|row| view! { <ResultItem row=row selected=selected /> })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn ResultItem(row: ResultRow, selected: RwSignal<HashSet<RecordId>>) -> impl IntoView {
    let id = row.id;
    let title = match row.url.clone() {
        Some(url) => view! {
            <a href=url target="_blank" class="result-title-link">{row.title.clone()}</a>
        }
        .into_any(),
        None => view! { <span>{row.title.clone()}</span> }.into_any(),
    };
    let url_link = row.url.clone().map(|url| {
        view! { <a href=url.clone() target="_blank" class="result-url-link">{url}</a> }
    });

    view! {
        <div class="result-item">
            <div class="result-header">
                <input
                    type="checkbox"
                    class="result-checkbox"
                    data-index=id.to_string()
                    prop:checked=move || selected.with(|s| s.contains(&id))
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        selected.update(|s| {
                            if checked {
                                s.insert(id);
                            } else {
                                s.remove(&id);
                            }
                        });
                    }
                />
                <div class="result-content">
                    <div class="result-title">
                        {title}
                        <span class=row.badge_class>{row.badge_label.clone()}</span>
                    </div>
                    <div class="result-url">{url_link}</div>
                    // 要約は描画側でエスケープ済み
                    <div class="result-summary" inner_html=row.summary_html></div>
                    <div class="result-meta">
                        <span class="data-source">"来源: "{row.badge_label}</span>
                    </div>
                </div>
            </div>
        </div>
    }
}
