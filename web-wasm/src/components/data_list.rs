//! データ倉庫コンポーネント
//!
//! 日付と検索欄のキーワードで絞り込んだ保存済みレコードを一覧表示する。

use crate::components::loading::Loading;
use leptos::prelude::*;
use xiaoyu_common::render::EMPTY_DATA;
use xiaoyu_common::{AppState, DataRow};

#[component]
pub fn DataList<FF, FC>(
    state: RwSignal<AppState>,
    date: RwSignal<String>,
    on_filter: FF,
    on_clear: FC,
) -> impl IntoView
where
    FF: Fn(()) + 'static + Clone,
    FC: Fn(()) + 'static + Clone,
{
    let busy = move || state.with(|s| s.warehouse.is_loading() || s.save.is_loading());

    view! {
        <section class="data-warehouse">
            <form
                id="filter-form"
                class="filter-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    on_filter(());
                }
            >
                <input
                    type="date"
                    id="date-filter"
                    list="date-options"
                    prop:value=move || date.get()
                    on:input=move |ev| date.set(event_target_value(&ev))
                />
                <datalist id="date-options">
                    {move || {
                        state
                            .with(|s| s.warehouse.dates().to_vec())
                            .into_iter()
                            .map(|d| view! { <option value=d></option> })
                            .collect_view()
                    }}
                </datalist>
                <button type="submit" class="btn btn-primary">"筛选"</button>
                <button
                    type="button"
                    id="reset-filter"
                    class="btn btn-secondary"
                    on:click={
                        let on_clear = on_clear.clone();
                        move |_| on_clear(())
                    }
                >
                    "重置"
                </button>
            </form>

            <div class="data-stats">
                {move || state.with(|s| s.warehouse.stats_label()).unwrap_or_default()}
            </div>

            <div class="data-list">
                {move || {
                    if busy() {
                        return view! { <Loading /> }.into_any();
                    }
                    let rows = state.with(|s| s.warehouse.rows());
                    if rows.is_empty() {
                        view! {
                            <div class="data-empty">
                                <p>{EMPTY_DATA}</p>
                            </div>
                        }
                        .into_any()
                    } else {
                        rows.into_iter()
                            .map(|row| view! { <DataItem row=row /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
        </section>
    }
}

#[component]
fn DataItem(row: DataRow) -> impl IntoView {
    let title = match row.url.clone() {
        Some(url) => view! {
            <h4>
                <a href=url target="_blank" class="data-title-link">{row.title.clone()}</a>
            </h4>
        }
        .into_any(),
        None => view! { <h4>{row.title.clone()}</h4> }.into_any(),
    };

    view! {
        <div class="data-item">
            <div class="data-item-header">
                <input type="checkbox" class="data-checkbox" data-index=row.index.to_string() />
                {title}
            </div>
            <div class="data-item-meta">
                <span>"关键词："{row.keyword}</span>
                <span>"日期："{row.date}</span>
                <span>"来源："{row.source}</span>
            </div>
            <div class="data-item-summary">{row.content}</div>
            <div class="data-item-actions">
                <button type="button" class="btn btn-secondary view-details">"查看详情"</button>
                <button type="button" class="btn btn-primary generate-report">"生成报告"</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn text_of(host: &web_sys::Element, selector: &str) -> String {
        host.query_selector(selector)
            .unwrap()
            .and_then(|e| e.text_content())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn test_data_item_markup() {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&host).unwrap();

        let row = DataRow {
            index: 2,
            title: "标题".into(),
            url: Some("https://example.com".into()),
            keyword: "rust".into(),
            date: "2024-05-01 10:20".into(),
            source: "B站".into(),
            content: "无内容".into(),
        };
        let _mounted = leptos::mount::mount_to(host.clone().unchecked_into(), move || {
            view! { <DataItem row=row /> }
        });

        let checkbox = host.query_selector(".data-item-header .data-checkbox").unwrap().unwrap();
        assert_eq!(checkbox.get_attribute("data-index").as_deref(), Some("2"));
        assert_eq!(text_of(&host, ".data-item-header h4 a.data-title-link"), "标题");

        let meta = host.query_selector_all(".data-item-meta span").unwrap();
        let labels: Vec<String> = (0..meta.length())
            .filter_map(|i| meta.item(i).and_then(|n| n.text_content()))
            .collect();
        assert_eq!(labels, ["关键词：rust", "日期：2024-05-01 10:20", "来源：B站"]);

        assert_eq!(text_of(&host, ".data-item-summary"), "无内容");
        let report = host.query_selector(".data-item-actions .generate-report").unwrap().unwrap();
        assert_eq!(report.class_name(), "btn btn-primary generate-report");
    }
}
