//! メインアプリケーションコンポーネント
//!
//! 画面状態は `AppState` 1つにまとめ、各操作は
//! 開始（同期）→ バックエンド呼び出し → 完了（同期）の順に進める。
//! 完了時に古い要求の応答だった場合は何もしない。

use crate::alert::show_alert;
use crate::api::FetchBackend;
use crate::components::{
    data_list::DataList, header::Header, pagination::Pagination, results_list::ResultsList,
    search_form::SearchForm, selection_bar::SelectionBar,
};
use crate::dom;
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use xiaoyu_common::{
    dates_from_response, endpoints, plan_save, Alert, AppState, Backend, Error, PageContext,
    RawDataFilter, RecordId, SaveInput, SavePlan, Selection, REDIRECT_DELAY,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let context = PageContext::from_path(&dom::current_path());

    // アプリケーション状態
    let state = RwSignal::new(AppState::new());
    let keyword = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let selected = RwSignal::new(HashSet::<RecordId>::new());

    let is_searching = Signal::derive(move || state.with(|s| s.search.is_loading()));
    let show_results = move || state.with(|s| s.search.has_searched() || s.search.is_loading());
    let is_warehouse = context == PageContext::DataWarehouse;

    // 検索ハンドラ
    let on_search = move |_: ()| {
        let input = keyword.get_untracked();
        let pending = match state.try_update(|s| s.search.begin(&input)) {
            Some(Ok(pending)) => pending,
            Some(Err(err)) => {
                show_alert(&Alert::from(&err));
                return;
            }
            None => return,
        };
        selected.set(HashSet::new());
        console::log!("开始搜索:", pending.keyword.as_str());

        spawn_local(async move {
            let response = FetchBackend.search(&pending.keyword).await;
            let outcome = state.try_update(|s| s.search.finish(&pending, response)).flatten();
            if let Some(outcome) = outcome {
                show_alert(outcome.alert());
            }
        });
    };

    // 絞り込みハンドラ
    let on_filter = move |_: ()| {
        let filter = RawDataFilter::new(date.get_untracked(), &keyword.get_untracked());
        let Some(pending) = state.try_update(|s| s.warehouse.begin(filter)) else {
            return;
        };

        spawn_local(async move {
            let response = FetchBackend.list_raw_data(&pending.filter).await;
            let outcome = state.try_update(|s| s.warehouse.finish(&pending, response)).flatten();
            if let Some(alert) = outcome.as_ref().and_then(|o| o.alert()) {
                show_alert(alert);
            }
        });
    };

    // 条件クリアハンドラ
    let on_clear = move |_: ()| {
        date.set(String::new());
        keyword.set(String::new());
        on_filter(());
    };

    // 保存ハンドラ
    let on_save = move |_: ()| {
        let mut checked: Vec<RecordId> = selected.get_untracked().into_iter().collect();
        checked.sort();
        let selection = Selection::new(&dom::selected_text(), checked);
        let keyword_input = keyword.get_untracked();
        let page_url = dom::current_href();
        let input = SaveInput {
            context: PageContext::from_path(&dom::current_path()),
            selection: &selection,
            keyword_input: &keyword_input,
            page_url: &page_url,
        };

        let request = match state.with_untracked(|s| plan_save(&input, &s.search)) {
            Ok(SavePlan::Submit(request)) => request,
            Ok(SavePlan::AlreadyPersisted(alert)) => {
                show_alert(&alert);
                return;
            }
            Err(err) => {
                show_alert(&Alert::from(&err));
                return;
            }
        };
        let Some(ticket) = state.try_update(|s| s.save.begin()) else {
            return;
        };

        spawn_local(async move {
            let response = FetchBackend.save(&request).await;
            let outcome = state.try_update(|s| s.save.finish(ticket, response)).flatten();
            let Some(outcome) = outcome else {
                return;
            };
            show_alert(outcome.alert());
            if outcome.should_redirect() {
                selected.set(HashSet::new());
                dom::clear_selected_text();
                dom::navigate_after(REDIRECT_DELAY, endpoints::DATA_WAREHOUSE);
            }
        });
    };

    // データ倉庫画面では開いた時点で一覧と日付候補を取得
    if is_warehouse {
        Effect::new(move |_| {
            on_filter(());
            spawn_local(async move {
                let dates = FetchBackend
                    .list_dates()
                    .await
                    .map_err(Error::from)
                    .and_then(dates_from_response);
                match dates {
                    Ok(dates) => state.update(|s| s.warehouse.set_dates(dates)),
                    Err(err) => console::warn!("获取日期列表失败:", err.to_string()),
                }
            });
        });
    }

    view! {
        <div class="container">
            <Header />

            <main class="content">
                <SearchForm keyword=keyword is_searching=is_searching on_search=on_search />

                <Show when=move || is_warehouse || show_results()>
                    <SelectionBar state=state selected=selected on_save=on_save />
                </Show>

                <Show when=show_results>
                    <section id="results-section" class="results-section">
                        <ResultsList state=state selected=selected />
                        <Pagination state=state />
                    </section>
                </Show>

                <Show when=move || is_warehouse>
                    <DataList state=state date=date on_filter=on_filter on_clear=on_clear />
                </Show>
            </main>
        </div>
    }
}
