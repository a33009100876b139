//! 選択と保存のコントローラ
//!
//! チェックした検索結果と選択テキストを保存用レコードに整形し、
//! `POST /save_data` に送る。

use crate::alert::Alert;
use crate::backend::{endpoints, Backend};
use crate::error::{Error, Operation, Result, TransportError};
use crate::render::{UNKNOWN, UNTITLED};
use crate::search::SearchState;
use crate::source::SourceTag;
use crate::state::{Ticket, TicketCounter};
use crate::types::{NormalizedRecord, RecordId, SaveRequest, SaveResponse, SearchResult};
use std::time::Duration;
use tracing::{debug, error, info};

/// 保存成功からデータ倉庫へ移動するまでの待ち時間
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);
/// 選択テキストから作るタイトルの最大文字数
pub const TITLE_LIMIT: usize = 50;

pub const SELECT_ALL_LABEL: &str = "全选";
pub const ALL_SELECTED_LABEL: &str = "已全选";

/// 現在どの画面にいるか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageContext {
    SearchResults,
    DataWarehouse,
}

impl PageContext {
    /// URLのパスから判定
    pub fn from_path(path: &str) -> Self {
        if path.contains(endpoints::DATA_WAREHOUSE) {
            PageContext::DataWarehouse
        } else {
            PageContext::SearchResults
        }
    }
}

/// 全選択ボタンの表示（表示中のチェックボックスが全部チェック済みなら「已全选」）
pub fn select_all_label(checked: usize, total: usize) -> &'static str {
    if total > 0 && checked == total {
        ALL_SELECTED_LABEL
    } else {
        SELECT_ALL_LABEL
    }
}

/// 利用者の選択内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// 画面上で選択中のテキスト
    pub text: String,
    /// チェックした検索結果
    pub checked: Vec<RecordId>,
}

impl Selection {
    pub fn new(text: &str, checked: Vec<RecordId>) -> Self {
        Self { text: text.trim().to_string(), checked }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.checked.is_empty()
    }
}

/// 保存操作の入力
#[derive(Debug, Clone)]
pub struct SaveInput<'a> {
    pub context: PageContext,
    pub selection: &'a Selection,
    /// 検索欄の現在の値
    pub keyword_input: &'a str,
    /// 現在のページURL（選択テキストの出所として保存）
    pub page_url: &'a str,
}

/// 保存の計画
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePlan {
    /// データ倉庫画面では保存済みなので何もしない
    AlreadyPersisted(Alert),
    Submit(SaveRequest),
}

/// 保存の結末
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 保存成功。選択を解除し、少し待ってデータ倉庫へ移動する
    Saved { alert: Alert },
    Info { alert: Alert },
    Failed { alert: Alert },
    AlreadyPersisted { alert: Alert },
}

impl SaveOutcome {
    pub fn alert(&self) -> &Alert {
        match self {
            SaveOutcome::Saved { alert }
            | SaveOutcome::Info { alert }
            | SaveOutcome::Failed { alert }
            | SaveOutcome::AlreadyPersisted { alert } => alert,
        }
    }

    pub fn should_redirect(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

fn keyword_or_unknown(keyword_input: &str) -> String {
    let keyword = keyword_input.trim();
    if keyword.is_empty() {
        UNKNOWN.to_string()
    } else {
        keyword.to_string()
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// 選択テキストから1件作る
pub fn record_from_text(text: &str, keyword_input: &str, page_url: &str) -> NormalizedRecord {
    let mut title: String = text.chars().take(TITLE_LIMIT).collect();
    if text.chars().count() > TITLE_LIMIT {
        title.push_str("...");
    }
    NormalizedRecord {
        title: or_default(&title, UNTITLED),
        url: page_url.to_string(),
        source: SourceTag::ManualSelection.canonical().to_string(),
        summary: String::new(),
        content: text.to_string(),
        keyword: keyword_or_unknown(keyword_input),
    }
}

/// 検索結果を保存用に整形
pub fn record_from_result(result: &SearchResult, keyword_input: &str) -> NormalizedRecord {
    NormalizedRecord {
        title: or_default(&result.title, UNTITLED),
        url: result.url.clone().unwrap_or_default(),
        source: result.source.canonical().to_string(),
        summary: result.summary.clone(),
        content: String::new(),
        keyword: result
            .keyword
            .clone()
            .unwrap_or_else(|| keyword_or_unknown(keyword_input)),
    }
}

/// 選択内容から保存要求を組み立てる
///
/// チェックした結果が1件でも見つからなければ全体を中止する。
pub fn plan_save(input: &SaveInput<'_>, search: &SearchState) -> Result<SavePlan> {
    if input.context == PageContext::DataWarehouse {
        return Ok(SavePlan::AlreadyPersisted(Alert::info(
            "数据仓库中的数据已保存，无需重复保存",
        )));
    }
    if input.selection.is_empty() {
        return Err(Error::NoSelection);
    }

    let mut results = Vec::with_capacity(input.selection.checked.len() + 1);
    if !input.selection.text.is_empty() {
        results.push(record_from_text(
            &input.selection.text,
            input.keyword_input,
            input.page_url,
        ));
    }
    for id in &input.selection.checked {
        let result = search.find(*id).ok_or(Error::StaleSelection)?;
        results.push(record_from_result(result, input.keyword_input));
    }
    debug!(count = results.len(), "save request built");

    Ok(SavePlan::Submit(SaveRequest {
        results,
        keyword: keyword_or_unknown(input.keyword_input),
    }))
}

/// 保存要求の状態
#[derive(Debug, Clone, Default)]
pub struct SaveState {
    tickets: TicketCounter,
    loading: bool,
}

impl SaveState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.tickets.issue()
    }

    /// 応答を反映。古い要求の応答なら None
    pub fn finish(
        &mut self,
        ticket: Ticket,
        response: std::result::Result<Option<SaveResponse>, TransportError>,
    ) -> Option<SaveOutcome> {
        if !self.tickets.is_current(ticket) {
            return None;
        }
        self.loading = false;
        Some(save_outcome(response))
    }
}

/// 保存応答の解釈
pub fn save_outcome(
    response: std::result::Result<Option<SaveResponse>, TransportError>,
) -> SaveOutcome {
    let message = |response: &SaveResponse| response.message.clone().filter(|m| !m.is_empty());
    match response {
        Ok(Some(response)) => match response.status.as_deref() {
            Some("success") => {
                info!("save succeeded");
                SaveOutcome::Saved { alert: Alert::success("数据保存成功，正在跳转到数据仓库...") }
            }
            Some("info") => SaveOutcome::Info {
                alert: Alert::info(message(&response).unwrap_or_else(|| "操作已完成".to_string())),
            },
            _ => {
                error!(?response, "save rejected");
                SaveOutcome::Failed {
                    alert: Alert::error(
                        message(&response).unwrap_or_else(|| "保存失败，未知错误".to_string()),
                    ),
                }
            }
        },
        Ok(None) => SaveOutcome::Failed { alert: Alert::error("保存失败，服务器没有返回响应") },
        Err(err) => {
            error!(error = %err, "save request failed");
            SaveOutcome::Failed { alert: Alert::error(err.user_message(Operation::Save)) }
        }
    }
}

/// 選択内容を保存（検証・送信・応答の解釈まで）
pub async fn save_selected<B: Backend>(
    backend: &B,
    state: &mut SaveState,
    search: &SearchState,
    input: &SaveInput<'_>,
) -> Result<SaveOutcome> {
    let request = match plan_save(input, search)? {
        SavePlan::AlreadyPersisted(alert) => return Ok(SaveOutcome::AlreadyPersisted { alert }),
        SavePlan::Submit(request) => request,
    };
    let ticket = state.begin();
    let response = backend.save(&request).await;
    state
        .finish(ticket, response)
        .ok_or_else(|| Error::Backend("save superseded".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertKind;
    use crate::search::perform_search;
    use crate::testing::MockBackend;
    use crate::types::{SearchHit, SearchResponse};
    use futures::executor::block_on;

    fn searched_state(hits: Vec<SearchHit>) -> SearchState {
        let backend = MockBackend::default().with_search(Ok(SearchResponse {
            status: Some("success".into()),
            results: Some(hits),
            ..Default::default()
        }));
        let mut state = SearchState::default();
        block_on(perform_search(&backend, &mut state, "test")).unwrap();
        state
    }

    fn hit(title: &str, source: &str) -> SearchHit {
        SearchHit {
            title: Some(title.into()),
            url: Some(format!("http://x/{}", title)),
            summary: Some("摘要".into()),
            source: Some(source.into()),
            keyword: None,
        }
    }

    fn input<'a>(selection: &'a Selection, keyword: &'a str) -> SaveInput<'a> {
        SaveInput {
            context: PageContext::SearchResults,
            selection,
            keyword_input: keyword,
            page_url: "http://localhost/dashboard",
        }
    }

    #[test]
    fn test_page_context_from_path() {
        assert_eq!(PageContext::from_path("/data_warehouse"), PageContext::DataWarehouse);
        assert_eq!(PageContext::from_path("/dashboard"), PageContext::SearchResults);
    }

    #[test]
    fn test_select_all_label() {
        assert_eq!(select_all_label(3, 3), "已全选");
        assert_eq!(select_all_label(2, 3), "全选");
        assert_eq!(select_all_label(0, 0), "全选");
    }

    #[test]
    fn test_no_selection_sends_nothing() {
        let backend = MockBackend::default();
        let search = searched_state(vec![hit("a", "百度")]);
        let selection = Selection::new("   ", vec![]);

        let err = block_on(save_selected(
            &backend,
            &mut SaveState::default(),
            &search,
            &input(&selection, "test"),
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "请选择数据项或选中文本");
        assert!(backend.saves().is_empty());
    }

    #[test]
    fn test_warehouse_page_is_noop() {
        let backend = MockBackend::default();
        let selection = Selection::new("", vec![RecordId(1)]);
        let mut save_input = input(&selection, "k");
        save_input.context = PageContext::DataWarehouse;

        let outcome = block_on(save_selected(
            &backend,
            &mut SaveState::default(),
            &SearchState::default(),
            &save_input,
        ))
        .unwrap();
        assert_eq!(outcome.alert().kind, AlertKind::Info);
        assert!(backend.saves().is_empty());
    }

    #[test]
    fn test_text_selection_record() {
        let long: String = "字".repeat(60);
        let record = record_from_text(&long, "", "http://page");
        assert_eq!(record.title.chars().count(), TITLE_LIMIT + 3);
        assert!(record.title.ends_with("..."));
        assert_eq!(record.content, long);
        assert_eq!(record.source, "用户手动选择");
        assert_eq!(record.keyword, "未知");
        assert_eq!(record.url, "http://page");

        let short = record_from_text("短文本", "关键词", "");
        assert_eq!(short.title, "短文本");
        assert_eq!(short.keyword, "关键词");
    }

    #[test]
    fn test_checked_results_are_normalized() {
        let search = searched_state(vec![hit("a", "百度 - 知乎"), hit("b", "B站")]);
        let ids: Vec<_> = search.results().iter().map(|r| r.id).collect();
        let selection = Selection::new("", ids);

        let plan = plan_save(&input(&selection, " test "), &search).unwrap();
        let SavePlan::Submit(request) = plan else {
            panic!("送信されるはず");
        };
        assert_eq!(request.keyword, "test");
        assert_eq!(request.results.len(), 2);
        assert_eq!(request.results[0].source, "百度");
        assert_eq!(request.results[1].source, "Bilibili");
        assert_eq!(request.results[0].keyword, "test");
        assert_eq!(request.results[0].content, "");
        assert_eq!(request.results[0].summary, "摘要");
    }

    #[test]
    fn test_text_comes_before_checked_items() {
        let search = searched_state(vec![hit("a", "百度")]);
        let selection = Selection::new("选中的文字", vec![search.results()[0].id]);

        let SavePlan::Submit(request) = plan_save(&input(&selection, ""), &search).unwrap() else {
            panic!("送信されるはず");
        };
        assert_eq!(request.results[0].source, "用户手动选择");
        assert_eq!(request.results[1].title, "a");
        assert_eq!(request.keyword, "未知");
    }

    #[test]
    fn test_stale_id_aborts_batch() {
        let search = searched_state(vec![hit("a", "百度")]);
        let selection = Selection::new("text", vec![search.results()[0].id, RecordId(999)]);

        let err = plan_save(&input(&selection, "k"), &search).unwrap_err();
        assert!(matches!(err, Error::StaleSelection));
    }

    #[test]
    fn test_save_success_redirects() {
        let search = searched_state(vec![hit("a", "百度")]);
        let backend = MockBackend::default().with_save(Ok(Some(SaveResponse {
            status: Some("success".into()),
            message: Some("成功保存 1 条数据到数据库".into()),
        })));
        let selection = Selection::new("", vec![search.results()[0].id]);
        let mut state = SaveState::default();

        let outcome =
            block_on(save_selected(&backend, &mut state, &search, &input(&selection, "test")))
                .unwrap();
        assert!(outcome.should_redirect());
        assert_eq!(outcome.alert().message, "数据保存成功，正在跳转到数据仓库...");
        assert!(!state.is_loading());

        let sent = backend.saves();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].results[0].title, "a");
    }

    #[test]
    fn test_save_outcome_variants() {
        let info = save_outcome(Ok(Some(SaveResponse {
            status: Some("info".into()),
            message: Some("所有选中数据已存在于数据仓库中".into()),
        })));
        assert_eq!(info.alert().kind, AlertKind::Info);
        assert!(!info.should_redirect());

        let info_default = save_outcome(Ok(Some(SaveResponse {
            status: Some("info".into()),
            message: None,
        })));
        assert_eq!(info_default.alert().message, "操作已完成");

        let failed = save_outcome(Ok(Some(SaveResponse::default())));
        assert_eq!(failed.alert().message, "保存失败，未知错误");

        let empty = save_outcome(Ok(None));
        assert_eq!(empty.alert().message, "保存失败，服务器没有返回响应");

        let transport = save_outcome(Err(TransportError::http(503, Some("down".into()))));
        assert_eq!(transport.alert().message, "保存失败，状态码: 503");

        let html = Some("<!DOCTYPE html>".to_string());
        let unexpected =
            save_outcome(Err(TransportError::malformed(200, "expected value", html)));
        assert_eq!(unexpected.alert().message, "保存失败，未知错误");
        assert!(!unexpected.should_redirect());
    }

    #[test]
    fn test_stale_save_response_is_ignored() {
        let mut state = SaveState::default();
        let first = state.begin();
        let second = state.begin();
        assert!(state.finish(first, Ok(None)).is_none());
        assert!(state.is_loading());
        assert!(state.finish(second, Ok(None)).is_some());
        assert!(!state.is_loading());
    }
}
