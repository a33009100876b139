//! 検索コントローラ
//!
//! キーワード検索の発行、結果の保持、ページ送り。
//! `begin` → バックエンド呼び出し → `finish` の3段階で状態を更新するので、
//! 非同期の待機中に状態を借用し続ける必要がない。

use crate::alert::Alert;
use crate::backend::Backend;
use crate::error::{Error, Operation, Result, TransportError};
use crate::pagination::{PageAction, Pager, PaginationView};
use crate::render::ResultRow;
use crate::state::{Ticket, TicketCounter};
use crate::types::{RecordId, SearchHit, SearchResponse, SearchResult};
use tracing::{debug, error, warn};

/// 検索中のボタン表示
pub const SEARCHING_LABEL: &str = "搜索中...";

/// 発行済みの検索要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub ticket: Ticket,
    pub keyword: String,
}

/// 検索の結末
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// 結果を受け取った（模擬結果の場合は warning）
    Loaded { alert: Alert, count: usize },
    /// バックエンドが失敗を返した。結果は空
    Rejected { alert: Alert },
    /// 通信失敗。模擬結果1件で画面を埋めた
    Fallback { alert: Alert },
}

impl SearchOutcome {
    pub fn alert(&self) -> &Alert {
        match self {
            SearchOutcome::Loaded { alert, .. }
            | SearchOutcome::Rejected { alert }
            | SearchOutcome::Fallback { alert } => alert,
        }
    }
}

/// 検索画面の状態
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    results: Vec<SearchResult>,
    pager: Pager,
    tickets: TicketCounter,
    next_id: u64,
    loading: bool,
    searched: bool,
}

impl SearchState {
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 一度でも検索したか（結果欄の表示切り替え用）
    pub fn has_searched(&self) -> bool {
        self.searched
    }

    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    pub fn find(&self, id: RecordId) -> Option<&SearchResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// 現在ページの結果
    pub fn page_results(&self) -> &[SearchResult] {
        &self.results[self.pager.slice_range(self.results.len())]
    }

    /// 現在ページの表示モデル
    pub fn page_rows(&self) -> Vec<ResultRow> {
        self.page_results().iter().map(ResultRow::from).collect()
    }

    pub fn pagination(&self) -> Option<PaginationView> {
        self.pager.view(self.results.len())
    }

    /// ページを移動。表示範囲は `page_results` が現在ページから導くので
    /// 結果一覧とページ送りバーは常に揃う。
    pub fn change_page(&mut self, action: PageAction) -> bool {
        self.pager.apply(action, self.results.len())
    }

    /// 検索開始。空キーワードは要求を出さずにエラー
    pub fn begin(&mut self, keyword: &str) -> Result<PendingSearch> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::EmptyKeyword);
        }

        let ticket = self.tickets.issue();
        self.results.clear();
        self.pager.reset();
        self.loading = true;
        self.searched = true;
        debug!(keyword, "search started");

        Ok(PendingSearch { ticket, keyword: keyword.to_string() })
    }

    /// 応答を反映。より新しい検索が発行済みなら None を返し何もしない
    pub fn finish(
        &mut self,
        pending: &PendingSearch,
        response: std::result::Result<SearchResponse, TransportError>,
    ) -> Option<SearchOutcome> {
        if !self.tickets.is_current(pending.ticket) {
            warn!(keyword = %pending.keyword, "discarding stale search response");
            return None;
        }
        self.loading = false;
        self.pager.reset();

        let outcome = match response {
            Ok(response) if response.is_success() => {
                let hits = response.results.unwrap_or_default();
                self.replace_results(hits);
                let count = self.results.len();
                let alert = if response.is_mock {
                    warn!(keyword = %pending.keyword, "backend returned mock results");
                    Alert::warning("当前显示的是模拟结果，实际搜索可能需要调整")
                } else {
                    Alert::success(format!("搜索完成，共找到 {} 条结果", count))
                };
                SearchOutcome::Loaded { alert, count }
            }
            Ok(response) => {
                self.results.clear();
                let message = response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "搜索失败".to_string());
                error!(%message, "search rejected");
                SearchOutcome::Rejected { alert: Alert::error(message) }
            }
            Err(err) if err.is_malformed() => {
                self.results.clear();
                error!(error = %err, "unexpected search response");
                SearchOutcome::Rejected { alert: Alert::error(err.user_message(Operation::Search)) }
            }
            Err(err) => {
                error!(error = %err, "search request failed");
                let message = err.user_message(Operation::Search);
                self.replace_results(vec![mock_hit(&pending.keyword)]);
                SearchOutcome::Fallback { alert: Alert::error(message) }
            }
        };
        Some(outcome)
    }

    fn replace_results(&mut self, hits: Vec<SearchHit>) {
        self.results = hits
            .into_iter()
            .map(|hit| {
                self.next_id += 1;
                SearchResult::ingest(RecordId(self.next_id), hit)
            })
            .collect();
    }
}

/// 通信失敗時に画面を空にしないための模擬結果
pub fn mock_hit(keyword: &str) -> SearchHit {
    SearchHit {
        title: Some(format!("关于\"{}\"的示例结果", keyword)),
        url: Some("#".to_string()),
        summary: Some("这是一个模拟的搜索结果。实际搜索功能可能需要修复或调整。".to_string()),
        source: Some("系统测试".to_string()),
        keyword: None,
    }
}

/// 検索を1回実行（発行から反映まで）
pub async fn perform_search<B: Backend>(
    backend: &B,
    state: &mut SearchState,
    keyword: &str,
) -> Result<SearchOutcome> {
    let pending = state.begin(keyword)?;
    let response = backend.search(&pending.keyword).await;
    // 同じ状態を排他的に借りているので、ここで発行した整理券が最新
    state
        .finish(&pending, response)
        .ok_or_else(|| Error::Backend("search superseded".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertKind;
    use crate::source::SourceTag;
    use crate::testing::MockBackend;
    use futures::executor::block_on;

    fn hits(n: usize) -> Vec<SearchHit> {
        (0..n)
            .map(|i| SearchHit {
                title: Some(format!("结果{}", i)),
                url: Some(format!("http://example.com/{}", i)),
                summary: Some("s".into()),
                source: Some("百度".into()),
                keyword: None,
            })
            .collect()
    }

    fn success(n: usize) -> SearchResponse {
        SearchResponse {
            status: Some("success".into()),
            results: Some(hits(n)),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_keyword_issues_no_request() {
        let backend = MockBackend::default();
        let mut state = SearchState::default();

        for keyword in ["", "   ", "\t\n"] {
            let err = block_on(perform_search(&backend, &mut state, keyword)).unwrap_err();
            assert!(matches!(err, Error::EmptyKeyword));
        }
        assert!(backend.searches().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_search_issues_one_request_with_trimmed_keyword() {
        let backend = MockBackend::default().with_search(Ok(success(1)));
        let mut state = SearchState::default();

        block_on(perform_search(&backend, &mut state, "  test ")).unwrap();
        assert_eq!(backend.searches(), vec!["test".to_string()]);
    }

    #[test]
    fn test_success_scenario() {
        let response = SearchResponse {
            status: Some("success".into()),
            results: Some(vec![SearchHit {
                title: Some("A".into()),
                url: Some("http://x".into()),
                summary: Some("s".into()),
                source: Some("百度".into()),
                keyword: None,
            }]),
            ..Default::default()
        };
        let backend = MockBackend::default().with_search(Ok(response));
        let mut state = SearchState::default();

        let outcome = block_on(perform_search(&backend, &mut state, "test")).unwrap();
        assert_eq!(outcome.alert().kind, AlertKind::Success);
        assert_eq!(outcome.alert().message, "搜索完成，共找到 1 条结果");

        let rows = state.page_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].badge_label, "百度");
        assert_eq!(rows[0].title, "A");
        assert_eq!(rows[0].url.as_deref(), Some("http://x"));
        assert!(state.pagination().is_none());
    }

    #[test]
    fn test_success_resets_page() {
        let backend = MockBackend::default()
            .with_search(Ok(success(35)))
            .with_search(Ok(success(35)));
        let mut state = SearchState::default();

        block_on(perform_search(&backend, &mut state, "a")).unwrap();
        assert!(state.change_page(PageAction::Goto(3)));
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.page_results().len(), 10);

        block_on(perform_search(&backend, &mut state, "b")).unwrap();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_page_change_moves_visible_slice() {
        let backend = MockBackend::default().with_search(Ok(success(25)));
        let mut state = SearchState::default();
        block_on(perform_search(&backend, &mut state, "k")).unwrap();

        let first_page: Vec<_> = state.page_results().iter().map(|r| r.id).collect();
        assert!(state.change_page(PageAction::Next));
        let second_page: Vec<_> = state.page_results().iter().map(|r| r.id).collect();
        assert_ne!(first_page, second_page);
        assert_eq!(state.page_results()[0].title, "结果10");

        assert!(state.change_page(PageAction::Goto(3)));
        assert_eq!(state.page_results().len(), 5);
    }

    #[test]
    fn test_mock_flag_shows_warning() {
        let mut response = success(1);
        response.is_mock = true;
        let backend = MockBackend::default().with_search(Ok(response));
        let mut state = SearchState::default();

        let outcome = block_on(perform_search(&backend, &mut state, "x")).unwrap();
        assert_eq!(outcome.alert().kind, AlertKind::Warning);
        assert_eq!(state.results().len(), 1);
    }

    #[test]
    fn test_rejected_uses_server_message_or_fallback() {
        let backend = MockBackend::default()
            .with_search(Ok(SearchResponse {
                status: Some("error".into()),
                message: Some("搜索关键词不能为空".into()),
                ..Default::default()
            }))
            .with_search(Ok(SearchResponse::default()));
        let mut state = SearchState::default();

        let outcome = block_on(perform_search(&backend, &mut state, "x")).unwrap();
        assert_eq!(outcome, SearchOutcome::Rejected { alert: Alert::error("搜索关键词不能为空") });
        assert!(state.results().is_empty());

        let outcome = block_on(perform_search(&backend, &mut state, "x")).unwrap();
        assert_eq!(outcome.alert().message, "搜索失败");
    }

    #[test]
    fn test_timeout_falls_back_to_mock_result() {
        let backend = MockBackend::default().with_search(Err(TransportError::timeout()));
        let mut state = SearchState::default();

        let outcome = block_on(perform_search(&backend, &mut state, "test")).unwrap();
        assert!(matches!(outcome, SearchOutcome::Fallback { .. }));
        assert_eq!(outcome.alert().message, "搜索超时，请尝试更简短的关键词");

        assert_eq!(state.results().len(), 1);
        let mock = &state.results()[0];
        assert_eq!(mock.title, "关于\"test\"的示例结果");
        assert_eq!(mock.source, SourceTag::Other("系统测试".into()));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_html_success_body_is_rejected_without_mock() {
        let html = "<!DOCTYPE html><title>登录</title>".to_string();
        let backend = MockBackend::default()
            .with_search(Err(TransportError::malformed(200, "expected value", Some(html))));
        let mut state = SearchState::default();

        let outcome = block_on(perform_search(&backend, &mut state, "test")).unwrap();
        assert_eq!(outcome, SearchOutcome::Rejected { alert: Alert::error("搜索失败") });
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_transport_body_message_wins() {
        let body = r#"{"status":"error","message":"请先登录"}"#.to_string();
        let backend = MockBackend::default().with_search(Err(TransportError::http(401, Some(body))));
        let mut state = SearchState::default();

        let outcome = block_on(perform_search(&backend, &mut state, "k")).unwrap();
        assert_eq!(outcome.alert().message, "请先登录");
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = SearchState::default();
        let first = state.begin("old").unwrap();
        let second = state.begin("new").unwrap();

        assert!(state.finish(&first, Ok(success(3))).is_none());
        assert!(state.is_loading());
        assert!(state.results().is_empty());

        let outcome = state.finish(&second, Ok(success(2))).unwrap();
        assert!(matches!(outcome, SearchOutcome::Loaded { count: 2, .. }));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_ids_are_not_reused_across_searches() {
        let backend = MockBackend::default()
            .with_search(Ok(success(2)))
            .with_search(Ok(success(2)));
        let mut state = SearchState::default();

        block_on(perform_search(&backend, &mut state, "a")).unwrap();
        let old_ids: Vec<_> = state.results().iter().map(|r| r.id).collect();
        block_on(perform_search(&backend, &mut state, "b")).unwrap();

        for id in old_ids {
            assert!(state.find(id).is_none());
        }
    }
}
