//! データ倉庫コントローラ
//!
//! 保存済みレコードの絞り込み取得と一覧表示。
//! 絞り込みを変えるたびに一覧は丸ごと置き換える（差分更新なし）。

use crate::alert::Alert;
use crate::backend::Backend;
use crate::error::{Error, Operation, Result, TransportError};
use crate::render::{data_stats_label, DataRow};
use crate::state::{Ticket, TicketCounter};
use crate::types::{DatesResponse, RawDataRecord, RawDataResponse};
use tracing::{debug, error, warn};

/// 絞り込み条件
///
/// 日付・キーワードとも空文字なら条件なし。要求には常に両方を載せる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDataFilter {
    pub date: String,
    pub keyword: String,
}

impl RawDataFilter {
    pub fn new(date: impl Into<String>, keyword: &str) -> Self {
        Self { date: date.into().trim().to_string(), keyword: keyword.trim().to_string() }
    }

    /// クエリ文字列用の組
    pub fn query(&self) -> [(&'static str, &str); 2] {
        [("date", self.date.as_str()), ("keyword", self.keyword.as_str())]
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.keyword.is_empty()
    }
}

/// 発行済みの一覧要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFilter {
    pub ticket: Ticket,
    pub filter: RawDataFilter,
}

/// 一覧取得の結末
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Loaded { count: usize },
    Failed { alert: Alert },
}

impl FilterOutcome {
    pub fn alert(&self) -> Option<&Alert> {
        match self {
            FilterOutcome::Loaded { .. } => None,
            FilterOutcome::Failed { alert } => Some(alert),
        }
    }
}

/// データ倉庫画面の状態
#[derive(Debug, Clone, Default)]
pub struct WarehouseState {
    records: Vec<RawDataRecord>,
    filter: RawDataFilter,
    tickets: TicketCounter,
    loading: bool,
    stats: Option<usize>,
    total: Option<u64>,
    dates: Vec<String>,
}

impl WarehouseState {
    pub fn records(&self) -> &[RawDataRecord] {
        &self.records
    }

    pub fn filter(&self) -> &RawDataFilter {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 件数表示。一度も取得に成功していなければ None
    pub fn stats_label(&self) -> Option<String> {
        self.stats.map(data_stats_label)
    }

    /// バックエンドが報告した総件数（サーバ側ページングがある場合）
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn set_dates(&mut self, dates: Vec<String>) {
        self.dates = dates;
    }

    pub fn rows(&self) -> Vec<DataRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| DataRow::new(index, record))
            .collect()
    }

    /// 一覧取得を開始
    pub fn begin(&mut self, filter: RawDataFilter) -> PendingFilter {
        let ticket = self.tickets.issue();
        self.loading = true;
        self.filter = filter.clone();
        debug!(date = %filter.date, keyword = %filter.keyword, "listing started");
        PendingFilter { ticket, filter }
    }

    /// 条件を消して取得し直す
    pub fn begin_cleared(&mut self) -> PendingFilter {
        self.begin(RawDataFilter::default())
    }

    /// 応答を反映。古い要求の応答なら None
    pub fn finish(
        &mut self,
        pending: &PendingFilter,
        response: std::result::Result<RawDataResponse, TransportError>,
    ) -> Option<FilterOutcome> {
        if !self.tickets.is_current(pending.ticket) {
            warn!("discarding stale listing response");
            return None;
        }
        self.loading = false;

        let outcome = match response {
            Ok(response) => match response.records() {
                Some(records) => {
                    let count = records.len();
                    self.records = records;
                    self.stats = Some(count);
                    self.total = response.total;
                    FilterOutcome::Loaded { count }
                }
                None => {
                    self.records.clear();
                    let message = response
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| "筛选失败".to_string());
                    error!(%message, "listing rejected");
                    FilterOutcome::Failed { alert: Alert::error(message) }
                }
            },
            Err(err) => {
                error!(error = %err, "listing request failed");
                self.records.clear();
                FilterOutcome::Failed { alert: Alert::error(err.user_message(Operation::Listing)) }
            }
        };
        Some(outcome)
    }
}

/// 絞り込み条件で一覧を取得
pub async fn filter_data<B: Backend>(
    backend: &B,
    state: &mut WarehouseState,
    filter: RawDataFilter,
) -> FilterOutcome {
    let pending = state.begin(filter);
    let response = backend.list_raw_data(&pending.filter).await;
    state
        .finish(&pending, response)
        .unwrap_or(FilterOutcome::Loaded { count: state.records.len() })
}

/// 条件を消して一覧を取得し直す
pub async fn clear_filter<B: Backend>(backend: &B, state: &mut WarehouseState) -> FilterOutcome {
    filter_data(backend, state, RawDataFilter::default()).await
}

/// 日付一覧の応答を解釈
pub fn dates_from_response(response: DatesResponse) -> Result<Vec<String>> {
    match response.dates {
        Some(dates) if response.status.as_deref() != Some("error") => Ok(dates),
        _ => Err(Error::Backend(
            response.message.unwrap_or_else(|| "获取日期列表失败".to_string()),
        )),
    }
}

/// 絞り込み候補の日付一覧を取得
pub async fn load_dates<B: Backend>(backend: &B, state: &mut WarehouseState) -> Result<Vec<String>> {
    let dates = dates_from_response(backend.list_dates().await?)?;
    state.set_dates(dates.clone());
    Ok(dates)
}
