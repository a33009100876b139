//! バックエンドとの境界
//!
//! Web版は `fetch`、CLI版は `reqwest` でこのトレイトを実装する。
//! タイムアウトは実装側で `TransportError::timeout()` として返す。

use crate::error::TransportError;
use crate::types::{DatesResponse, RawDataResponse, SaveRequest, SaveResponse, SearchResponse};
use crate::warehouse::RawDataFilter;
use std::time::Duration;

/// 検索要求の制限時間
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);
/// 保存要求の制限時間
pub const SAVE_TIMEOUT: Duration = Duration::from_secs(10);

/// エンドポイント
pub mod endpoints {
    pub const SEARCH: &str = "/search";
    pub const SAVE_DATA: &str = "/save_data";
    pub const RAW_DATA: &str = "/get_raw_data";
    pub const DATES: &str = "/get_dates";
    pub const DATA_WAREHOUSE: &str = "/data_warehouse";
}

/// 検索・保存バックエンド
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `POST /search`（フォーム形式 `keyword=`）
    async fn search(&self, keyword: &str) -> Result<SearchResponse, TransportError>;

    /// `POST /save_data`（JSON）。本文が空なら `None`
    async fn save(&self, request: &SaveRequest) -> Result<Option<SaveResponse>, TransportError>;

    /// `GET /get_raw_data?date=&keyword=`
    async fn list_raw_data(&self, filter: &RawDataFilter)
        -> Result<RawDataResponse, TransportError>;

    /// `GET /get_dates`
    async fn list_dates(&self) -> Result<DatesResponse, TransportError>;
}
