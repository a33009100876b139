//! データモデルとAPIの入出力型
//!
//! CLIとWeb(WASM)で共有される型:
//! - SearchHit / SearchResponse: `POST /search`
//! - NormalizedRecord / SaveRequest / SaveResponse: `POST /save_data`
//! - RawDataRecord / RawDataResponse: `GET /get_raw_data`
//! - DatesResponse: `GET /get_dates`

use crate::source::SourceTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 検索結果の識別子（取り込み時に採番）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

/// 検索APIが返す1件（生データ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub title: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub source: Option<String>,
    pub keyword: Option<String>,
}

/// 取り込み済みの検索結果
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: RecordId,
    pub title: String,
    pub url: Option<String>,
    pub summary: String,
    pub source: SourceTag,
    pub keyword: Option<String>,
}

impl SearchResult {
    pub fn ingest(id: RecordId, hit: SearchHit) -> Self {
        Self {
            id,
            title: hit.title.unwrap_or_default(),
            url: non_empty(hit.url),
            summary: hit.summary.unwrap_or_default(),
            source: SourceTag::resolve(hit.source.as_deref()),
            keyword: non_empty(hit.keyword),
        }
    }
}

/// `POST /search` の応答
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub status: Option<String>,
    pub results: Option<Vec<SearchHit>>,
    pub is_mock: bool,
    pub message: Option<String>,
    pub keyword: Option<String>,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// 保存用に整形した1件
///
/// すべてのフィールドが必ず文字列で埋まる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub title: String,
    pub url: String,
    pub source: String,
    pub summary: String,
    pub content: String,
    pub keyword: String,
}

/// `POST /save_data` の本文
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub results: Vec<NormalizedRecord>,
    pub keyword: String,
}

/// `POST /save_data` の応答
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveResponse {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// データ倉庫の1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDataRecord {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub keyword: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<String>,
}

/// `GET /get_raw_data` の応答
///
/// `data` が配列でない応答も受け取れるよう `Value` のまま保持する。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDataResponse {
    pub status: Option<String>,
    pub data: Option<serde_json::Value>,
    pub message: Option<String>,
    pub total: Option<u64>,
    pub pages: Option<u64>,
    pub current_page: Option<u64>,
}

impl RawDataResponse {
    /// `data` が配列ならレコード列を返す
    pub fn records(&self) -> Option<Vec<RawDataRecord>> {
        let items = self.data.as_ref()?.as_array()?;
        items
            .iter()
            .map(|item| serde_json::from_value(item.clone()))
            .collect::<Result<Vec<_>, _>>()
            .ok()
    }
}

/// `GET /get_dates` の応答
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatesResponse {
    pub status: Option<String>,
    pub dates: Option<Vec<String>>,
    pub message: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
