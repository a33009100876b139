//! エラー型定義
//!
//! - ローカル検証エラー（空キーワード・未選択）
//! - バックエンドの業務エラー（status != "success"）
//! - 通信エラー（タイムアウト・HTTPステータス・ネットワーク）

use std::fmt;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("请输入搜索关键词")]
    EmptyKeyword,

    #[error("请选择数据项或选中文本")]
    NoSelection,

    #[error("获取选中数据失败，请重试")]
    StaleSelection,

    #[error("{0}")]
    Backend(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 通信エラーの種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportKind {
    /// 制限時間内に応答なし
    Timeout,
    /// 2xx以外のHTTPステータス
    Http,
    /// 接続失敗など
    Network(String),
    /// 応答本文がJSONとして読めない
    Malformed(String),
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::Http => write!(f, "http error"),
            TransportKind::Network(msg) => write!(f, "network error: {}", msg),
            TransportKind::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

/// 通信失敗
///
/// `status` はHTTPステータス。応答を受け取れなかった場合は0。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (status {status})")]
pub struct TransportError {
    pub kind: TransportKind,
    pub status: u16,
    pub body: Option<String>,
}

/// どの操作の失敗か（メッセージの分類に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Save,
    Listing,
}

impl TransportError {
    pub fn timeout() -> Self {
        Self { kind: TransportKind::Timeout, status: 0, body: None }
    }

    pub fn http(status: u16, body: Option<String>) -> Self {
        Self { kind: TransportKind::Http, status, body }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self { kind: TransportKind::Network(message.into()), status: 0, body: None }
    }

    pub fn malformed(status: u16, message: impl Into<String>, body: Option<String>) -> Self {
        Self { kind: TransportKind::Malformed(message.into()), status, body }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportKind::Timeout
    }

    /// 2xxだが期待した形の応答ではない（ログイン画面へのリダイレクトなど）
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, TransportKind::Malformed(_))
    }

    /// 本文をJSONとして読めた場合のみSome
    fn body_json(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }

    /// 本文のJSONに含まれる `message`
    pub fn body_message(&self) -> Option<String> {
        self.body_json()?
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    /// 操作ごとの利用者向けメッセージ
    pub fn user_message(&self, operation: Operation) -> String {
        if self.is_malformed() {
            return match operation {
                Operation::Search => "搜索失败",
                Operation::Save => "保存失败，未知错误",
                Operation::Listing => "筛选失败",
            }
            .to_string();
        }
        match operation {
            Operation::Search => self
                .body_message()
                .unwrap_or_else(|| self.search_classification().to_string()),
            Operation::Save => match self.body_json() {
                Some(_) => self
                    .body_message()
                    .unwrap_or_else(|| "网络错误，请稍后重试".to_string()),
                None => format!("保存失败，状态码: {}", self.status),
            },
            Operation::Listing => self
                .body_message()
                .unwrap_or_else(|| "网络错误，请稍后重试".to_string()),
        }
    }

    fn search_classification(&self) -> &'static str {
        match (&self.kind, self.status) {
            (TransportKind::Timeout, _) => "搜索超时，请尝试更简短的关键词",
            (_, 404) => "搜索接口不存在",
            (_, 500) => "服务器内部错误，请稍后重试",
            _ => "网络错误，请检查您的连接",
        }
    }
}
