//! 描画用ヘルパー
//!
//! HTMLエスケープ、日時整形、一覧の1行分の表示モデル。
//! DOMを持たないので、Web版もCLI版もここから表示文字列を得る。

use crate::source::SourceTag;
use crate::types::{RawDataRecord, RecordId, SearchResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

pub const UNTITLED: &str = "无标题";
pub const NO_SUMMARY: &str = "无摘要";
pub const NO_CONTENT: &str = "无内容";
pub const UNKNOWN: &str = "未知";
pub const EMPTY_RESULTS: &str = "暂无搜索结果";
pub const EMPTY_DATA: &str = "暂无数据";
pub const LOADING: &str = "正在处理...";

/// タイムゾーンなしの日時として受け付ける書式
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// HTMLの特殊文字5種をエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 要約をエスケープし、改行を `<br>` に置換
pub fn summary_html(summary: &str) -> String {
    let summary = if summary.is_empty() { NO_SUMMARY } else { summary };
    escape_html(summary).replace('\n', "<br>")
}

/// 日時を `YYYY-MM-DD HH:MM`（閲覧者のローカル時刻）に整形
///
/// 解釈できない文字列はそのまま返す。未指定なら「未知」。
pub fn format_date(date: Option<&str>) -> String {
    format_date_in(date, &Local)
}

/// 任意のタイムゾーンで整形（テスト用にも使う）
pub fn format_date_in<Tz>(date: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(raw) = date.filter(|d| !d.is_empty()) else {
        return UNKNOWN.to_string();
    };
    match parse_instant(raw, tz) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(tz));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }
    // 日付のみはUTCの0時として扱う
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

/// データ件数の表示
pub fn data_stats_label(count: usize) -> String {
    format!("共 {} 条数据", count)
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// 検索結果1件の表示モデル
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub id: RecordId,
    pub title: String,
    pub url: Option<String>,
    pub badge_label: String,
    pub badge_class: &'static str,
    pub summary_html: String,
}

impl From<&SearchResult> for ResultRow {
    fn from(result: &SearchResult) -> Self {
        Self {
            id: result.id,
            title: or_default(&result.title, UNTITLED).to_string(),
            url: result.url.clone(),
            badge_label: result.source.badge_label().to_string(),
            badge_class: result.source.badge_class(),
            summary_html: summary_html(&result.summary),
        }
    }
}

/// データ倉庫1件の表示モデル
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub index: usize,
    pub title: String,
    pub url: Option<String>,
    pub keyword: String,
    pub date: String,
    pub source: String,
    pub content: String,
}

impl DataRow {
    pub fn new(index: usize, record: &RawDataRecord) -> Self {
        Self::new_in(index, record, &Local)
    }

    pub fn new_in<Tz>(index: usize, record: &RawDataRecord, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let text = |v: &Option<String>, fallback: &str| {
            or_default(v.as_deref().unwrap_or_default(), fallback).to_string()
        };
        Self {
            index,
            title: text(&record.title, UNTITLED),
            url: record.url.clone().filter(|u| !u.is_empty()),
            keyword: text(&record.keyword, UNKNOWN),
            date: format_date_in(record.created_at.as_deref(), tz),
            source: SourceTag::resolve(record.source.as_deref())
                .display_label()
                .to_string(),
            content: text(&record.content, NO_CONTENT),
        }
    }
}
