//! データ出所の分類
//!
//! 検索APIの `source` は自由文字列（例: "百度 - 知乎"）。
//! 取り込み時に一度だけ分類し、描画・保存ではタグから表示名を引く。

use serde::{Deserialize, Serialize};

/// 手動選択テキストの出所名
pub const MANUAL_SELECTION: &str = "用户手动选择";

/// 出所タグ
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum SourceTag {
    Baidu,
    Bilibili,
    ManualSelection,
    Other(String),
    #[default]
    Unknown,
}

impl SourceTag {
    /// 自由文字列から分類
    pub fn resolve(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            SourceTag::Unknown
        } else if raw.contains("百度") {
            SourceTag::Baidu
        } else if raw.contains("B站") || raw.contains("Bilibili") {
            SourceTag::Bilibili
        } else if raw == MANUAL_SELECTION {
            SourceTag::ManualSelection
        } else {
            SourceTag::Other(raw.to_string())
        }
    }

    /// 保存時の正規名
    pub fn canonical(&self) -> &str {
        match self {
            SourceTag::Baidu => "百度",
            SourceTag::Bilibili => "Bilibili",
            SourceTag::ManualSelection => MANUAL_SELECTION,
            SourceTag::Other(raw) => raw,
            SourceTag::Unknown => "未知",
        }
    }

    /// 検索結果のバッジ表示
    pub fn badge_label(&self) -> &str {
        match self {
            SourceTag::Bilibili => "B站",
            SourceTag::Unknown => "未知来源",
            other => other.canonical(),
        }
    }

    /// バッジのCSSクラス
    pub fn badge_class(&self) -> &'static str {
        match self {
            SourceTag::Baidu => "source-tag baidu-source",
            SourceTag::Bilibili => "source-tag bilibili-source",
            _ => "source-tag",
        }
    }

    /// データ倉庫一覧での表示
    pub fn display_label(&self) -> &str {
        match self {
            SourceTag::Bilibili => "B站",
            other => other.canonical(),
        }
    }
}

impl From<Option<String>> for SourceTag {
    fn from(raw: Option<String>) -> Self {
        SourceTag::resolve(raw.as_deref())
    }
}

impl From<SourceTag> for String {
    fn from(tag: SourceTag) -> Self {
        tag.canonical().to_string()
    }
}
