//! 通知バナー

use std::time::Duration;

/// 表示してから自動で消えるまでの時間
pub const ALERT_DISMISS: Duration = Duration::from_secs(3);

/// 通知の種類
///
/// 見た目は success / info / error の3種類。warning は error の見た目を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertKind::Success => "alert-success",
            AlertKind::Info => "alert-info",
            AlertKind::Warning | AlertKind::Error => "alert-error",
        }
    }
}

/// 利用者に見せる通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

impl From<&crate::Error> for Alert {
    fn from(error: &crate::Error) -> Self {
        Alert::error(error.to_string())
    }
}
