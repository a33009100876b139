use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchCliError {
    #[error("设置错误: {0}")]
    Config(String),

    #[error("{0}")]
    Common(#[from] xiaoyu_common::Error),

    #[error("HTTP客户端错误: {0}")]
    Http(#[from] reqwest::Error),

    #[error("登录失败: {0}")]
    Login(String),

    #[error("没有可保存的搜索结果")]
    NoResults,

    #[error("无效的编号: {0}")]
    InvalidPick(String),

    #[error("交互输入错误: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SearchCliError>;
