//! 小鱼智能数据分析处理系统 CLI
//!
//! 検索・保存・データ倉庫一覧を端末から行う。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod picker;
