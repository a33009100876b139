//! バックエンドAPI

mod backend;

pub use backend::FetchBackend;
