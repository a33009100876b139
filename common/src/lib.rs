//! Xiaoyu Common Library
//!
//! CLIとWeb(WASM)で共有される型・描画ヘルパー・画面コントローラ

pub mod alert;
pub mod backend;
pub mod error;
pub mod pagination;
pub mod render;
pub mod search;
pub mod selection;
pub mod source;
pub mod state;
pub mod types;
pub mod warehouse;

#[cfg(test)]
mod testing;

pub use alert::{Alert, AlertKind, ALERT_DISMISS};
pub use backend::{endpoints, Backend, SAVE_TIMEOUT, SEARCH_TIMEOUT};
pub use error::{Error, Operation, Result, TransportError, TransportKind};
pub use pagination::{PageAction, PageButton, Pager, PaginationView, ITEMS_PER_PAGE, PAGE_RANGE};
pub use render::{data_stats_label, escape_html, format_date, summary_html, DataRow, ResultRow};
pub use search::{perform_search, PendingSearch, SearchOutcome, SearchState};
pub use selection::{
    plan_save, save_outcome, save_selected, select_all_label, PageContext, SaveInput, SaveOutcome,
    SavePlan, SaveState, Selection, REDIRECT_DELAY,
};
pub use source::SourceTag;
pub use state::{AppState, Ticket};
pub use types::{
    DatesResponse, NormalizedRecord, RawDataRecord, RawDataResponse, RecordId, SaveRequest,
    SaveResponse, SearchHit, SearchResponse, SearchResult,
};
pub use warehouse::{
    clear_filter, dates_from_response, filter_data, load_dates, FilterOutcome, PendingFilter,
    RawDataFilter, WarehouseState,
};
