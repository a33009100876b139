//! テスト用のバックエンド
//!
//! 応答をあらかじめ積んでおき、呼ばれた順に返す。要求内容は記録する。

use crate::backend::Backend;
use crate::error::TransportError;
use crate::types::{DatesResponse, RawDataResponse, SaveRequest, SaveResponse, SearchResponse};
use crate::warehouse::RawDataFilter;
use std::cell::RefCell;
use std::collections::VecDeque;

type Reply<T> = Result<T, TransportError>;

#[derive(Default)]
pub struct MockBackend {
    search_replies: RefCell<VecDeque<Reply<SearchResponse>>>,
    save_replies: RefCell<VecDeque<Reply<Option<SaveResponse>>>>,
    listing_replies: RefCell<VecDeque<Reply<RawDataResponse>>>,
    dates_replies: RefCell<VecDeque<Reply<DatesResponse>>>,
    searches: RefCell<Vec<String>>,
    saves: RefCell<Vec<SaveRequest>>,
    listings: RefCell<Vec<RawDataFilter>>,
}

impl MockBackend {
    pub fn with_search(self, reply: Reply<SearchResponse>) -> Self {
        self.search_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn with_save(self, reply: Reply<Option<SaveResponse>>) -> Self {
        self.save_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn with_listing(self, reply: Reply<RawDataResponse>) -> Self {
        self.listing_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn with_dates(self, reply: Reply<DatesResponse>) -> Self {
        self.dates_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.borrow().clone()
    }

    pub fn saves(&self) -> Vec<SaveRequest> {
        self.saves.borrow().clone()
    }

    pub fn listings(&self) -> Vec<RawDataFilter> {
        self.listings.borrow().clone()
    }
}

fn next<T>(queue: &RefCell<VecDeque<Reply<T>>>) -> Reply<T> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(TransportError::network("no reply queued")))
}

impl Backend for MockBackend {
    async fn search(&self, keyword: &str) -> Result<SearchResponse, TransportError> {
        self.searches.borrow_mut().push(keyword.to_string());
        next(&self.search_replies)
    }

    async fn save(&self, request: &SaveRequest) -> Result<Option<SaveResponse>, TransportError> {
        self.saves.borrow_mut().push(request.clone());
        next(&self.save_replies)
    }

    async fn list_raw_data(
        &self,
        filter: &RawDataFilter,
    ) -> Result<RawDataResponse, TransportError> {
        self.listings.borrow_mut().push(filter.clone());
        next(&self.listing_replies)
    }

    async fn list_dates(&self) -> Result<DatesResponse, TransportError> {
        next(&self.dates_replies)
    }
}
