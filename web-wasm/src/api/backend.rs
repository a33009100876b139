//! fetch による `Backend` 実装
//!
//! 同一オリジンの Flask バックエンドに送る。2xx以外・タイムアウト・
//! 通信失敗はすべて `TransportError` にする。

use futures::future::{select, Either};
use gloo::console;
use gloo::timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use xiaoyu_common::{
    endpoints, Backend, DatesResponse, RawDataFilter, RawDataResponse, SaveRequest, SaveResponse,
    SearchResponse, TransportError, SAVE_TIMEOUT, SEARCH_TIMEOUT,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchBackend;

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

/// 検索フォームの本文
pub fn search_body(keyword: &str) -> String {
    format!("keyword={}", encode(keyword))
}

/// 一覧取得のURL（条件が空でも両方のキーを付ける）
pub fn raw_data_url(filter: &RawDataFilter) -> String {
    let query: Vec<String> = filter
        .query()
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect();
    format!("{}?{}", endpoints::RAW_DATA, query.join("&"))
}

fn js_error(err: JsValue) -> TransportError {
    TransportError::network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn build_request(
    method: &str,
    url: &str,
    body: Option<(&str, String)>,
) -> Result<Request, TransportError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);
    if let Some((_, text)) = &body {
        opts.set_body(&JsValue::from_str(text));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("X-Requested-With", "XMLHttpRequest")
        .map_err(js_error)?;
    if let Some((content_type, _)) = body {
        request
            .headers()
            .set("Content-Type", content_type)
            .map_err(js_error)?;
    }
    Ok(request)
}

/// 送信して本文を受け取る
async fn exchange(request: Request) -> Result<(u16, String), TransportError> {
    let window = web_sys::window().ok_or_else(|| TransportError::network("window unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;
    let status = resp.status();
    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Err(TransportError::http(status, Some(text)));
    }
    Ok((status, text))
}

/// 制限時間付きで送信
async fn send(request: Request, limit: Option<Duration>) -> Result<(u16, String), TransportError> {
    let Some(limit) = limit else {
        return exchange(request).await;
    };
    let timer = TimeoutFuture::new(limit.as_millis() as u32);
    match select(Box::pin(exchange(request)), Box::pin(timer)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            console::warn!(format!("request timed out after {}ms", limit.as_millis()));
            Err(TransportError::timeout())
        }
    }
}

fn parse_json<T: DeserializeOwned>(status: u16, body: String) -> Result<T, TransportError> {
    serde_json::from_str(&body)
        .map_err(|e| TransportError::malformed(status, e.to_string(), Some(body)))
}

impl Backend for FetchBackend {
    async fn search(&self, keyword: &str) -> Result<SearchResponse, TransportError> {
        let request = build_request(
            "POST",
            endpoints::SEARCH,
            Some((FORM_CONTENT_TYPE, search_body(keyword))),
        )?;
        let (status, body) = send(request, Some(SEARCH_TIMEOUT)).await?;
        parse_json(status, body)
    }

    async fn save(&self, request: &SaveRequest) -> Result<Option<SaveResponse>, TransportError> {
        let payload = serde_json::to_string(request)
            .map_err(|e| TransportError::malformed(0, e.to_string(), None))?;
        let request = build_request(
            "POST",
            endpoints::SAVE_DATA,
            Some((JSON_CONTENT_TYPE, payload)),
        )?;
        let (status, body) = send(request, Some(SAVE_TIMEOUT)).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        parse_json(status, body).map(Some)
    }

    async fn list_raw_data(&self, filter: &RawDataFilter) -> Result<RawDataResponse, TransportError> {
        let request = build_request("GET", &raw_data_url(filter), None)?;
        let (status, body) = send(request, None).await?;
        parse_json(status, body)
    }

    async fn list_dates(&self) -> Result<DatesResponse, TransportError> {
        let request = build_request("GET", endpoints::DATES, None)?;
        let (status, body) = send(request, None).await?;
        parse_json(status, body)
    }
}
