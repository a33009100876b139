//! バックエンドHTTPクライアント
//!
//! `xiaoyu_common::Backend` を reqwest で実装する。
//! 2xx以外・タイムアウト・接続失敗はすべて `TransportError` に変換する。

use crate::config::Config;
use crate::error::{Result, SearchCliError};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::{redirect, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use xiaoyu_common::{
    endpoints, Backend, DatesResponse, RawDataFilter, RawDataResponse, SaveRequest, SaveResponse,
    SearchResponse, TransportError,
};

pub struct HttpBackend {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
    search_timeout: Duration,
    save_timeout: Duration,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            session_cookie: config.session_cookie(),
            search_timeout: config.search_timeout(),
            save_timeout: config.save_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_session(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::timeout()
    } else {
        TransportError::network(err.to_string())
    }
}

/// 送信して本文を受け取る。2xx以外は本文付きのエラー
async fn exchange(builder: RequestBuilder) -> std::result::Result<(u16, String), TransportError> {
    let response = builder.send().await.map_err(classify)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(classify)?;
    debug!(status, bytes = body.len(), "response received");

    if !(200..300).contains(&status) {
        return Err(TransportError::http(status, Some(body)));
    }
    Ok((status, body))
}

fn parse_json<T: DeserializeOwned>(
    status: u16,
    body: String,
) -> std::result::Result<T, TransportError> {
    serde_json::from_str(&body)
        .map_err(|e| TransportError::malformed(status, e.to_string(), Some(body)))
}

impl Backend for HttpBackend {
    async fn search(&self, keyword: &str) -> std::result::Result<SearchResponse, TransportError> {
        debug!(keyword, "POST {}", endpoints::SEARCH);
        let builder = self
            .client
            .post(self.url(endpoints::SEARCH))
            .form(&[("keyword", keyword)])
            .timeout(self.search_timeout);
        let (status, body) = exchange(self.with_session(builder)).await?;
        parse_json(status, body)
    }

    async fn save(
        &self,
        request: &SaveRequest,
    ) -> std::result::Result<Option<SaveResponse>, TransportError> {
        debug!(count = request.results.len(), "POST {}", endpoints::SAVE_DATA);
        let builder = self
            .client
            .post(self.url(endpoints::SAVE_DATA))
            .json(request)
            .timeout(self.save_timeout);
        let (status, body) = exchange(self.with_session(builder)).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        parse_json(status, body).map(Some)
    }

    async fn list_raw_data(
        &self,
        filter: &RawDataFilter,
    ) -> std::result::Result<RawDataResponse, TransportError> {
        debug!(?filter, "GET {}", endpoints::RAW_DATA);
        let builder = self.client.get(self.url(endpoints::RAW_DATA)).query(&filter.query());
        let (status, body) = exchange(self.with_session(builder)).await?;
        parse_json(status, body)
    }

    async fn list_dates(&self) -> std::result::Result<DatesResponse, TransportError> {
        let builder = self.client.get(self.url(endpoints::DATES));
        let (status, body) = exchange(self.with_session(builder)).await?;
        parse_json(status, body)
    }
}

/// `POST /login` でログインし、セッションCookieを返す
///
/// 成功時はリダイレクト応答になるので、追跡せずに `Set-Cookie` を読む。
pub async fn login(config: &Config, username: &str, password: &str) -> Result<String> {
    let client = Client::builder().redirect(redirect::Policy::none()).build()?;
    let response = client
        .post(format!("{}/login", config.base_url()))
        .form(&[("username", username), ("password", password)])
        .send()
        .await?;

    let redirected = response.status().is_redirection()
        && response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|location| !location.contains("/login"));
    if !redirected {
        return Err(SearchCliError::Login("用户名或密码错误".into()));
    }

    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with("session="))
        .map(str::to_string)
        .ok_or_else(|| SearchCliError::Login("服务器未返回会话".into()))
}
