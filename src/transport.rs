use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, API_KEY_HEADER};
use crate::error::{Error, Result};
use crate::query::ValidationError;

/// Replace every `/` in a dataset name with `-` so it can be used as a single
/// path segment. Lossy: `a/b` and `a-b` map to the same slug.
pub fn sanitize_dataset(dataset: &str) -> String {
    dataset.replace('/', "-")
}

/// Request path relative to the base URL, kept as raw segments. Each segment
/// is percent-escaped on its own when the URL is built, so an id such as
/// `a?b` stays one segment instead of starting a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath(Vec<String>);

impl ApiPath {
    /// `/1/<collection>`
    pub fn collection(name: &str) -> Self {
        Self(vec!["1".to_string(), name.to_string()])
    }

    /// `/1/<collection>/<sanitized dataset>`
    pub fn dataset(collection: &str, dataset: &str) -> Self {
        Self::collection(collection).item(&sanitize_dataset(dataset))
    }

    pub fn item(mut self, segment: &str) -> Self {
        self.0.push(segment.to_string());
        self
    }
}

/// Shared request/response plumbing for every resource client.
///
/// Holds one `reqwest::Client` whose default headers carry the API key,
/// content type and user agent, so individual calls only pick a method,
/// a path and an optional body.
#[derive(Debug)]
pub struct Transport {
    http: reqwest::Client,
    api_url: Url,
}

impl Transport {
    pub fn new(cfg: &Config) -> Result<Self> {
        let api_url = Url::parse(&cfg.api_url)
            .map_err(|e| Error::Config(format!("could not parse api_url `{}`: {e}", cfg.api_url)))?;
        if api_url.cannot_be_a_base() {
            return Err(Error::Config(format!("api_url `{}` is not a base URL", cfg.api_url)));
        }

        let mut api_key = HeaderValue::from_str(&cfg.api_key)
            .map_err(|_| Error::Config("api_key is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);
        let user_agent = HeaderValue::from_str(&cfg.user_agent)
            .map_err(|_| Error::Config("user_agent is not a valid header value".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("could not build HTTP client: {e}")))?;

        Ok(Self { http, api_url })
    }

    /// Append `path` to the base URL. Empty, `.` and `..` segments are
    /// refused since they would address a different resource.
    pub fn url(&self, path: &ApiPath) -> Result<Url> {
        if let Some(bad) = path.0.iter().find(|s| matches!(s.as_str(), "" | "." | "..")) {
            return Err(ValidationError::new("path", format!("`{bad}` is not a usable path segment")).into());
        }

        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("api_url `{}` is not a base URL", self.api_url)))?
            .pop_if_empty()
            .extend(&path.0);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &ApiPath) -> Result<T> {
        let body = self.send(Method::GET, self.url(path)?, None::<&()>).await?;
        decode(&body)
    }

    pub async fn get_with_query<T: DeserializeOwned>(&self, path: &ApiPath, query: &[(&str, &str)]) -> Result<T> {
        let mut url = self.url(path)?;
        url.query_pairs_mut().extend_pairs(query);
        let body = self.send(Method::GET, url, None::<&()>).await?;
        decode(&body)
    }

    pub async fn post<B, T>(&self, path: &ApiPath, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::POST, self.url(path)?, Some(body)).await?;
        decode(&body)
    }

    pub async fn put<B, T>(&self, path: &ApiPath, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::PUT, self.url(path)?, Some(body)).await?;
        decode(&body)
    }

    /// The response body, if any, is discarded.
    pub async fn delete(&self, path: &ApiPath) -> Result<()> {
        self.send(Method::DELETE, self.url(path)?, None::<&()>).await?;
        Ok(())
    }

    async fn send<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        debug!(%method, path = url.path(), "honeycomb request");

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!("{method} {} failed ({status}): {text}", url.path());
        }
        classify(status, text)
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// 2xx → body, 404 → `NotFound`, anything else → `Api` with the best message
/// the body offers.
fn classify(status: StatusCode, body: String) -> Result<String> {
    if status.is_success() {
        return Ok(body);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound);
    }
    Err(Error::Api {
        status: status.as_u16(),
        message: extract_error_message(&body),
    })
}

/// The `error` field of a `{"error": "..."}` body, else the body verbatim.
fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(msg) }) if !msg.is_empty() => msg,
        _ => body.to_string(),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}
