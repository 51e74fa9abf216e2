//! HTTP access to the content backend.
//!
//! The backend wraps lists in different envelopes depending on the endpoint
//! (bare arrays, `{ "data": [...] }`, paginated `{ "data": { "data": [...] } }`).
//! [`normalize_slides`] is the one place that knows about them; everything
//! past it deals in `Vec<Slide>`.

use crate::error::FetchError;
use crate::slide::Slide;
use crate::source::SlideSource;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum number of nested `data` envelopes unwrapped.
const MAX_ENVELOPE_DEPTH: usize = 2;

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::blocking::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(token: Option<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            // A hung backend keeps the banner loading
            .timeout(None::<Duration>)
            .user_agent(format!("banner-rotator/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            FetchError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response)
    }

    pub fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let body = self.get(url)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Raw bytes plus the response content type, if any.
    pub fn get_bytes(&self, url: &str) -> Result<(Vec<u8>, Option<String>), FetchError> {
        let response = self.get(url)?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes()?;
        Ok((bytes.to_vec(), content_type))
    }
}

/// Slides served by a backend endpoint, e.g. `/api/banners/public`.
pub struct HttpSource {
    client: ApiClient,
    url: String,
}

impl HttpSource {
    pub fn new(client: ApiClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl SlideSource for HttpSource {
    fn fetch(&self) -> Result<Vec<Slide>, FetchError> {
        let payload = self.client.get_json(&self.url)?;
        normalize_slides(payload)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Turn any known response envelope into a slide list.
pub fn normalize_slides(payload: Value) -> Result<Vec<Slide>, FetchError> {
    let mut current = payload;
    for _ in 0..MAX_ENVELOPE_DEPTH {
        match current {
            Value::Object(mut envelope) if envelope.contains_key("data") => {
                current = envelope.remove("data").unwrap_or(Value::Null);
            }
            other => {
                current = other;
                break;
            }
        }
    }

    let items = match current {
        Value::Array(items) => items,
        other => {
            return Err(FetchError::Malformed(format!(
                "expected a list of slides, found {}",
                kind_of(&other)
            )));
        }
    };

    let total = items.len();
    let slides: Vec<Slide> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(slide_from_record(&record)),
            other => {
                debug!("Skipping non-object slide entry ({})", kind_of(&other));
                None
            }
        })
        .collect();

    if slides.len() < total {
        warn!("Dropped {} of {} slide entries", total - slides.len(), total);
    }
    Ok(slides)
}

fn slide_from_record(record: &Map<String, Value>) -> Slide {
    let text = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Slide {
        title: text("title"),
        subtitle: text("subtitle"),
        image_url: text("image_url")
            .or_else(|| text("imageUrl"))
            .or_else(|| text("image"))
            .unwrap_or_default(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
