//! One-shot flash messages
//!
//! Messages ride in the `fyyur_flash` cookie as base64url-encoded JSON. A
//! handler that redirects appends to whatever is still pending; the next
//! handler that renders a page moves them into its payload and clears the
//! cookie in the same response.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::debug;

pub const FLASH_COOKIE: &str = "fyyur_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashCategory,
    pub message: String,
}

/// Page payload handed to the presentation layer
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub messages: Vec<FlashMessage>,
    #[serde(flatten)]
    pub body: T,
}

/// Flash messages pending for the current client
#[derive(Debug, Clone, Default)]
pub struct Flashes {
    pending: Vec<FlashMessage>,
    from_cookie: bool,
}

impl Flashes {
    /// Read pending messages from the request's `Cookie` headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .map(|(_, value)| value.to_string());

        match value {
            Some(value) if !value.is_empty() => Self {
                pending: decode(&value),
                from_cookie: true,
            },
            _ => Self::default(),
        }
    }

    pub fn messages(&self) -> &[FlashMessage] {
        &self.pending
    }

    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.pending.push(FlashMessage {
            category: FlashCategory::Success,
            message: message.into(),
        });
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.pending.push(FlashMessage {
            category: FlashCategory::Error,
            message: message.into(),
        });
        self
    }

    /// Render a page, consuming the pending messages
    pub fn render<T: Serialize>(self, body: T) -> Response {
        self.render_with_status(StatusCode::OK, body)
    }

    pub fn render_with_status<T: Serialize>(self, status: StatusCode, body: T) -> Response {
        let clear = self.from_cookie;
        let page = Page {
            messages: self.pending,
            body,
        };

        if clear {
            (status, [(header::SET_COOKIE, clear_cookie())], Json(page)).into_response()
        } else {
            (status, Json(page)).into_response()
        }
    }

    /// 303 redirect carrying the pending messages to the next page
    pub fn redirect(self, location: &str) -> Response {
        if self.pending.is_empty() {
            return Redirect::to(location).into_response();
        }
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            encode(&self.pending)
        );
        ([(header::SET_COOKIE, cookie)], Redirect::to(location)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

fn clear_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", FLASH_COOKIE)
}

fn encode(messages: &[FlashMessage]) -> String {
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

fn decode(value: &str) -> Vec<FlashMessage> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_else(|| {
            debug!("Discarding unreadable flash cookie");
            Vec::new()
        })
}
