//! Content negotiation between JSON and the browsable HTML rendering.
//!
//! The format comes from `?format=` when present, otherwise from the
//! `Accept` header. Error responses are always JSON and the highlight
//! action always returns its own HTML; neither goes through [`Rendered`].

use axum::extract::{FromRequestParts, Query};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use snippets_core::highlight::escape_html;

use crate::error::AppError;

/// Header carrying the unpaginated row count on collection responses.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Representation format selected for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    /// Browsable HTML page wrapping the pretty-printed JSON.
    Api,
}

impl Format {
    fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "json" => Some(Format::Json),
            "api" => Some(Format::Api),
            _ => None,
        }
    }

    /// Pick the first media range in `accept` that we can serve.
    fn from_accept(accept: &str) -> Self {
        for range in accept.split(',') {
            let media = range.split(';').next().unwrap_or("").trim();
            match media {
                "application/json" | "*/*" | "application/*" => return Format::Json,
                "text/html" | "text/*" => return Format::Api,
                _ => {}
            }
        }
        Format::Json
    }
}

#[derive(Debug, Deserialize)]
struct FormatQuery {
    format: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for Format {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(value) = format_param(&parts.uri) {
            return Format::from_query_value(&value)
                .ok_or_else(|| AppError::BadRequest(format!("Unsupported format '{value}'")));
        }

        let accept = parts
            .headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        Ok(Format::from_accept(accept))
    }
}

/// The `format` query parameter, if any.
fn format_param(uri: &Uri) -> Option<String> {
    Query::<FormatQuery>::try_from_uri(uri).ok()?.0.format
}

/// A successful response rendered in the negotiated [`Format`].
#[derive(Debug)]
pub struct Rendered<T> {
    pub format: Format,
    pub status: StatusCode,
    /// Page heading used by the browsable rendering.
    pub title: &'static str,
    pub body: T,
    pub total_count: Option<i64>,
}

impl<T: Serialize> Rendered<T> {
    pub fn ok(format: Format, title: &'static str, body: T) -> Self {
        Self {
            format,
            status: StatusCode::OK,
            title,
            body,
            total_count: None,
        }
    }

    pub fn created(format: Format, title: &'static str, body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(format, title, body)
        }
    }

    pub fn with_total_count(mut self, total: i64) -> Self {
        self.total_count = Some(total);
        self
    }
}

impl<T: Serialize> IntoResponse for Rendered<T> {
    fn into_response(self) -> Response {
        let mut response = match self.format {
            Format::Json => (self.status, Json(&self.body)).into_response(),
            Format::Api => match serde_json::to_string_pretty(&self.body) {
                Ok(pretty) => {
                    (self.status, Html(browsable_page(self.title, self.status, &pretty)))
                        .into_response()
                }
                Err(e) => {
                    return AppError::InternalError(format!("Serialization failed: {e}"))
                        .into_response()
                }
            },
        };

        if let Some(total) = self.total_count {
            response
                .headers_mut()
                .insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
        }
        if self.format == Format::Api {
            response.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            );
        }
        response
    }
}

fn browsable_page(title: &str, status: StatusCode, pretty_json: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} | Snippets API</title>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <p><b>HTTP {status}</b></p>\n\
         <pre>{body}</pre>\n\
         </body>\n\
         </html>\n",
        body = escape_html(pretty_json),
    )
}
