//! Request metadata capture and fire-and-forget activity logging.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use kintree_core::activity::{browser_from_user_agent, client_ip_from_forwarded, NewActivityEntry};

use crate::state::AppState;

/// Who made the request, as far as the headers tell us.
///
/// Never rejects: missing headers simply leave fields empty.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub browser: Option<String>,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl ClientInfo {
    fn from_parts(parts: &Parts) -> Self {
        let headers = &parts.headers;

        let ip = header_str(headers, "x-forwarded-for")
            .and_then(client_ip_from_forwarded)
            .or_else(|| header_str(headers, "x-real-ip"))
            .map(str::to_string)
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());

        let browser = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .and_then(browser_from_user_agent)
            .map(str::to_string);

        Self {
            ip,
            user_id: header_str(headers, "x-user-id").map(str::to_string),
            user_name: header_str(headers, "x-user-name").map(str::to_string),
            browser,
        }
    }
}

impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Append an activity entry in the background.
///
/// The request never waits on the sink; failures are logged and dropped.
pub fn record(state: &AppState, client: ClientInfo, action: &'static str, details: String) {
    let sink = state.activity.clone();
    let entry = NewActivityEntry {
        ip: client.ip,
        user_id: client.user_id,
        user_name: client.user_name,
        action: action.to_string(),
        details,
        city: None,
        browser: client.browser,
    };

    tokio::spawn(async move {
        if let Err(e) = sink.append(entry).await {
            tracing::warn!(error = %e, action, "Failed to record activity");
        }
    });
}
