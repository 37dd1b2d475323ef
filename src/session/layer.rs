//! Cookie-backed session middleware.
//!
//! `SessionLayer` and `SessionService` make sure every request carries a
//! [`SessionId`] in its extensions. An incoming `sid` cookie is reused when it
//! holds a well-formed id; otherwise a new id is minted. Every response
//! refreshes the cookie with the configured max-age.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "sid";

/// Opaque identifier of a browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh random session id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accept a cookie value only if it looks like an id we minted.
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::try_parse(value)
            .ok()
            .map(|uuid| Self(uuid.simple().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value for this session.
    pub fn cookie(&self, max_age: Duration) -> String {
        format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            self.0,
            max_age.as_secs()
        )
    }

    /// Find the session id in a request's `Cookie` headers.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Self::parse(value.trim()))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<SessionId>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "session layer is not installed",
        ))
    }
}

/// Tower `Layer` that attaches a session to every request.
#[derive(Debug, Clone)]
pub struct SessionLayer {
    max_age: Duration,
}

impl SessionLayer {
    /// Create a session layer whose cookie lives for `max_age`.
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            max_age: self.max_age,
        }
    }
}

/// Tower `Service` that resolves the session before forwarding requests.
///
/// The `SessionId` is inserted into request extensions, where handlers pick
/// it up as an extractor.
#[derive(Debug, Clone)]
pub struct SessionService<S> {
    inner: S,
    max_age: Duration,
}

impl<S> Service<Request<Body>> for SessionService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let max_age = self.max_age;

        Box::pin(async move {
            let session = match SessionId::from_headers(req.headers()) {
                Some(session) => session,
                None => {
                    let session = SessionId::generate();
                    debug!("Starting session {}", session);
                    session
                }
            };
            req.extensions_mut().insert(session.clone());

            let mut response = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {})
                .into_response();

            match HeaderValue::from_str(&session.cookie(max_age)) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!("Could not encode session cookie: {}", e),
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    #[test]
    fn test_parse_accepts_minted_ids_only() {
        let session = SessionId::generate();
        assert_eq!(SessionId::parse(session.as_str()), Some(session));
        assert_eq!(SessionId::parse("not-a-session"), None);
        assert_eq!(SessionId::parse(""), None);
    }

    #[test]
    fn test_from_headers_finds_sid_among_cookies() {
        let session = SessionId::generate();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; sid={}; lang=id", session)).unwrap(),
        );

        assert_eq!(SessionId::from_headers(&headers), Some(session));
    }

    #[test]
    fn test_from_headers_ignores_foreign_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; sidebar=open"));
        assert_eq!(SessionId::from_headers(&headers), None);
    }

    #[test]
    fn test_cookie_format() {
        let session = SessionId::parse("00000000000040008000000000000000").unwrap();
        assert_eq!(
            session.cookie(Duration::from_secs(6)),
            "sid=00000000000040008000000000000000; Max-Age=6; Path=/; HttpOnly; SameSite=Lax"
        );
    }

    /// Inner service echoing the session it was handed.
    #[derive(Clone)]
    struct EchoSession;

    impl Service<Request<Body>> for EchoSession {
        type Response = Response;
        type Error = Infallible;
        type Future = std::future::Ready<Result<Response, Infallible>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Body>) -> Self::Future {
            let body = req
                .extensions()
                .get::<SessionId>()
                .map(|s| s.to_string())
                .unwrap_or_default();
            std::future::ready(Ok(body.into_response()))
        }
    }

    #[tokio::test]
    async fn test_layer_mints_session_and_sets_cookie() {
        let service = SessionLayer::new(Duration::from_secs(6)).layer(EchoSession);
        let response = service
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap();

        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("sid="));
        assert!(cookie.contains("Max-Age=6"));
    }

    #[tokio::test]
    async fn test_layer_reuses_existing_session() {
        let session = SessionId::generate();
        let request = Request::builder()
            .header(COOKIE, format!("sid={}", session))
            .body(Body::empty())
            .unwrap();

        let service = SessionLayer::new(Duration::from_secs(6)).layer(EchoSession);
        let response = service.oneshot(request).await.unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, session.as_str().as_bytes());
    }
}
