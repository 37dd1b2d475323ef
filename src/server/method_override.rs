//! HTML forms can only send GET and POST. A POST whose query string carries
//! `_method=PUT` (or `DELETE`, `PATCH`) is rerouted as that method before it
//! reaches the router.

use std::task::{Context, Poll};

use axum::http::{Method, Request};
use tower::{Layer, Service};
use tracing::debug;

/// Query parameter naming the intended method.
pub const METHOD_PARAM: &str = "_method";

/// Tower `Layer` applying [`MethodOverride`] to a service.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodOverrideLayer;

impl<S> Layer<S> for MethodOverrideLayer {
    type Service = MethodOverride<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MethodOverride { inner }
    }
}

/// Tower `Service` rewriting overridden POST requests.
///
/// Must wrap the whole router: the rewrite has to happen before routing.
#[derive(Debug, Clone)]
pub struct MethodOverride<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for MethodOverride<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if let Some(method) = overridden_method(&req) {
            debug!("Overriding {} {} as {}", req.method(), req.uri().path(), method);
            *req.method_mut() = method;
        }
        self.inner.call(req)
    }
}

/// The method a POST asks to be treated as, if any.
fn overridden_method<B>(req: &Request<B>) -> Option<Method> {
    if req.method() != Method::POST {
        return None;
    }

    let value = req
        .uri()
        .query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == METHOD_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())?;

    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        "PATCH" => Some(Method::PATCH),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    #[test]
    fn test_post_with_override() {
        let req = request(Method::POST, "/contact?_method=PUT");
        assert_eq!(overridden_method(&req), Some(Method::PUT));

        let req = request(Method::POST, "/contact/abc?x=1&_method=delete");
        assert_eq!(overridden_method(&req), Some(Method::DELETE));

        let req = request(Method::POST, "/contact?_method=%50UT");
        assert_eq!(overridden_method(&req), Some(Method::PUT));
    }

    #[test]
    fn test_only_post_is_overridden() {
        let req = request(Method::GET, "/contact?_method=DELETE");
        assert_eq!(overridden_method(&req), None);
    }

    #[test]
    fn test_unknown_or_missing_override_is_ignored() {
        assert_eq!(overridden_method(&request(Method::POST, "/contact")), None);
        assert_eq!(
            overridden_method(&request(Method::POST, "/contact?_method=GET")),
            None
        );
        assert_eq!(
            overridden_method(&request(Method::POST, "/contact?method=PUT")),
            None
        );
    }
}
