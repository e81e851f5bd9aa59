//! Per-request flow: method check, stream I/O, transform, respond.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::observability::metrics;

use super::codec::{ReadEncoding, ReadSize, WriteDecoding};
use super::error::GatewayError;
use super::resource::Resource;
use super::routes::{Action, Route};

/// Entry point for every registered route.
pub(crate) async fn dispatch(
    resource: Arc<Resource>,
    route: Route,
    request: Request<Body>,
    max_body_size: usize,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers()).to_string();

    if request.method() != route.method {
        tracing::debug!(
            request_id = %request_id,
            resource = %resource.name(),
            route = route.suffix,
            method = %request.method(),
            "Method not allowed"
        );
        metrics::record_request(resource.name(), route.suffix, 405, start_time);
        return method_not_allowed(&route);
    }

    let result = match route.action {
        Action::Read {
            encoding,
            content_type,
        } => read(&resource, encoding, content_type).await,
        Action::Write(decoding) => write(&resource, decoding, request.into_body(), max_body_size).await,
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                resource = %resource.name(),
                route = route.suffix,
                kind = e.kind(),
                error = %e,
                "Gateway request failed"
            );
            e.into_response()
        }
    };

    metrics::record_request(resource.name(), route.suffix, response.status().as_u16(), start_time);
    response
}

fn method_not_allowed(route: &Route) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
    if let Ok(allow) = HeaderValue::from_str(route.method.as_str()) {
        response.headers_mut().insert(header::ALLOW, allow);
    }
    response
}

async fn read(
    resource: &Resource,
    encoding: ReadEncoding,
    content_type: &'static str,
) -> Result<Response, GatewayError> {
    let stream = resource.stream();
    let data = match encoding.read_size() {
        ReadSize::One => stream.read_exactly_one().await,
        ReadSize::Chunk => stream.read_chunk().await,
    };

    let data = match data {
        Ok(data) => data,
        Err(e) => {
            metrics::record_stream_error(resource.name(), "read", e.kind());
            return Err(GatewayError::Read(e));
        }
    };
    metrics::record_stream_bytes(resource.name(), "read", data.len());

    let body = encoding.encode(data);
    let len = body.len();

    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    Ok(response)
}

async fn write(
    resource: &Resource,
    decoding: WriteDecoding,
    body: Body,
    max_body_size: usize,
) -> Result<Response, GatewayError> {
    let payload = axum::body::to_bytes(body, max_body_size)
        .await
        .map_err(GatewayError::Body)?;
    let data = decoding.decode(&payload)?;

    let outcome = resource.stream().write_all(&data).await;
    metrics::record_stream_bytes(resource.name(), "write", outcome.written);

    if let Some(source) = outcome.error {
        metrics::record_stream_error(resource.name(), "write", source.kind());
        return Err(GatewayError::Write {
            written: outcome.written,
            source,
        });
    }

    Ok(Response::new(Body::from(outcome.written.to_string())))
}
