//! Declarative route table.
//!
//! # Design Decisions
//! - Routes are plain data: suffix, required method, action
//! - Every route goes through one dispatch function
//! - Table is built once per registration and never mutated

use std::sync::Arc;

use axum::{body::Body, http::Method, http::Request, routing::any, Router};

use super::codec::{ReadEncoding, WriteDecoding};
use super::handlers::dispatch;
use super::resource::Resource;
use super::GatewayOptions;

/// What a route does once its method check has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read {
        encoding: ReadEncoding,
        content_type: &'static str,
    },
    Write(WriteDecoding),
}

/// One endpoint under a resource prefix.
#[derive(Debug, Clone)]
pub struct Route {
    /// Path relative to the resource prefix, e.g. `read/byte.bin`.
    pub suffix: &'static str,
    pub method: Method,
    pub action: Action,
}

const READ_ROUTES: [(&str, ReadEncoding); 6] = [
    ("read/byte.bin", ReadEncoding::ByteBin),
    ("read/byte.txt", ReadEncoding::ByteTxt),
    ("read/bytes.bin", ReadEncoding::BytesBin),
    ("read/base64.txt", ReadEncoding::Base64Txt),
    ("read/array.json", ReadEncoding::ArrayJson),
    ("read/text.json", ReadEncoding::TextJson),
];

/// Build the full route table for the given options.
pub fn route_table(options: &GatewayOptions) -> Vec<Route> {
    let mut routes: Vec<Route> = READ_ROUTES
        .iter()
        .map(|&(suffix, encoding)| Route {
            suffix,
            method: Method::GET,
            action: Action::Read {
                encoding,
                content_type: encoding.content_type(options.json_content_type_for_single_byte),
            },
        })
        .collect();

    let base64_write = if options.decode_base64_writes {
        WriteDecoding::Base64
    } else {
        WriteDecoding::Raw
    };

    routes.push(Route {
        suffix: "write/bytes.bin",
        method: Method::POST,
        action: Action::Write(WriteDecoding::Raw),
    });
    routes.push(Route {
        suffix: "write/base64.txt",
        method: Method::POST,
        action: Action::Write(base64_write),
    });

    routes
}

/// Bind every route of `resource` into a fresh router.
pub(crate) fn register(resource: Arc<Resource>, options: &GatewayOptions) -> Router {
    let max_body_size = options.max_body_size;

    route_table(options)
        .into_iter()
        .fold(Router::new(), |router, route| {
            let path = format!("{}{}", resource.prefix(), route.suffix);
            let resource = Arc::clone(&resource);

            tracing::debug!(
                resource = %resource.name(),
                path = %path,
                method = %route.method,
                "Registering route"
            );

            router.route(
                &path,
                any(move |request: Request<Body>| {
                    let resource = Arc::clone(&resource);
                    let route = route.clone();
                    async move { dispatch(resource, route, request, max_body_size).await }
                }),
            )
        })
}
