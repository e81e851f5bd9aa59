//! A named byte stream exposed under an HTTP prefix.

use crate::stream::{ByteStream, StreamAdapter, StreamTimeouts};

use super::error::RegistrationError;

/// Characters the router treats as path syntax anywhere in a path.
const RESERVED: &[char] = &['{', '}'];

/// Segment prefixes the router rejects as old-style captures.
const RESERVED_SEGMENT_START: &[char] = &[':', '*'];

/// Ensure `name` has exactly the leading and trailing `/` a prefix needs.
///
/// `"foo"`, `"/foo"`, `"foo/"` and `"/foo/"` all become `"/foo/"`.
pub fn normalize_prefix(name: &str) -> String {
    let mut prefix = String::with_capacity(name.len() + 2);
    if !name.starts_with('/') {
        prefix.push('/');
    }
    prefix.push_str(name);
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    prefix
}

/// Reject names that would be parsed as route parameters or wildcards.
pub fn check_name(name: &str) -> Result<(), RegistrationError> {
    let bad_segment = name
        .split('/')
        .any(|segment| segment.starts_with(RESERVED_SEGMENT_START));
    if name.contains(RESERVED) || bad_segment {
        return Err(RegistrationError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// A logical name bound to one live stream.
#[derive(Debug)]
pub struct Resource {
    name: String,
    prefix: String,
    adapter: StreamAdapter,
}

impl Resource {
    /// Bind `name` to an already connected stream.
    pub fn new<S>(name: impl Into<String>, stream: S, timeouts: StreamTimeouts) -> Self
    where
        S: ByteStream + 'static,
    {
        let name = name.into();
        let prefix = normalize_prefix(&name);
        Self {
            name,
            prefix,
            adapter: StreamAdapter::new(stream, timeouts),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical URL prefix, always starting and ending with `/`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn stream(&self) -> &StreamAdapter {
        &self.adapter
    }
}
