//! Wire encodings between raw stream bytes and HTTP bodies.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain";

/// How much a read route pulls from the stream per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSize {
    /// A single-byte buffer.
    One,
    /// A [`CHUNK_SIZE`](crate::stream::CHUNK_SIZE) buffer.
    Chunk,
}

/// Read-side encoders, one per `read/*` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadEncoding {
    /// `byte.bin`: the raw byte, if any.
    ByteBin,
    /// `byte.txt`: number of bytes read as decimal text, empty when none.
    ByteTxt,
    /// `bytes.bin`: the raw chunk.
    BytesBin,
    /// `base64.txt`: standard base64 with padding.
    Base64Txt,
    /// `array.json`: JSON array of unsigned integers.
    ArrayJson,
    /// `text.json`: `{"Text": "..."}`.
    TextJson,
}

#[derive(Serialize)]
struct TextBody<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

impl ReadEncoding {
    pub fn read_size(self) -> ReadSize {
        match self {
            ReadEncoding::ByteBin | ReadEncoding::ByteTxt => ReadSize::One,
            _ => ReadSize::Chunk,
        }
    }

    /// Content type with `json_for_single_byte` reproducing the historical
    /// `application/json` label on the single-byte routes.
    pub fn content_type(self, json_for_single_byte: bool) -> &'static str {
        match self {
            ReadEncoding::ByteBin if json_for_single_byte => APPLICATION_JSON,
            ReadEncoding::ByteTxt if json_for_single_byte => APPLICATION_JSON,
            ReadEncoding::ByteBin | ReadEncoding::BytesBin => APPLICATION_OCTET_STREAM,
            ReadEncoding::ByteTxt | ReadEncoding::Base64Txt => TEXT_PLAIN,
            ReadEncoding::ArrayJson | ReadEncoding::TextJson => APPLICATION_JSON,
        }
    }

    pub fn encode(self, data: Vec<u8>) -> Vec<u8> {
        match self {
            ReadEncoding::ByteBin | ReadEncoding::BytesBin => data,
            ReadEncoding::ByteTxt => {
                if data.is_empty() {
                    Vec::new()
                } else {
                    data.len().to_string().into_bytes()
                }
            }
            ReadEncoding::Base64Txt => STANDARD.encode(&data).into_bytes(),
            ReadEncoding::ArrayJson => render_array(&data),
            ReadEncoding::TextJson => render_text(&data),
        }
    }
}

fn render_array(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + data.len() * 4);
    out.push(b'[');
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        out.extend_from_slice(byte.to_string().as_bytes());
    }
    out.push(b']');
    out
}

fn render_text(data: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(data);
    // Serializing a struct with one string field cannot fail.
    serde_json::to_vec(&TextBody { text: &text }).unwrap_or_default()
}

/// Write-side decoders, one per `write/*` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecoding {
    /// Request body bytes are written as-is.
    Raw,
    /// Request body is standard base64 text. Line breaks are ignored.
    Base64,
}

impl WriteDecoding {
    pub fn decode(self, body: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
        match self {
            WriteDecoding::Raw => Ok(body.to_vec()),
            WriteDecoding::Base64 => {
                let text: Vec<u8> = body
                    .iter()
                    .copied()
                    .filter(|b| !matches!(b, b'\r' | b'\n'))
                    .collect();
                STANDARD.decode(text)
            }
        }
    }
}
