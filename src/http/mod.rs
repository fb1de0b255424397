//! HTTP request engine for memory-constrained targets
//!
//! This module is the heart of the crate: a client that issues requests
//! through an abstract [`Transport`], follows redirects within a fixed
//! budget, and streams response bodies into bounded buffers. The engine
//! never opens sockets or performs TLS itself; both concerns live behind the
//! [`Transport`] seam so that plain-socket and secure-socket implementations
//! are interchangeable.
//!
//! Submodules:
//!
//! - [`client`]: connection-level configuration and the request/redirect loop
//! - [`body`]: bounded, watchdog-aware body collection
//! - [`chunk`]: heuristic repair of bodies captured under an untrusted
//!   content length

use heapless::{String, Vec};

pub mod body;
pub mod chunk;
pub mod client;

/// Maximum number of headers on a single request.
pub const MAX_HEADERS: usize = 16;
/// Maximum length of a header name.
pub const MAX_HEADER_NAME_LEN: usize = 64;
/// Maximum length of a header value.
pub const MAX_HEADER_VALUE_LEN: usize = 256;
/// Maximum length of a request URL, including any redirect target.
pub const MAX_URL_LEN: usize = 256;

/// 200 OK.
pub const STATUS_OK: u16 = 200;
/// 300 Multiple Choices; first status outside the success range.
pub const STATUS_MULTIPLE_CHOICES: u16 = 300;
/// 301 Moved Permanently.
pub const STATUS_MOVED_PERMANENTLY: u16 = 301;
/// 302 Found.
pub const STATUS_FOUND: u16 = 302;
/// 303 See Other.
pub const STATUS_SEE_OTHER: u16 = 303;
/// 307 Temporary Redirect.
pub const STATUS_TEMPORARY_REDIRECT: u16 = 307;
/// 308 Permanent Redirect.
pub const STATUS_PERMANENT_REDIRECT: u16 = 308;

/// Returns `true` if the status code is a redirect the client will follow.
pub fn is_redirect(status: u16) -> bool {
    matches!(
        status,
        STATUS_MOVED_PERMANENTLY
            | STATUS_FOUND
            | STATUS_SEE_OTHER
            | STATUS_TEMPORARY_REDIRECT
            | STATUS_PERMANENT_REDIRECT
    )
}

/// Returns `true` if the status code indicates a successful request
/// (200..300).
pub fn is_success(status: u16) -> bool {
    (STATUS_OK..STATUS_MULTIPLE_CHOICES).contains(&status)
}

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

impl Method {
    /// Wire representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A single request header.
///
/// Names are stored as given; the wire format is case-insensitive, so
/// consumers comparing names should use [`str::eq_ignore_ascii_case`].
#[derive(Debug, Clone)]
pub struct Header {
    /// Header name.
    pub name: String<MAX_HEADER_NAME_LEN>,
    /// Header value.
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

/// A fully-assembled request, immutable once built.
///
/// Constructed by [`client::Client`] per invocation and handed to the
/// [`Transport`]. `timeout_ms` carries the client-level timeout so the
/// transport can enforce it; the engine itself never measures time.
#[derive(Debug)]
pub struct Request<'a> {
    /// Request method.
    pub method: Method,
    /// Absolute request URL.
    pub url: &'a str,
    /// Request body; empty for body-less requests.
    pub body: &'a [u8],
    /// Ordered header list, user agent already applied.
    pub headers: &'a [Header],
    /// Transport-enforced request timeout in milliseconds.
    pub timeout_ms: u16,
}

/// An in-flight HTTP response owned by the request that created it.
///
/// The handle is a pull-based reader over the response body plus the
/// response metadata the engine needs. [`end`](ResponseHandle::end) consumes
/// the handle, so every handle is released exactly once on every exit path
/// by construction.
pub trait ResponseHandle {
    /// Response status code.
    fn status(&self) -> u16;

    /// Server-declared body size.
    ///
    /// Negative means the server did not provide a usable value; callers
    /// must never size an allocation directly from it.
    fn content_length(&self) -> i32;

    /// Overwrites the declared body size with a corrected value.
    fn set_content_length(&mut self, len: i32);

    /// Time elapsed establishing the response, in milliseconds.
    fn duration_ms(&self) -> u32;

    /// Total bytes handed out by [`read`](ResponseHandle::read) so far.
    fn bytes_read(&self) -> usize;

    /// Whether the response travelled over a secure transport.
    fn is_secure(&self) -> bool {
        false
    }

    /// Target of the `Location` header, when the response carries one.
    fn redirect_location(&self) -> Option<&str>;

    /// Reads up to `buf.len()` body bytes into `buf`.
    ///
    /// Returns the number of bytes read (zero when no further bytes are
    /// currently available) or a negative value on transport error.
    fn read(&mut self, buf: &mut [u8]) -> i32;

    /// Releases all transport resources held by the response.
    fn end(self);
}

/// Factory for in-flight responses; the narrow seam to the network stack.
///
/// Implementations perform the actual connect/TLS/write work. A transport
/// failure of any kind (DNS, connect, handshake, timeout) is reported as
/// `None`, never as a panic.
pub trait Transport {
    /// Concrete response type produced by this transport.
    type Handle: ResponseHandle;

    /// Issues `request` and returns a handle over the response, or `None`
    /// when no response could be obtained.
    fn start(&mut self, request: &Request<'_>) -> Option<Self::Handle>;
}

/// Builds a header list from `headers`, appending `User-Agent: useragent`
/// unless the caller already supplied one.
pub(crate) fn assemble_headers(
    headers: &[Header],
    useragent: Option<&'static str>,
) -> Result<Vec<Header, MAX_HEADERS>, crate::error::Error> {
    let mut assembled: Vec<Header, MAX_HEADERS> = Vec::new();
    let mut has_user_agent = false;
    for header in headers {
        if header.name.eq_ignore_ascii_case("User-Agent") {
            has_user_agent = true;
        }
        assembled
            .push(header.clone())
            .map_err(|_| crate::error::Error::BufferOverflow)?;
    }
    if !has_user_agent {
        if let Some(useragent) = useragent {
            let header = Header {
                name: String::try_from("User-Agent").unwrap_or_default(),
                value: String::try_from(useragent)
                    .map_err(|_| crate::error::Error::BufferOverflow)?,
            };
            assembled
                .push(header)
                .map_err(|_| crate::error::Error::BufferOverflow)?;
        }
    }
    Ok(assembled)
}
