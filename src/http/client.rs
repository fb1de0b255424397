//! HTTP client: connection-level configuration and the request/redirect loop

use heapless::String;

use super::{Header, MAX_URL_LEN, Method, Request, ResponseHandle, Transport, is_redirect};
use crate::error::Error;

/// Connection-level configuration, set once at startup and read-only
/// thereafter.
///
/// Shared by every request issued through the same [`Client`]; there is no
/// per-call override surface.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// `User-Agent` header applied to requests that do not carry their own.
    pub useragent: Option<&'static str>,
    /// Request timeout enforced by the transport, in milliseconds.
    pub timeout_ms: u16,
    /// Watchdog window the host should arm around a transfer, in
    /// milliseconds. Zero leaves the platform default in place.
    pub watchdog_timeout_ms: u32,
    /// Whether redirect responses are transparently followed.
    pub follow_redirects: bool,
    /// Number of redirects a single logical request may follow.
    pub redirect_limit: u8,
    /// Hard cap on the response body buffer, in bytes.
    pub max_response_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            useragent: None,
            timeout_ms: 4500,
            watchdog_timeout_ms: 0,
            follow_redirects: true,
            redirect_limit: 3,
            max_response_buffer_size: super::body::RESPONSE_BODY_CAPACITY,
        }
    }
}

/// HTTP client over an abstract [`Transport`].
///
/// The client owns the transport and the shared [`Config`]; it assembles
/// requests, injects the configured user agent and drives the redirect loop.
/// Requests run to completion on the calling execution context, so no
/// locking guards the configuration.
pub struct Client<T: Transport> {
    transport: T,
    config: Config,
}

impl<T: Transport> Client<T> {
    /// Creates a client from a transport and its fixed configuration.
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Watchdog window to arm around transfers, in milliseconds.
    pub fn watchdog_timeout_ms(&self) -> u32 {
        self.config.watchdog_timeout_ms
    }

    /// Issues a GET request with no body and no extra headers.
    pub fn get(&mut self, url: &str) -> Option<T::Handle> {
        self.start(url, Method::Get, b"", &[])
    }

    /// Issues a POST request with the given body.
    pub fn post(&mut self, url: &str, body: &[u8]) -> Option<T::Handle> {
        self.start(url, Method::Post, body, &[])
    }

    /// Issues a request and returns a handle over the response.
    ///
    /// Returns `None` when no response could be obtained: transport failure,
    /// an exhausted redirect budget, or a malformed invocation. Callers must
    /// treat `None` as "no response" and not attempt any body work.
    pub fn start(
        &mut self,
        url: &str,
        method: Method,
        body: &[u8],
        headers: &[Header],
    ) -> Option<T::Handle> {
        self.try_start(url, method, body, headers).ok()
    }

    /// [`start`](Client::start) with the failure cause preserved.
    pub fn try_start(
        &mut self,
        url: &str,
        method: Method,
        body: &[u8],
        headers: &[Header],
    ) -> Result<T::Handle, Error> {
        if url.is_empty() {
            return Err(Error::EmptyUrl);
        }
        let headers = super::assemble_headers(headers, self.config.useragent)?;
        let mut target: String<MAX_URL_LEN> =
            String::try_from(url).map_err(|_| Error::UrlTooLong)?;
        let mut remaining_redirects = self.config.redirect_limit;

        loop {
            let request = Request {
                method,
                url: target.as_str(),
                body,
                headers: &headers,
                timeout_ms: self.config.timeout_ms,
            };
            let handle = self.transport.start(&request).ok_or(Error::Transport)?;

            if !self.config.follow_redirects || !is_redirect(handle.status()) {
                return Ok(handle);
            }
            if remaining_redirects == 0 {
                handle.end();
                return Err(Error::RedirectLimitExceeded);
            }
            remaining_redirects -= 1;

            // Copy the target out before the handle is released. An empty
            // Location is as unusable as a missing one.
            let location = match handle.redirect_location() {
                Some(location) if !location.is_empty() => {
                    String::try_from(location).map_err(|_| Error::UrlTooLong)
                }
                _ => Err(Error::MissingLocation),
            };
            handle.end();
            target = location?;
        }
    }
}
