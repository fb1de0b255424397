//! # libhttpreq - Bounded-memory HTTP request engine
//!
//! A Rust library for issuing HTTP requests from memory-constrained devices
//! and dispatching the responses into an automation pipeline. The engine
//! streams response bodies into bounded buffers, never trusts the
//! server-declared content length, cooperates with a hardware watchdog
//! during long transfers, and delivers each response exactly once to every
//! registered consumer. It supports `no_std` environments throughout.
//!
//! ## What this crate does not do
//!
//! The network itself is out of scope: sockets, TLS and timeout enforcement
//! live behind the [`http::Transport`] trait, implemented by the target
//! platform. Likewise the watchdog and cooperative scheduler are consumed
//! only through [`platform::Platform`].
//!
//! ## Basic usage
//!
//! ```rust,no_run
//! use libhttpreq::automation::action::SendAction;
//! use libhttpreq::automation::TemplatableValue;
//! use libhttpreq::http::client::{Client, Config};
//! use libhttpreq::platform::NullPlatform;
//! # use libhttpreq::http::{Request, ResponseHandle, Transport};
//! # struct MockHandle;
//! # impl ResponseHandle for MockHandle {
//! #     fn status(&self) -> u16 { 200 }
//! #     fn content_length(&self) -> i32 { 0 }
//! #     fn set_content_length(&mut self, _len: i32) {}
//! #     fn duration_ms(&self) -> u32 { 0 }
//! #     fn bytes_read(&self) -> usize { 0 }
//! #     fn redirect_location(&self) -> Option<&str> { None }
//! #     fn read(&mut self, _buf: &mut [u8]) -> i32 { 0 }
//! #     fn end(self) {}
//! # }
//! # struct MockTransport;
//! # impl Transport for MockTransport {
//! #     type Handle = MockHandle;
//! #     fn start(&mut self, _request: &Request<'_>) -> Option<MockHandle> { Some(MockHandle) }
//! # }
//!
//! let config = Config {
//!     useragent: Some("device/1.0"),
//!     follow_redirects: true,
//!     redirect_limit: 3,
//!     ..Config::default()
//! };
//! let mut client = Client::new(MockTransport, config);
//! let mut platform = NullPlatform;
//!
//! let mut action: SendAction<'_, (), MockTransport> =
//!     SendAction::new("http://example.com/api/state");
//! action.set_capture_response(TemplatableValue::Fixed(true));
//! action.play(&mut client, &mut platform, &());
//! ```
//!
//! ## Design notes
//!
//! - All buffers are fixed-capacity `heapless` containers; a body larger
//!   than its buffer degrades to a truncated or empty capture instead of
//!   failing the request.
//! - A response handle is consumed by [`http::ResponseHandle::end`], so it
//!   is released exactly once on every exit path by construction.
//! - Bodies captured under a negative declared content length pass through
//!   a documented chunk-framing recovery heuristic ([`http::chunk`]).
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Automation glue: templated values, consumer traits and the send action.
pub mod automation;

/// Common error types for the request engine.
pub mod error;

/// HTTP client, body collection and chunk recovery.
pub mod http;

/// JSON object construction for request bodies.
pub mod json;

/// Watchdog and cooperative-scheduler hooks.
pub mod platform;

/// Re-exports of the items most integrations need.
pub mod prelude {
    pub use super::automation::action::SendAction;
    pub use super::automation::{ErrorTrigger, ResponseTrigger, TemplatableValue};
    pub use super::error::Error;
    pub use super::http::client::{Client, Config};
    pub use super::http::{Header, Method, Request, ResponseHandle, Transport};
    pub use super::platform::Platform;
}
