//! Common error types for the request engine

/// Errors produced while preparing or issuing a request.
///
/// Only the client's request-establishment path reports errors; body
/// collection, chunk recovery and trigger dispatch degrade to default
/// values instead (an empty or truncated body), so those stages have no
/// error variants here.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The request URL was empty.
    EmptyUrl,
    /// The request URL did not fit the fixed URL buffer.
    UrlTooLong,
    /// A fixed-capacity buffer could not hold the data written to it.
    BufferOverflow,
    /// The remaining-redirect budget was exhausted before a non-redirect
    /// response was seen.
    RedirectLimitExceeded,
    /// A redirect response carried no usable `Location` target.
    MissingLocation,
    /// The transport failed to produce a response (DNS, connect, TLS
    /// handshake or timeout).
    Transport,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::EmptyUrl => defmt::write!(f, "EmptyUrl"),
            Error::UrlTooLong => defmt::write!(f, "UrlTooLong"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::RedirectLimitExceeded => defmt::write!(f, "RedirectLimitExceeded"),
            Error::MissingLocation => defmt::write!(f, "MissingLocation"),
            Error::Transport => defmt::write!(f, "Transport"),
        }
    }
}
