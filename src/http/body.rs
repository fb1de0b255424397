//! Bounded response body collection
//!
//! A response body is pulled into a single contiguous buffer in fixed-size
//! slices, never exceeding a hard cap and never trusting the declared
//! content length. Between slices the collector feeds the watchdog and
//! yields to the cooperative scheduler, so transfers spanning many scheduler
//! turns do not trip a watchdog restart.

use heapless::Vec;

use super::ResponseHandle;
use crate::platform::Platform;

/// Static capacity of the response body pool.
pub const RESPONSE_BODY_CAPACITY: usize = 2048;

/// Upper bound on a single transport read, in bytes.
pub const READ_SLICE_SIZE: usize = 512;

/// A captured response body.
///
/// The length of the vector is the body's effective length; chunk recovery
/// may shorten it after capture.
pub type ResponseBody = Vec<u8, RESPONSE_BODY_CAPACITY>;

/// Accumulates a response body within a runtime cap.
///
/// The collector borrows the platform hooks for the duration of one
/// collection; the returned buffer is exclusively owned by the caller.
pub struct BodyCollector<'p, P: Platform> {
    platform: &'p mut P,
    max_buffer_size: usize,
}

impl<'p, P: Platform> BodyCollector<'p, P> {
    /// Creates a collector bounded by `max_buffer_size` bytes.
    pub fn new(platform: &'p mut P, max_buffer_size: usize) -> Self {
        Self {
            platform,
            max_buffer_size,
        }
    }

    /// Pulls the full body of `response` into an owned buffer.
    ///
    /// The buffer is sized at `min(declared content length, cap)`, or the
    /// cap alone when the declared length is negative. When that size
    /// exceeds the static pool capacity the captured body is empty; this is
    /// a capacity degradation, not an error.
    ///
    /// Collection stops when the handle's
    /// [`bytes_read`](ResponseHandle::bytes_read) counter reaches the buffer
    /// bound, when a read fails to advance the offset between two
    /// consecutive iterations (a stalled transport), or when a read returns
    /// a negative value (graceful end-of-body). None of these is reported as
    /// an error; the bytes read so far become the body.
    pub fn collect<H: ResponseHandle>(&mut self, response: &mut H) -> ResponseBody {
        let declared = response.content_length();
        let max_length = if declared < 0 {
            self.max_buffer_size
        } else {
            (declared as usize).min(self.max_buffer_size)
        };

        let mut body = ResponseBody::new();
        if body.resize_default(max_length).is_err() {
            return ResponseBody::new();
        }

        let mut offset = 0usize;
        let mut last_offset = usize::MAX;
        while response.bytes_read() < max_length && offset != last_offset {
            last_offset = offset;
            let slice = (max_length - offset).min(READ_SLICE_SIZE);
            let read = response.read(&mut body[offset..offset + slice]);
            self.platform.feed_watchdog();
            self.platform.yield_now();
            if read < 0 {
                break;
            }
            offset += read as usize;
        }

        body.truncate(offset);
        body
    }
}
