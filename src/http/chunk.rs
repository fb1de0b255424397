//! Heuristic recovery of chunk-framed bodies
//!
//! Some transport/server combinations report a negative content length for
//! responses that are in fact transfer-encoded. The captured buffer then
//! still carries vestigial framing: a leading hex length token terminated by
//! a line feed, and a fixed 7-byte trailing terminator
//! (`CR LF '0' CR LF CR LF`).
//!
//! This is a heuristic, not an RFC 7230 chunked decoder. It assumes exactly
//! one leading length token and one trailing terminator, and will mis-handle
//! multi-chunk bodies or bodies shorter than the terminator. Downstream
//! consumers may depend on this shape; do not replace it with a compliant
//! decoder without a behavior-change note.

use super::body::ResponseBody;

/// Length of the assumed trailing terminator sequence.
pub const CHUNK_TRAILER_LEN: usize = 7;

/// Strips the assumed chunk framing from `body` in place.
///
/// Returns the corrected effective length, or `None` when no line feed was
/// found; in that case the buffer is left unmodified and the failure is
/// log-only.
pub fn strip_chunk_framing(body: &mut ResponseBody) -> Option<usize> {
    let lf_position = match body.iter().position(|&b| b == b'\n') {
        Some(position) => position,
        None => {
            #[cfg(feature = "defmt")]
            defmt::warn!("chunk recovery: no LF in captured body, leaving as-is");
            return None;
        }
    };

    if body.len() > 2 {
        let head = lf_position + 1;
        let remaining = body.len() - head;
        body.copy_within(head.., 0);
        body.truncate(remaining);
        body.truncate(remaining.saturating_sub(CHUNK_TRAILER_LEN));
    }
    Some(body.len())
}
