//! Geometry operation pipeline
//!
//! Five synchronous operations derive new layers from existing ones:
//! buffer, union, difference, intersect, and clip. Each is a pure function
//! over a store [`Snapshot`]: operand layers are read, never modified, and
//! results come back as fresh layers for the caller to append. Vertex math
//! is delegated to the `geo` crate; this module owns operand selection,
//! edge-case policy, and layer production.
//!
//! Every derived layer starts visible with the operation's default color
//! and a fresh id from the caller's [`IdGenerator`](crate::id::IdGenerator).
//!
//! [`Snapshot`]: crate::store::Snapshot

mod buffer;
mod clip;
mod difference;
mod intersect;
mod union;

pub use buffer::buffer;
pub use clip::clip;
pub use difference::difference;
pub use intersect::intersect;
pub use union::union;

use thiserror::Error;

use crate::color::Color;

/// Default color for layers derived by intersect.
pub const INTERSECT_COLOR: Color = Color::rgb(0xFF, 0x00, 0x00);

/// Default color for layers derived by buffer.
pub const BUFFER_COLOR: Color = Color::rgb(0xFF, 0x8C, 0x00);

/// Default color for layers derived by union.
pub const UNION_COLOR: Color = Color::rgb(0x70, 0x80, 0x90);

/// Default color for layers derived by difference.
pub const DIFFERENCE_COLOR: Color = Color::rgb(0xDC, 0x14, 0x3C);

/// Default color for layers derived by clip.
pub const CLIP_COLOR: Color = Color::rgb(0x80, 0x80, 0x00);

/// Errors the operations report to the user.
///
/// Only intersect and buffer surface failures; union, difference, and clip
/// treat every mismatch as a silent skip. The split mirrors how each
/// operation defines "nothing to do" versus "the request itself is wrong".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpError {
    /// An operand id did not resolve to a layer in the snapshot.
    #[error("invalid layer selection")]
    InvalidSelection,

    /// Intersect ran to completion and produced no output features.
    #[error("no intersections found between the selected layers")]
    NoIntersections,
}

/// Resolves the output layer name, substituting a generated one when the
/// request is blank or whitespace.
fn output_name(requested: &str, fallback: impl FnOnce() -> String) -> String {
    if requested.trim().is_empty() {
        fallback()
    } else {
        requested.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_error_messages() {
        assert_eq!(OpError::InvalidSelection.to_string(), "invalid layer selection");
        assert_eq!(
            OpError::NoIntersections.to_string(),
            "no intersections found between the selected layers"
        );
    }

    #[test]
    fn test_output_name_keeps_non_blank_request() {
        let name = output_name("Parks", || "fallback".to_string());
        assert_eq!(name, "Parks");
    }

    #[test]
    fn test_output_name_falls_back_on_whitespace() {
        let name = output_name("   ", || "Union A & B".to_string());
        assert_eq!(name, "Union A & B");
    }

    #[test]
    fn test_operation_colors_are_distinct() {
        let colors = [
            INTERSECT_COLOR,
            BUFFER_COLOR,
            UNION_COLOR,
            DIFFERENCE_COLOR,
            CLIP_COLOR,
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
