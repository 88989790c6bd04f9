//! Rendering surface abstraction
//!
//! The reconciliation engine drives a map display through the
//! [`RenderSurface`] trait rather than a concrete renderer. A surface is a
//! stateful external system: sources and primitives created on it persist
//! until destroyed, and creating the same one twice is an error. The trait
//! captures exactly the calls the engine is allowed to make and the
//! contract each call carries.

mod null;
mod types;

pub use null::NullSurface;
pub use types::{
    primitive_kind_of, Paint, PaintValue, PrimitiveKind, RenderSurface, SurfaceError,
    VISIBLE_OPACITY,
};
