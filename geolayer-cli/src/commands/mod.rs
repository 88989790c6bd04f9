//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`buffer`] - Buffer a layer by a radius in meters
//! - [`clip`] - Clip target layers against a clip layer
//! - [`difference`] - Subtract one layer's first feature from another's
//! - [`info`] - List input layers and smoke-test reconciliation
//! - [`intersect`] - Intersect two layers feature by feature
//! - [`union`] - Union the first features of two layers

pub mod buffer;
pub mod clip;
pub mod common;
pub mod difference;
pub mod info;
pub mod intersect;
pub mod union;
