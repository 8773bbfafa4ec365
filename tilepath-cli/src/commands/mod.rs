//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`resolve`] - Tile to address (`url`, `path`, `locate`)
//! - [`decode`] - Packed id to tile
//! - [`sources`] - Catalog listing

pub mod common;
pub mod decode;
pub mod resolve;
pub mod sources;
