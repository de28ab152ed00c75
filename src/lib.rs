//! Hex editor working directly on files through a fixed-size window
//!
//! [`model::WindowedBuffer`] caches one window of the file and supports
//! reads, in-place writes, pattern search and size-changing insert/remove
//! without ever loading the whole file. [`app::HexEditor`] is the
//! interactive terminal session built on top of it.

pub mod app;
pub mod config;
pub mod input;
pub mod model;
pub mod services;
pub mod view;
