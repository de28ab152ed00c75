//! UI rendering modules

pub mod hex_view;
pub mod status_bar;

pub use hex_view::HexViewRenderer;
pub use status_bar::StatusBarRenderer;
