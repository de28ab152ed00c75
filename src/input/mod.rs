//! Input handling: key events to editor actions

pub mod keybindings;
