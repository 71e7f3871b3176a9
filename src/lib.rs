//! Pokedex TUI - catalog browser for the PokeAPI
//!
//! The library exposes the app's modules so the binary and tests share them.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod format;
pub mod pixmap;
pub mod reducer;
pub mod route;
pub mod state;
