//! Azul Game Engine and terminal front end
//!
//! Rules engine for the board game Azul, plus the terminal rendering shared
//! by the `azul` simulator and the interactive `play` binary.
//!
//! This crate re-exports the engine crate for convenience.

pub mod display;

pub use azul_engine::*;
