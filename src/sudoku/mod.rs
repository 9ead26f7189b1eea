#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Board I/O around the constraint engine.

/// Board text loading, grid rendering and solution validity checking.
pub mod board;
