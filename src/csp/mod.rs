#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod domain;
pub mod position;
pub mod propagation;
pub mod puzzle;
pub mod search;
pub mod selection;
pub mod solver;
pub mod worklist;
