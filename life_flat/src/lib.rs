//! A flat grid implementation of [`Simulator`].
//!
//! The grid is a single row by row bit sequence of fixed size; see [`engine`] for the stepping rules.

mod board;
pub mod engine;

pub use board::Board;
pub use engine::{clear, is_alive, set_cell, step};

#[doc(no_inline)]
pub use life_lib::Simulator;
