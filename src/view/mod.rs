//! Live Entry View
//!
//! Keeps an in-memory list of active entries consistent with the backing
//! store under two input sources: an explicit pull (initial load, and after
//! every change notification) and a wall-clock-driven expiry sweep.
//!
//! The in-memory list is a disposable cache. It is mutated only by
//! whole-list replacement (Load) or a pure time filter (Sweep), so the most
//! recently completed Load wins and no finer-grained locking is needed.

pub mod board;
pub mod error;

pub use board::{BoardConfig, BoardView};
pub use error::{ViewError, ViewResult};
