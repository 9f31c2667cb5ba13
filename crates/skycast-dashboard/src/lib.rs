//! Dashboard orchestration for SkyCast
//!
//! Owns the transient weather state and its `Idle -> Loading -> Ready/Failed`
//! lifecycle, wires user actions to the favorites/journal managers, and
//! renders controller state for the terminal.

pub mod controller;
pub mod export;
pub mod render;

pub use controller::{Dashboard, DashboardError, DashboardState};
pub use export::{export_journal, render_journal_html};
