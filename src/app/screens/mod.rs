//! TUI screen components

pub mod results;
pub mod running;

pub use results::ResultsScreen;
pub use running::RunningScreen;
