pub mod backend;
pub mod refresh;

pub use backend::{CrosstermTerminal, MockTerminal, TerminalWriter};
pub use refresh::Dashboard;
