//! Interactive browser: event loop, key handling and background commands.

mod event_loop;
mod executors;
mod keybindings;
mod lifecycle;

pub use event_loop::{run_browser, BrowserOptions, UiEvent};
pub use executors::CommandExecutor;
pub use keybindings::actions_for_key;
