//! Scoutdex is a terminal character encyclopedia and random "scout" for a
//! game-fan reference catalog.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`catalog`] owns the character record model, the data sources (REST
//!   backend or CSV export), query/paging projection and uniform draws.
//! - [`api`] speaks the backend's paginated HTTP interface.
//! - [`core`] holds configuration and the browser state machine, which
//!   turns actions into state changes plus commands for the event loop.
//! - [`ui`] renders the terminal interface and runs the interactive loop.
//! - [`cli`] parses arguments and runs the one-shot subcommands.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
