//! Terminal UI for browsing and scouting characters.
//!
//! - [`browser`]: terminal lifecycle, the event loop and the tasks that run
//!   [`crate::core::app::AppCommand`]s against a data source.
//! - [`renderer`] and [`theme`]: frame composition and color policy.
//!
//! State transitions live in [`crate::core::app`]; this layer only translates
//! keys into actions and draws whatever the state says.

pub mod browser;
pub mod renderer;
pub mod theme;
