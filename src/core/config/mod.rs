pub mod data;
pub mod io;
pub mod printing;


pub use data::{path_display, Config, ConfigKey, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use io::ConfigError;
