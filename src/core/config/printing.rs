use crate::core::config::data::{path_display, Config, DEFAULT_BASE_URL};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset, defaults to {DEFAULT_BASE_URL})"),
        }
        match self.page_size {
            Some(size) => println!("  page-size: {size}"),
            None => println!("  page-size: (unset, defaults to {})", self.page_size()),
        }
        match &self.csv_path {
            Some(path) => println!("  csv-path: {}", path_display(path)),
            None => println!("  csv-path: (unset, using the backend)"),
        }
        match self.scout_delay_ms {
            Some(ms) => println!("  scout-delay-ms: {ms}"),
            None => println!(
                "  scout-delay-ms: (unset, defaults to {})",
                self.scout_delay().as_millis()
            ),
        }
    }
}
