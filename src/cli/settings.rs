use std::error::Error;

use crate::core::config::{Config, ConfigKey};

pub fn set(mut config: Config, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let key = parse_key(key);
    if let Err(e) = config.set_value(key, value) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
    config.save()?;
    println!("✅ Set {} to: {}", key.name(), value.trim());
    Ok(())
}

pub fn unset(mut config: Config, key: &str) -> Result<(), Box<dyn Error>> {
    let key = parse_key(key);
    config.unset_value(key);
    config.save()?;
    println!("✅ Unset {}", key.name());
    Ok(())
}

fn parse_key(key: &str) -> ConfigKey {
    match key.parse::<ConfigKey>() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}
