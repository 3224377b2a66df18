use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use super::core::BlinkConfig;

/// Pure function to read and parse config file contents.
fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Load a [`BlinkConfig`] from a TOML file, falling back to spec-literal
/// defaults when `path` is `None`. A malformed file is a hard error: unlike
/// a malformed transaction row, a bad config file should not run the engine
/// on the wrong constants.
pub fn load_config(path: Option<&Path>) -> crate::error::Result<BlinkConfig> {
    match path {
        None => Ok(BlinkConfig::default()),
        Some(path) => {
            let contents = read_config_file(path)?;
            let config: BlinkConfig = toml::from_str(&contents)?;
            Ok(config)
        }
    }
}
