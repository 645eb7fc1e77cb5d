use failure;
use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

/// Settings of the server process. The archive settings live in the same file
/// and are read by `clip_archive_core::config::Config`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
  pub controller: Controller,
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    Config::from_str(content.as_str())
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Controller {
  pub channel_capacity: usize,
}

impl Default for Controller {
  fn default() -> Controller {
    Controller {
      channel_capacity: 1024,
    }
  }
}
