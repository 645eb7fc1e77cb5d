use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use failure::{Error, Fail};

use serde_derive::Deserialize;

use crate::audio::{OutputFormat, Seconds};
use crate::concat::{DEFAULT_SILENCE, MAX_SILENCE};

#[derive(Debug, Fail)]
pub enum ConfigError {
  #[fail(
    display = "concat.silence_seconds must be between 0 and {}, got {}",
    max, value
  )]
  InvalidSilence { value: Seconds, max: Seconds },
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Archive {
  pub records_dir: PathBuf,
  pub record_extension: String,
  pub audio_dir: PathBuf,
  pub audio_extension: String,
  pub output_dir: PathBuf,
  pub persist: bool,
}

impl Default for Archive {
  fn default() -> Archive {
    Archive {
      records_dir: PathBuf::from("res"),
      record_extension: "amf".to_string(),
      audio_dir: PathBuf::from("res"),
      audio_extension: "wav".to_string(),
      output_dir: PathBuf::from("res"),
      persist: true,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Concat {
  pub silence_seconds: Seconds,
  pub output_format: OutputFormat,
}

impl Default for Concat {
  fn default() -> Concat {
    Concat {
      silence_seconds: DEFAULT_SILENCE,
      output_format: OutputFormat::Pcm16,
    }
  }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
  pub archive: Archive,
  pub concat: Concat,
}

impl Config {
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
    let mut content = String::new();
    let mut file = File::open(path.as_ref())?;
    file.read_to_string(&mut content)?;
    Config::from_str(content.as_str())
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    let silence = self.concat.silence_seconds;
    if silence.is_finite() && silence >= 0.0 && silence <= MAX_SILENCE {
      Ok(())
    } else {
      Err(ConfigError::InvalidSilence {
        value: silence,
        max: MAX_SILENCE,
      })
    }
  }
}
