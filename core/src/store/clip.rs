use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::audio::{wav, AudioData};
use crate::error::{ArchiveError, ArchiveResult};
use crate::store::records;

/// A named audio recording tracked by the archive.
pub trait Clip {
  fn get_name(&self) -> &str;

  fn set_name(&mut self, name: String);

  fn load_audio(&self) -> ArchiveResult<AudioData>;

  /// Writes the record file. Records that were never bound to a file are kept in memory only.
  fn save(&self) -> ArchiveResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipRecord {
  name: String,
  resource: PathBuf,
  record_path: Option<PathBuf>,
}

impl ClipRecord {
  pub fn new<N, R>(name: N, resource: R) -> ClipRecord
  where
    N: Into<String>,
    R: Into<PathBuf>,
  {
    ClipRecord {
      name: name.into(),
      resource: resource.into(),
      record_path: None,
    }
  }

  pub fn with_record_path<P: Into<PathBuf>>(self, record_path: P) -> ClipRecord {
    ClipRecord {
      record_path: Some(record_path.into()),
      ..self
    }
  }

  pub fn resource(&self) -> &Path {
    self.resource.as_path()
  }

  pub fn record_path(&self) -> Option<&Path> {
    self.record_path.as_ref().map(PathBuf::as_path)
  }
}

impl Clip for ClipRecord {
  fn get_name(&self) -> &str {
    self.name.as_str()
  }

  fn set_name(&mut self, name: String) {
    self.name = name;
  }

  fn load_audio(&self) -> ArchiveResult<AudioData> {
    debug!("Loading audio for {:?} from {:?} ...", self.name, self.resource);
    wav::read(&self.resource).map_err(|err| ArchiveError::AudioLoad {
      name: self.name.clone(),
      cause: err.to_string(),
    })
  }

  fn save(&self) -> ArchiveResult<()> {
    let record_path = match self.record_path.as_ref() {
      Some(record_path) => record_path,
      None => return Ok(()),
    };

    let content = records::serialize(self, record_path);
    fs::write(record_path, content).map_err(|err| ArchiveError::WriteFailure {
      path: record_path.display().to_string(),
      cause: err.to_string(),
    })
  }
}
