use failure::Fail;

#[derive(Debug, Clone, PartialEq, Fail)]
pub enum ArchiveError {
  #[fail(display = "An entry named {:?} already exists", name)]
  DuplicateEntry { name: String },

  #[fail(display = "No entry named {:?}", name)]
  NotFound { name: String },

  #[fail(display = "At least 2 clips are needed to concatenate, but got {}", count)]
  InsufficientSelection { count: usize },

  #[fail(display = "Failed to write {}: {}", path, cause)]
  WriteFailure { path: String, cause: String },

  #[fail(display = "Failed to load the audio for {:?}: {}", name, cause)]
  AudioLoad { name: String, cause: String },

  #[fail(display = "Invalid record {}: {}", path, cause)]
  Record { path: String, cause: String },

  #[fail(
    display = "Batch sizes differ: {} names and {} values",
    names, values
  )]
  BatchLengthMismatch { names: usize, values: usize },
}

pub type ArchiveResult<T> = Result<T, ArchiveError>;
