//! Record files: one UTF-8 file per clip, the clip name on the first line
//! and the audio locator on the second one. Relative locators are resolved
//! against the directory holding the record file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{ArchiveError, ArchiveResult};
use crate::store::clip::{Clip, ClipRecord};

pub fn parse(content: &str, record_path: &Path) -> ArchiveResult<ClipRecord> {
  let invalid = |cause: &str| ArchiveError::Record {
    path: record_path.display().to_string(),
    cause: cause.to_string(),
  };

  let mut lines = content.lines().map(str::trim);
  let name = lines
    .next()
    .filter(|line| !line.is_empty())
    .ok_or_else(|| invalid("missing the clip name"))?;
  let locator = lines
    .next()
    .filter(|line| !line.is_empty())
    .ok_or_else(|| invalid("missing the audio locator"))?;

  let locator = Path::new(locator);
  let resource = if locator.is_absolute() {
    locator.to_path_buf()
  } else {
    record_dir(record_path).join(locator)
  };

  Ok(ClipRecord::new(name, resource).with_record_path(record_path))
}

pub fn serialize(record: &ClipRecord, record_path: &Path) -> String {
  let locator = relative_locator(record.resource(), record_dir(record_path));
  format!("{}\n{}\n", record.get_name(), locator.display())
}

pub fn load_dir<P: AsRef<Path>>(dir: P, extension: &str) -> ArchiveResult<Vec<ClipRecord>> {
  let dir = dir.as_ref();
  let io_error = |err: std::io::Error| ArchiveError::Record {
    path: dir.display().to_string(),
    cause: err.to_string(),
  };

  let mut paths = Vec::new();
  for entry in fs::read_dir(dir).map_err(io_error)? {
    let path = entry.map_err(io_error)?.path();
    if path.is_file() && has_extension(&path, extension) {
      paths.push(path);
    }
  }
  paths.sort();

  let mut records = Vec::with_capacity(paths.len());
  for path in paths {
    match fs::read_to_string(&path)
      .map_err(|err| ArchiveError::Record {
        path: path.display().to_string(),
        cause: err.to_string(),
      })
      .and_then(|content| parse(&content, &path))
    {
      Ok(record) => {
        debug!("Loaded record {:?} from {}", record.get_name(), path.display());
        records.push(record);
      }
      Err(err) => warn!("Skipping record: {}", err),
    }
  }

  Ok(records)
}

/// Picks a record file path for a new clip that is neither on disk nor in `reserved`.
pub fn new_record_path(
  dir: &Path,
  name: &str,
  extension: &str,
  reserved: &HashSet<PathBuf>,
) -> PathBuf {
  let stem = sanitize_file_name(name);
  let mut path = dir.join(format!("{}.{}", stem, extension));
  let mut count = 1;
  while path.exists() || reserved.contains(&path) {
    path = dir.join(format!("{}-{}.{}", stem, count, extension));
    count += 1;
  }
  path
}

pub fn sanitize_file_name(name: &str) -> String {
  let sanitized: String = name
    .chars()
    .map(|c| match c {
      '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
      c if c.is_control() => '_',
      c => c,
    })
    .collect();

  match sanitized.trim() {
    "" | "." | ".." => "_".to_string(),
    trimmed => trimmed.to_string(),
  }
}

fn has_extension(path: &Path, extension: &str) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .map_or(false, |ext| ext.eq_ignore_ascii_case(extension))
}

fn record_dir(record_path: &Path) -> &Path {
  record_path.parent().unwrap_or_else(|| Path::new(""))
}

fn relative_locator(resource: &Path, dir: &Path) -> PathBuf {
  match resource.strip_prefix(dir) {
    Ok(relative) => relative.to_path_buf(),
    Err(_) if resource.is_absolute() => resource.to_path_buf(),
    Err(_) => std::env::current_dir()
      .map(|cwd| cwd.join(resource))
      .unwrap_or_else(|_| resource.to_path_buf()),
  }
}
