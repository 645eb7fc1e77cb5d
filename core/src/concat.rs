use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::audio::{wav, AudioData, OutputFormat, SampleRate, Seconds};
use crate::config::Config;
use crate::error::{ArchiveError, ArchiveResult};
use crate::queue::{Fulfiller, PendingRequest};
use crate::store::{records, Clip, EntryStore};

pub const DEFAULT_SILENCE: Seconds = 2.0;

pub const MAX_SILENCE: Seconds = 3600.0;

/// Longest artifact file stem, in bytes, leaving room for the extension
/// under the usual 255 byte file name limit.
pub const MAX_STEM_BYTES: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum ConcatWarning {
  SampleRateMismatch {
    name: String,
    expected: SampleRate,
    found: SampleRate,
  },
  ChannelMismatch {
    name: String,
    expected: u16,
    found: u16,
  },
}

impl fmt::Display for ConcatWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ConcatWarning::SampleRateMismatch {
        name,
        expected,
        found,
      } => write!(
        f,
        "{:?} has a sample rate of {} Hz, it will be written at {} Hz",
        name, found, expected
      ),
      ConcatWarning::ChannelMismatch {
        name,
        expected,
        found,
      } => write!(
        f,
        "{:?} has {} channels, it will be remixed into {}",
        name, found, expected
      ),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConcatReport {
  pub output: PathBuf,
  pub sample_rate: SampleRate,
  pub channels: u16,
  pub frames: usize,
  pub duration: Seconds,
  pub warnings: Vec<ConcatWarning>,
}

/// Joins clips with a fixed silence between each consecutive pair.
/// The first clip defines the sample rate and channel layout of the output.
/// The silence is kept within `0..=MAX_SILENCE` seconds.
pub struct Concatenator {
  silence: Seconds,
  format: OutputFormat,
  output_dir: PathBuf,
}

impl Concatenator {
  pub fn new<P: Into<PathBuf>>(silence: Seconds, format: OutputFormat, output_dir: P) -> Self {
    let silence = if silence.is_finite() {
      silence.max(0.0).min(MAX_SILENCE)
    } else {
      0.0
    };
    Concatenator {
      silence,
      format,
      output_dir: output_dir.into(),
    }
  }

  pub fn from_config(config: &Config) -> Self {
    Concatenator::new(
      config.concat.silence_seconds,
      config.concat.output_format,
      config.archive.output_dir.clone(),
    )
  }

  pub fn silence(&self) -> Seconds {
    self.silence
  }

  pub fn format(&self) -> OutputFormat {
    self.format
  }

  /// Artifact path for a request label. Labels too long for a file name are cut
  /// on a char boundary and suffixed with `tag` to keep them apart.
  pub fn output_path(&self, label: &str, tag: &str) -> PathBuf {
    let stem = records::sanitize_file_name(label);
    let stem = if stem.len() > MAX_STEM_BYTES {
      let mut end = MAX_STEM_BYTES.saturating_sub(tag.len() + 1);
      while !stem.is_char_boundary(end) {
        end -= 1;
      }
      format!("{}-{}", &stem[..end], tag)
    } else {
      stem
    };
    self.output_dir.join(format!("{}.wav", stem))
  }

  pub fn concatenate<P: AsRef<Path>>(
    &self,
    store: &EntryStore,
    names: &[String],
    output: P,
    format: OutputFormat,
  ) -> ArchiveResult<ConcatReport> {
    if names.len() < 2 {
      return Err(ArchiveError::InsufficientSelection { count: names.len() });
    }

    let mut clips = Vec::with_capacity(names.len());
    for name in names {
      let audio = store.get(name)?.load_audio()?;
      clips.push((name.clone(), audio));
    }

    let (joined, warnings) = self.join(clips)?;

    let output = output.as_ref();
    info!(
      "Writing {} clips ({:.2}s) into {} ...",
      names.len(),
      joined.duration(),
      output.display()
    );
    wav::write(output, &joined, format).map_err(|err| ArchiveError::WriteFailure {
      path: output.display().to_string(),
      cause: err.to_string(),
    })?;

    Ok(ConcatReport {
      output: output.to_path_buf(),
      sample_rate: joined.sample_rate,
      channels: joined.channels,
      frames: joined.frames(),
      duration: joined.duration(),
      warnings,
    })
  }

  pub fn join(
    &self,
    clips: Vec<(String, AudioData)>,
  ) -> ArchiveResult<(AudioData, Vec<ConcatWarning>)> {
    if clips.len() < 2 {
      return Err(ArchiveError::InsufficientSelection { count: clips.len() });
    }

    let mut clips = clips.into_iter();
    let mut warnings = Vec::new();

    let (first_name, mut joined) = match clips.next() {
      Some(first) => first,
      None => return Err(ArchiveError::InsufficientSelection { count: 0 }),
    };
    let sample_rate = joined.sample_rate;
    let channels = joined.channels;
    debug!(
      "Reference clip {:?}: {} Hz, {} channels",
      first_name, sample_rate, channels
    );

    let silence = AudioData::silence(sample_rate, channels, self.silence);

    for (name, audio) in clips {
      if audio.sample_rate != sample_rate {
        warnings.push(ConcatWarning::SampleRateMismatch {
          name: name.clone(),
          expected: sample_rate,
          found: audio.sample_rate,
        });
      }

      let audio = if audio.channels != channels {
        warnings.push(ConcatWarning::ChannelMismatch {
          name: name.clone(),
          expected: channels,
          found: audio.channels,
        });
        audio.remix(channels)
      } else {
        audio
      };

      joined.append(&silence);
      joined.append(&audio);
    }

    warnings.iter().for_each(|warning| warn!("{}", warning));

    Ok((joined, warnings))
  }
}

impl Fulfiller for Concatenator {
  fn fulfil(&mut self, store: &EntryStore, request: &PendingRequest) -> ArchiveResult<PathBuf> {
    fs::create_dir_all(&self.output_dir).map_err(|err| ArchiveError::WriteFailure {
      path: self.output_dir.display().to_string(),
      cause: err.to_string(),
    })?;
    let tag: String = request.id().to_string().chars().take(8).collect();
    let output = self.output_path(request.label(), &tag);
    self
      .concatenate(store, request.names(), &output, self.format)
      .map(|report| report.output)
  }
}
