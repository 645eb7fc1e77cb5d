use std::path::Path;
use std::str::FromStr;

use serde_derive::Deserialize;

use crate::audio::AudioData;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  #[serde(rename = "pcm16")]
  Pcm16,
  #[serde(rename = "float32")]
  Float32,
}

impl Default for OutputFormat {
  fn default() -> OutputFormat {
    OutputFormat::Pcm16
  }
}

impl FromStr for OutputFormat {
  type Err = String;

  fn from_str(value: &str) -> Result<OutputFormat, String> {
    match value {
      "pcm16" => Ok(OutputFormat::Pcm16),
      "float32" => Ok(OutputFormat::Float32),
      other => Err(format!("unknown output format {:?}", other)),
    }
  }
}

impl OutputFormat {
  fn spec(self, audio: &AudioData) -> hound::WavSpec {
    let (bits_per_sample, sample_format) = match self {
      OutputFormat::Pcm16 => (16, hound::SampleFormat::Int),
      OutputFormat::Float32 => (32, hound::SampleFormat::Float),
    };
    hound::WavSpec {
      channels: audio.channels,
      sample_rate: audio.sample_rate,
      bits_per_sample,
      sample_format,
    }
  }
}

pub fn read<P: AsRef<Path>>(path: P) -> Result<AudioData, hound::Error> {
  let reader = hound::WavReader::open(path.as_ref())?;
  let spec = reader.spec();

  let samples = match spec.sample_format {
    hound::SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>()?,
    hound::SampleFormat::Int => {
      let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
      reader
        .into_samples::<i32>()
        .map(|sample| sample.map(|value| value as f32 / max_value))
        .collect::<Result<Vec<_>, _>>()?
    }
  };

  Ok(AudioData::new(spec.sample_rate, spec.channels, samples))
}

pub fn write<P: AsRef<Path>>(
  path: P,
  audio: &AudioData,
  format: OutputFormat,
) -> Result<(), hound::Error> {
  let mut writer = hound::WavWriter::create(path.as_ref(), format.spec(audio))?;

  match format {
    OutputFormat::Pcm16 => {
      for sample in audio.samples.iter() {
        writer.write_sample((sample.max(-1.0).min(1.0) * 32767.0) as i16)?;
      }
    }
    OutputFormat::Float32 => {
      for sample in audio.samples.iter() {
        writer.write_sample(*sample)?;
      }
    }
  }

  writer.finalize()
}

#[cfg(test)]
mod test {

  use super::{read, write, OutputFormat};
  use crate::audio::AudioData;

  #[test]
  pub fn write_then_read_pcm16() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    let audio = AudioData::new(8000, 1, vec![0.0, 0.5, -0.5, 1.0]);

    write(&path, &audio, OutputFormat::Pcm16).unwrap();
    let loaded = read(&path).unwrap();

    assert_eq!(loaded.sample_rate, 8000);
    assert_eq!(loaded.channels, 1);
    assert_eq!(loaded.frames(), 4);
    for (loaded, expected) in loaded.samples.iter().zip(audio.samples.iter()) {
      assert!((loaded - expected).abs() < 1e-3);
    }
  }

  #[test]
  pub fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.wav");
    let audio = AudioData::new(8000, 1, vec![0.0]);
    assert!(write(&path, &audio, OutputFormat::Float32).is_err());
  }
}
