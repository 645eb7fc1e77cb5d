pub mod wav;
pub use wav::OutputFormat;

pub type SampleRate = u32;

pub type Seconds = f64;

/// Decoded audio with interleaved samples
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
  pub sample_rate: SampleRate,
  pub channels: u16,
  pub samples: Vec<f32>,
}

impl AudioData {
  pub fn new(sample_rate: SampleRate, channels: u16, samples: Vec<f32>) -> Self {
    AudioData {
      sample_rate,
      channels,
      samples,
    }
  }

  pub fn silence(sample_rate: SampleRate, channels: u16, duration: Seconds) -> Self {
    let frames = (duration.max(0.0) * f64::from(sample_rate)).round() as usize;
    let samples = vec![0.0; frames * usize::from(channels)];
    AudioData::new(sample_rate, channels, samples)
  }

  pub fn frames(&self) -> usize {
    self.samples.len() / usize::from(self.channels.max(1))
  }

  pub fn duration(&self) -> Seconds {
    if self.sample_rate == 0 {
      0.0
    } else {
      self.frames() as f64 / f64::from(self.sample_rate)
    }
  }

  /// Converts to another channel layout. Mono output averages the input channels,
  /// any other layout repeats the last input channel when there are not enough of them.
  pub fn remix(self, channels: u16) -> AudioData {
    if channels == self.channels || self.channels == 0 || channels == 0 {
      return self;
    }

    let from = usize::from(self.channels);
    let to = usize::from(channels);
    let mut samples = Vec::with_capacity(self.frames() * to);
    for frame in self.samples.chunks(from) {
      if to == 1 {
        samples.push(frame.iter().sum::<f32>() / frame.len() as f32);
      } else {
        for channel in 0..to {
          samples.push(frame[channel.min(frame.len() - 1)]);
        }
      }
    }

    AudioData::new(self.sample_rate, channels, samples)
  }

  pub fn append(&mut self, other: &AudioData) {
    self.samples.extend_from_slice(&other.samples);
  }
}

#[cfg(test)]
mod test {

  use super::AudioData;

  #[test]
  pub fn silence() {
    let silence = AudioData::silence(8000, 2, 2.0);
    assert_eq!(silence.frames(), 16000);
    assert_eq!(silence.samples.len(), 32000);
    assert!(silence.samples.iter().all(|sample| *sample == 0.0));
    assert!((silence.duration() - 2.0).abs() < 1e-9);
  }

  #[test]
  pub fn remix_mono_to_stereo() {
    let audio = AudioData::new(100, 1, vec![0.1, 0.2]);
    let remixed = audio.remix(2);
    assert_eq!(remixed.channels, 2);
    assert_eq!(remixed.samples, vec![0.1, 0.1, 0.2, 0.2]);
  }

  #[test]
  pub fn remix_stereo_to_mono() {
    let audio = AudioData::new(100, 2, vec![0.2, 0.4, -1.0, 1.0]);
    let remixed = audio.remix(1);
    assert_eq!(remixed.frames(), 2);
    assert!((remixed.samples[0] - 0.3).abs() < 1e-6);
    assert!(remixed.samples[1].abs() < 1e-6);
  }
}
