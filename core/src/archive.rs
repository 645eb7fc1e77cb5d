use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crossbeam_channel::Sender;
use log::{debug, info, warn};

use crate::audio::OutputFormat;
use crate::bus::SubscriptionId;
use crate::concat::{ConcatReport, Concatenator};
use crate::config::Config;
use crate::error::{ArchiveError, ArchiveResult};
use crate::notification::{self, Notification};
use crate::queue::{self, Outcome, PendingQueue, PendingRequest, RequestId};
use crate::store::{records, Clip, ClipRecord, EntryStore, SelectionEvent, StoreEvent};

/// The archive of one client: its clips, selection and pending requests.
///
/// Every store mutation runs to completion, notifications and queue re-scan included,
/// before the next one is accepted.
pub struct Archive {
  config: Config,
  store: EntryStore,
  queue: PendingQueue,
  concatenator: Concatenator,
}

impl Archive {
  pub fn new(config: Config, notifications: Sender<Notification>) -> Archive {
    let mut store = EntryStore::new();
    store.subscribe(notification::forward_store_events(notifications.clone()));
    store
      .selection_bus_mut()
      .subscribe(notification::forward_ignored_selections(notifications.clone()));

    let concatenator = Concatenator::from_config(&config);

    Archive {
      config,
      store,
      queue: PendingQueue::new(notifications),
      concatenator,
    }
  }

  /// Creates the archive with the records found in the records directory.
  pub fn load(config: Config, notifications: Sender<Notification>) -> ArchiveResult<Archive> {
    let mut archive = Archive::new(config, notifications);

    let archive_config = &archive.config.archive;
    if archive_config.records_dir.is_dir() {
      info!(
        "Loading records from {} ...",
        archive_config.records_dir.display()
      );
      let records = records::load_dir(
        &archive_config.records_dir,
        &archive_config.record_extension,
      )?;
      let results = archive.store.add_records(records);
      results
        .into_iter()
        .filter_map(Result::err)
        .for_each(|err| warn!("Skipping record: {}", err));
      info!("Loaded {} clips", archive.store.len());
    } else {
      info!(
        "No records directory at {}, starting empty",
        archive_config.records_dir.display()
      );
    }

    Ok(archive)
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn store(&self) -> &EntryStore {
    &self.store
  }

  pub fn pending(&self) -> &[PendingRequest] {
    self.queue.pending()
  }

  pub fn selection(&self) -> &[String] {
    self.store.selection()
  }

  pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
  where
    F: FnMut(&StoreEvent) + Send + 'static,
  {
    self.store.subscribe(callback)
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    self.store.unsubscribe(id)
  }

  pub fn subscribe_selection<F>(&mut self, callback: F) -> SubscriptionId
  where
    F: FnMut(&SelectionEvent) + Send + 'static,
  {
    self.store.selection_bus_mut().subscribe(callback)
  }

  pub fn add_clip<N, R>(&mut self, name: N, resource: R) -> ArchiveResult<()>
  where
    N: Into<String>,
    R: Into<PathBuf>,
  {
    let mut results = self.add_clips(vec![name.into()], vec![resource.into()])?;
    results.pop().unwrap_or(Ok(()))
  }

  pub fn add_clips<N, R>(
    &mut self,
    names: Vec<N>,
    resources: Vec<R>,
  ) -> ArchiveResult<Vec<ArchiveResult<()>>>
  where
    N: Into<String>,
    R: Into<PathBuf>,
  {
    if names.len() != resources.len() {
      return Err(ArchiveError::BatchLengthMismatch {
        names: names.len(),
        values: resources.len(),
      });
    }

    let mut reserved = HashSet::new();
    let records: Vec<ClipRecord> = names
      .into_iter()
      .zip(resources.into_iter())
      .map(|(name, resource)| {
        let record = ClipRecord::new(name, resource);
        match self.new_record_path(record.get_name(), &reserved) {
          Some(record_path) => {
            reserved.insert(record_path.clone());
            record.with_record_path(record_path)
          }
          None => record,
        }
      })
      .collect();

    let to_save = records.clone();
    let results = self.store.add_records(records);

    let mut added = 0;
    for (record, result) in to_save.iter().zip(results.iter()) {
      if result.is_ok() {
        added += 1;
        if let Err(err) = record.save() {
          warn!("Failed to save the record of {:?}: {}", record.get_name(), err);
        }
      }
    }

    if added > 0 {
      self.rescan();
    }

    Ok(results)
  }

  pub fn remove_clip(&mut self, name: &str) -> bool {
    match self.store.remove(name) {
      Some(record) => {
        let record_path = record.record_path().filter(|_| self.config.archive.persist);
        if let Some(record_path) = record_path {
          if let Err(err) = fs::remove_file(record_path) {
            warn!(
              "Failed to delete the record file {}: {}",
              record_path.display(),
              err
            );
          }
        }
        true
      }
      None => false,
    }
  }

  /// Renames a clip. The new name may be one a pending request waits for,
  /// so the queue is re-scanned as after an add.
  pub fn rename_clip(&mut self, name: &str, new_name: &str) -> ArchiveResult<()> {
    self.store.rename(name, new_name)?;
    self.save_record(new_name);
    self.rescan();
    Ok(())
  }

  pub fn rename_clips<N, M>(
    &mut self,
    names: Vec<N>,
    new_names: Vec<M>,
  ) -> ArchiveResult<Vec<ArchiveResult<()>>>
  where
    N: AsRef<str>,
    M: AsRef<str>,
  {
    let results = self.store.rename_batch(names, new_names.iter().collect())?;
    let mut renamed = 0;
    for (new_name, result) in new_names.iter().zip(results.iter()) {
      if result.is_ok() {
        renamed += 1;
        self.save_record(new_name.as_ref());
      }
    }
    if renamed > 0 {
      self.rescan();
    }
    Ok(results)
  }

  pub fn select<I>(&mut self, names: I)
  where
    I: IntoIterator,
    I::Item: Into<String>,
  {
    self.store.select(names);
  }

  pub fn deselect<I>(&mut self, names: I)
  where
    I: IntoIterator,
    I::Item: Into<String>,
  {
    self.store.deselect(names);
  }

  pub fn submit(&mut self, names: Vec<String>) -> ArchiveResult<Outcome> {
    self
      .queue
      .submit(names, &self.store, &mut self.concatenator)
  }

  pub fn submit_text(&mut self, text: &str) -> ArchiveResult<Outcome> {
    self.submit(queue::parse_request(text))
  }

  pub fn cancel(&mut self, id: RequestId) -> Option<PendingRequest> {
    self.queue.cancel(id)
  }

  /// Concatenates the selected clips in selection order, in the configured
  /// output format unless `format` is given.
  pub fn concatenate_selection<P: AsRef<Path>>(
    &self,
    output: P,
    format: Option<OutputFormat>,
  ) -> ArchiveResult<ConcatReport> {
    let format = format.unwrap_or_else(|| self.concatenator.format());
    self
      .concatenator
      .concatenate(&self.store, self.store.selection(), output, format)
  }

  /// Adds the `count` most recently modified audio files of the audio directory,
  /// named after their file stems.
  pub fn import_recent(&mut self, count: usize) -> ArchiveResult<Vec<String>> {
    let audio_dir = self.config.archive.audio_dir.clone();
    let extension = self.config.archive.audio_extension.clone();

    let mut files = recent_files(&audio_dir, &extension).map_err(|err| ArchiveError::AudioLoad {
      name: audio_dir.display().to_string(),
      cause: err.to_string(),
    })?;
    let files = files.split_off(files.len().saturating_sub(count));

    let names: Vec<String> = files
      .iter()
      .filter_map(|path| path.file_stem())
      .map(|stem| stem.to_string_lossy().into_owned())
      .collect();
    debug!("Importing {:?}", names);

    let results = self.add_clips(names.clone(), files)?;
    let imported = names
      .into_iter()
      .zip(results.into_iter())
      .filter_map(|(name, result)| match result {
        Ok(()) => Some(name),
        Err(err) => {
          warn!("Not importing {:?}: {}", name, err);
          None
        }
      })
      .collect();

    Ok(imported)
  }

  fn rescan(&mut self) {
    if !self.queue.is_empty() {
      self.queue.on_entry_added(&self.store, &mut self.concatenator);
    }
  }

  fn new_record_path(&self, name: &str, reserved: &HashSet<PathBuf>) -> Option<PathBuf> {
    let archive = &self.config.archive;
    if !archive.persist || self.store.contains(name) {
      return None;
    }
    if let Err(err) = fs::create_dir_all(&archive.records_dir) {
      warn!(
        "Failed to create the records directory {}: {}",
        archive.records_dir.display(),
        err
      );
      return None;
    }
    Some(records::new_record_path(
      &archive.records_dir,
      name,
      &archive.record_extension,
      reserved,
    ))
  }

  fn save_record(&self, name: &str) {
    if !self.config.archive.persist {
      return;
    }
    if let Ok(record) = self.store.get(name) {
      if let Err(err) = record.save() {
        warn!("Failed to save the record of {:?}: {}", name, err);
      }
    }
  }
}

fn recent_files(dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
  let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    let path = entry.path();
    let matches = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map_or(false, |ext| ext.eq_ignore_ascii_case(extension));
    if path.is_file() && matches {
      let modified = entry.metadata()?.modified()?;
      files.push((modified, path));
    }
  }
  files.sort();
  Ok(files.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod test {

  use std::fs;
  use std::path::Path;

  use crossbeam_channel::Receiver;

  use super::Archive;
  use crate::audio::{wav, AudioData, OutputFormat};
  use crate::config::Config;
  use crate::error::ArchiveError;
  use crate::notification::Notification;
  use crate::queue::Outcome;
  use crate::store::{Clip, IgnoreReason};

  fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.archive.records_dir = dir.join("records");
    config.archive.audio_dir = dir.join("audio");
    config.archive.output_dir = dir.join("out");
    config.concat.silence_seconds = 0.5;
    config
  }

  fn new_archive(config: Config) -> (Archive, Receiver<Notification>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (Archive::load(config, tx).unwrap(), rx)
  }

  fn write_tone(dir: &Path, name: &str, seconds: f64) -> std::path::PathBuf {
    fs::create_dir_all(dir).unwrap();
    let frames = (seconds * 8000.0) as usize;
    let path = dir.join(format!("{}.wav", name));
    let audio = AudioData::new(8000, 1, vec![0.25; frames]);
    wav::write(&path, &audio, OutputFormat::Pcm16).unwrap();
    path
  }

  fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
  }

  fn drain(rx: &Receiver<Notification>) -> Vec<Notification> {
    rx.try_iter().collect()
  }

  #[test]
  pub fn load_without_records_dir_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (archive, _rx) = new_archive(config_in(dir.path()));
    assert!(archive.store().is_empty());
    assert!(archive.pending().is_empty());
  }

  #[test]
  pub fn load_reads_the_records_dir() {
    let dir = tempfile::tempdir().unwrap();
    let records = dir.path().join("records");
    fs::create_dir_all(&records).unwrap();
    fs::write(records.join("a.amf"), "alpha\n../audio/alpha.wav\n").unwrap();
    fs::write(records.join("b.amf"), "beta\n").unwrap();
    fs::write(records.join("c.txt"), "gamma\ngamma.wav\n").unwrap();

    let (archive, rx) = new_archive(config_in(dir.path()));

    assert_eq!(archive.store().names(), names(&["alpha"]));
    let alpha = archive.store().get("alpha").unwrap();
    assert_eq!(alpha.resource(), records.join("../audio/alpha.wav"));
    assert_eq!(
      drain(&rx),
      vec![Notification::EntryAdded {
        names: names(&["alpha"])
      }]
    );
  }

  #[test]
  pub fn adding_the_missing_clip_fulfils_the_queued_request() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("audio");
    let (mut archive, rx) = new_archive(config_in(dir.path()));

    archive
      .add_clip("shalom", write_tone(&audio, "shalom", 1.0))
      .unwrap();
    drain(&rx);

    let outcome = archive.submit(names(&["shalom", "toda"])).unwrap();
    let id = match outcome {
      Outcome::Unsatisfied { id, missing, .. } => {
        assert_eq!(missing, names(&["toda"]));
        id
      }
      other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(archive.pending().len(), 1);
    assert_eq!(
      drain(&rx),
      vec![Notification::RequestMissing {
        id,
        label: "shalom_toda".into(),
        missing: names(&["toda"]),
      }]
    );

    archive
      .add_clip("toda", write_tone(&audio, "toda", 0.5))
      .unwrap();

    let artifact = dir.path().join("out").join("shalom_toda.wav");
    assert!(archive.pending().is_empty());
    assert_eq!(
      drain(&rx),
      vec![
        Notification::EntryAdded {
          names: names(&["toda"])
        },
        Notification::RequestFulfilled {
          id,
          label: "shalom_toda".into(),
          artifact: artifact.clone(),
        },
      ]
    );

    let written = wav::read(&artifact).unwrap();
    assert!((written.duration() - 2.0).abs() < 1e-3);
  }

  #[test]
  pub fn submit_text_is_split_into_lines() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("audio");
    let (mut archive, _rx) = new_archive(config_in(dir.path()));
    archive.add_clip("a", write_tone(&audio, "a", 0.1)).unwrap();
    archive.add_clip("b", write_tone(&audio, "b", 0.1)).unwrap();

    match archive.submit_text("a\n\n b \n").unwrap() {
      Outcome::Fulfilled { label, artifact, .. } => {
        assert_eq!(label, "a_b");
        assert!(artifact.is_file());
      }
      other => panic!("unexpected outcome: {:?}", other),
    }

    assert_eq!(
      archive.submit_text("a\n"),
      Err(ArchiveError::InsufficientSelection { count: 1 })
    );
    assert!(archive.pending().is_empty());
  }

  #[test]
  pub fn cancel_removes_the_request() {
    let dir = tempfile::tempdir().unwrap();
    let (mut archive, rx) = new_archive(config_in(dir.path()));
    let id = match archive.submit(names(&["x", "y"])).unwrap() {
      Outcome::Unsatisfied { id, .. } => id,
      other => panic!("unexpected outcome: {:?}", other),
    };
    drain(&rx);

    assert!(archive.cancel(id).is_some());
    assert!(archive.cancel(id).is_none());
    assert!(archive.pending().is_empty());
    assert_eq!(
      drain(&rx),
      vec![Notification::RequestCancelled {
        id,
        label: "x_y".into()
      }]
    );
  }

  #[test]
  pub fn record_files_follow_the_entries() {
    let dir = tempfile::tempdir().unwrap();
    let records = dir.path().join("records");
    let (mut archive, _rx) = new_archive(config_in(dir.path()));

    archive.add_clip("boker tov", "audio/boker.wav").unwrap();
    let record_path = archive
      .store()
      .get("boker tov")
      .unwrap()
      .record_path()
      .unwrap()
      .to_path_buf();
    assert!(record_path.starts_with(&records));
    let content = fs::read_to_string(&record_path).unwrap();
    assert!(content.starts_with("boker tov\n"));

    archive.rename_clip("boker tov", "good morning").unwrap();
    let content = fs::read_to_string(&record_path).unwrap();
    assert!(content.starts_with("good morning\n"));

    let (reloaded, _rx) = new_archive(config_in(dir.path()));
    assert_eq!(reloaded.store().names(), names(&["good morning"]));

    assert!(archive.remove_clip("good morning"));
    assert!(!record_path.exists());
  }

  #[test]
  pub fn nothing_is_written_without_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.archive.persist = false;
    let (mut archive, _rx) = new_archive(config);

    archive.add_clip("a", "a.wav").unwrap();
    assert_eq!(archive.store().get("a").unwrap().record_path(), None);
    assert!(!dir.path().join("records").exists());
  }

  #[test]
  pub fn duplicate_add_keeps_the_first_record() {
    let dir = tempfile::tempdir().unwrap();
    let (mut archive, rx) = new_archive(config_in(dir.path()));

    archive.add_clip("a", "first.wav").unwrap();
    assert_eq!(
      archive.add_clip("a", "second.wav"),
      Err(ArchiveError::DuplicateEntry { name: "a".into() })
    );
    assert_eq!(
      archive.store().get("a").unwrap().resource(),
      Path::new("first.wav")
    );
    assert_eq!(drain(&rx).len(), 1);
    assert_eq!(fs::read_dir(dir.path().join("records")).unwrap().count(), 1);
  }

  #[test]
  pub fn add_clips_with_different_lengths() {
    let dir = tempfile::tempdir().unwrap();
    let (mut archive, _rx) = new_archive(config_in(dir.path()));
    assert_eq!(
      archive.add_clips(names(&["a", "b"]), vec!["a.wav"]),
      Err(ArchiveError::BatchLengthMismatch {
        names: 2,
        values: 1
      })
    );
    assert!(archive.store().is_empty());
  }

  #[test]
  pub fn removing_a_missing_clip_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let (mut archive, rx) = new_archive(config_in(dir.path()));
    assert!(!archive.remove_clip("ghost"));
    assert_eq!(
      drain(&rx),
      vec![Notification::Ignored {
        name: "ghost".into(),
        reason: IgnoreReason::RemoveMissing,
      }]
    );
  }

  #[test]
  pub fn concatenate_selection_follows_selection_order() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("audio");
    let (mut archive, rx) = new_archive(config_in(dir.path()));
    archive.add_clip("a", write_tone(&audio, "a", 1.0)).unwrap();
    archive.add_clip("b", write_tone(&audio, "b", 0.5)).unwrap();
    drain(&rx);

    archive.select(vec!["b", "ghost", "a"]);
    assert_eq!(archive.selection(), names(&["b", "a"]).as_slice());
    assert_eq!(
      drain(&rx),
      vec![Notification::Ignored {
        name: "ghost".into(),
        reason: IgnoreReason::SelectMissing,
      }]
    );

    let output = dir.path().join("selection.wav");
    let report = archive.concatenate_selection(&output, None).unwrap();
    assert_eq!(report.output, output);
    assert!((report.duration - 2.0).abs() < 1e-3);

    archive.deselect(vec!["b"]);
    assert_eq!(
      archive
        .concatenate_selection(&output, None)
        .map(|report| report.frames),
      Err(ArchiveError::InsufficientSelection { count: 1 })
    );
  }

  #[test]
  pub fn batch_add_rescans_the_queue_once() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("audio");
    let (mut archive, rx) = new_archive(config_in(dir.path()));

    let waiting = match archive.submit(names(&["a", "b", "c"])).unwrap() {
      Outcome::Unsatisfied { id, .. } => id,
      other => panic!("unexpected outcome: {:?}", other),
    };
    let ready = match archive.submit(names(&["b", "a"])).unwrap() {
      Outcome::Unsatisfied { id, .. } => id,
      other => panic!("unexpected outcome: {:?}", other),
    };
    drain(&rx);

    let results = archive
      .add_clips(
        names(&["a", "b"]),
        vec![write_tone(&audio, "a", 0.1), write_tone(&audio, "b", 0.1)],
      )
      .unwrap();
    assert!(results.iter().all(Result::is_ok));

    assert_eq!(
      drain(&rx),
      vec![
        Notification::EntryAdded {
          names: names(&["a", "b"])
        },
        Notification::RequestMissing {
          id: waiting,
          label: "a_b_c".into(),
          missing: names(&["c"]),
        },
        Notification::RequestFulfilled {
          id: ready,
          label: "b_a".into(),
          artifact: dir.path().join("out").join("b_a.wav"),
        },
      ]
    );
    assert_eq!(archive.pending().len(), 1);
  }

  #[test]
  pub fn rename_to_a_missing_name_fulfils_the_request() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("audio");
    let (mut archive, rx) = new_archive(config_in(dir.path()));
    archive.add_clip("A", write_tone(&audio, "A", 0.1)).unwrap();
    archive.add_clip("b", write_tone(&audio, "b", 0.1)).unwrap();

    let id = match archive.submit(names(&["A", "B"])).unwrap() {
      Outcome::Unsatisfied { id, .. } => id,
      other => panic!("unexpected outcome: {:?}", other),
    };
    drain(&rx);

    archive.rename_clip("b", "B").unwrap();

    assert!(archive.pending().is_empty());
    assert_eq!(
      drain(&rx),
      vec![
        Notification::EntryRenamed {
          renames: vec![("b".into(), "B".into())]
        },
        Notification::RequestFulfilled {
          id,
          label: "A_B".into(),
          artifact: dir.path().join("out").join("A_B.wav"),
        },
      ]
    );
  }

  #[test]
  pub fn long_requests_are_fulfilled() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("audio");
    let (mut archive, _rx) = new_archive(config_in(dir.path()));

    let names: Vec<String> = (0..20).map(|i| format!("בוקר_טוב_{}", i)).collect();
    for (i, name) in names.iter().enumerate() {
      let resource = write_tone(&audio, &format!("clip{}", i), 0.05);
      archive.add_clip(name.as_str(), resource).unwrap();
    }

    match archive.submit(names).unwrap() {
      Outcome::Fulfilled { artifact, .. } => {
        assert!(artifact.is_file());
        let file_name = artifact.file_name().unwrap().to_str().unwrap();
        assert!(file_name.len() < 255);
        assert!(file_name.starts_with("בוקר_טוב_0_בוקר_טוב_1_"));
      }
      other => panic!("unexpected outcome: {:?}", other),
    }
  }

  #[test]
  pub fn concatenate_selection_in_the_requested_format() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("audio");
    let (mut archive, _rx) = new_archive(config_in(dir.path()));
    archive.add_clip("a", write_tone(&audio, "a", 0.1)).unwrap();
    archive.add_clip("b", write_tone(&audio, "b", 0.1)).unwrap();
    archive.select(vec!["a", "b"]);

    let output = dir.path().join("float.wav");
    archive
      .concatenate_selection(&output, Some(OutputFormat::Float32))
      .unwrap();
    let spec = hound::WavReader::open(&output).unwrap().spec();
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);

    archive.concatenate_selection(&output, None).unwrap();
    let spec = hound::WavReader::open(&output).unwrap().spec();
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(spec.bits_per_sample, 16);
  }

  #[test]
  pub fn import_recent_adds_audio_files_by_stem() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("audio");
    write_tone(&audio, "a", 0.1);
    write_tone(&audio, "b", 0.1);
    fs::write(audio.join("notes.txt"), "not audio").unwrap();
    let (mut archive, _rx) = new_archive(config_in(dir.path()));

    assert_eq!(archive.import_recent(5).unwrap(), names(&["a", "b"]));
    assert_eq!(archive.store().names(), names(&["a", "b"]));
    assert!(archive.import_recent(5).unwrap().is_empty());
    assert!(archive.import_recent(0).unwrap().is_empty());
  }

  #[test]
  pub fn import_from_a_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (mut archive, _rx) = new_archive(config_in(dir.path()));
    match archive.import_recent(1) {
      Err(ArchiveError::AudioLoad { .. }) => {}
      other => panic!("unexpected result: {:?}", other),
    }
  }
}
