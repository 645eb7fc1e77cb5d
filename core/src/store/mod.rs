pub mod clip;
pub mod records;
pub mod selection;

pub use self::clip::{Clip, ClipRecord};
pub use self::selection::{Selection, SelectionEvent};

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use log::{debug, warn};

use crate::bus::{NotificationBus, SubscriptionId};
use crate::error::{ArchiveError, ArchiveResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
  RemoveMissing,
  SelectMissing,
  DeselectMissing,
  NotSelected,
}

impl fmt::Display for IgnoreReason {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let reason = match self {
      IgnoreReason::RemoveMissing => "cannot remove an entry that does not exist",
      IgnoreReason::SelectMissing => "cannot select an entry that does not exist",
      IgnoreReason::DeselectMissing => "cannot deselect an entry that does not exist",
      IgnoreReason::NotSelected => "the entry is not selected",
    };
    f.write_str(reason)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
  EntryAdded { names: Vec<String> },
  EntryRemoved { name: String },
  EntryRenamed { renames: Vec<(String, String)> },
  Ignored { name: String, reason: IgnoreReason },
}

/// Clip records by name, listed in insertion order.
#[derive(Default)]
pub struct EntryStore {
  records: HashMap<String, ClipRecord>,
  order: Vec<String>,
  selection: Selection,
  bus: NotificationBus<StoreEvent>,
}

impl EntryStore {
  pub fn new() -> EntryStore {
    EntryStore::default()
  }

  pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
  where
    F: FnMut(&StoreEvent) + Send + 'static,
  {
    self.bus.subscribe(callback)
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    self.bus.unsubscribe(id)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.records.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  pub fn get(&self, name: &str) -> ArchiveResult<&ClipRecord> {
    self.records.get(name).ok_or_else(|| ArchiveError::NotFound {
      name: name.to_string(),
    })
  }

  pub fn names(&self) -> Vec<String> {
    self.order.clone()
  }

  pub fn records(&self) -> impl Iterator<Item = &ClipRecord> {
    let records = &self.records;
    self.order.iter().filter_map(move |name| records.get(name))
  }

  pub fn add<N, R>(&mut self, name: N, resource: R) -> ArchiveResult<()>
  where
    N: Into<String>,
    R: Into<PathBuf>,
  {
    self.add_record(ClipRecord::new(name, resource))
  }

  pub fn add_record(&mut self, record: ClipRecord) -> ArchiveResult<()> {
    let name = self.insert(record)?;
    self.bus.publish(&StoreEvent::EntryAdded { names: vec![name] });
    Ok(())
  }

  pub fn add_batch<N, R>(
    &mut self,
    names: Vec<N>,
    resources: Vec<R>,
  ) -> ArchiveResult<Vec<ArchiveResult<()>>>
  where
    N: Into<String>,
    R: Into<PathBuf>,
  {
    check_batch(names.len(), resources.len())?;
    let records = names
      .into_iter()
      .zip(resources.into_iter())
      .map(|(name, resource)| ClipRecord::new(name, resource))
      .collect();
    Ok(self.add_records(records))
  }

  /// Inserts every record on its own and notifies once for the whole batch.
  pub fn add_records(&mut self, records: Vec<ClipRecord>) -> Vec<ArchiveResult<()>> {
    let mut added = Vec::new();
    let results = records
      .into_iter()
      .map(|record| self.insert(record).map(|name| added.push(name)))
      .collect();

    if !added.is_empty() {
      self.bus.publish(&StoreEvent::EntryAdded { names: added });
    }
    results
  }

  pub fn remove(&mut self, name: &str) -> Option<ClipRecord> {
    match self.records.remove(name) {
      Some(record) => {
        debug!("Removed entry {:?}", name);
        self.order.retain(|key| key != name);
        self.selection.reconcile_removed(name);
        self.bus.publish(&StoreEvent::EntryRemoved {
          name: name.to_string(),
        });
        Some(record)
      }
      None => {
        let reason = IgnoreReason::RemoveMissing;
        warn!("Ignoring {:?}: {}", name, reason);
        self.bus.publish(&StoreEvent::Ignored {
          name: name.to_string(),
          reason,
        });
        None
      }
    }
  }

  pub fn rename(&mut self, name: &str, new_name: &str) -> ArchiveResult<()> {
    if self.rekey(name, new_name)? {
      self.bus.publish(&StoreEvent::EntryRenamed {
        renames: vec![(name.to_string(), new_name.to_string())],
      });
    }
    Ok(())
  }

  pub fn rename_batch<N, M>(
    &mut self,
    names: Vec<N>,
    new_names: Vec<M>,
  ) -> ArchiveResult<Vec<ArchiveResult<()>>>
  where
    N: AsRef<str>,
    M: AsRef<str>,
  {
    check_batch(names.len(), new_names.len())?;

    let mut renames = Vec::new();
    let results = names
      .iter()
      .zip(new_names.iter())
      .map(|(name, new_name)| {
        let name: &str = name.as_ref();
        let new_name: &str = new_name.as_ref();
        self.rekey(name, new_name).map(|renamed| {
          if renamed {
            renames.push((name.to_string(), new_name.to_string()));
          }
        })
      })
      .collect();

    if !renames.is_empty() {
      self.bus.publish(&StoreEvent::EntryRenamed { renames });
    }
    Ok(results)
  }

  pub fn selection(&self) -> &[String] {
    self.selection.names()
  }

  pub fn selection_bus_mut(&mut self) -> &mut NotificationBus<SelectionEvent> {
    self.selection.bus_mut()
  }

  pub fn select<I>(&mut self, names: I)
  where
    I: IntoIterator,
    I::Item: Into<String>,
  {
    let records = &self.records;
    self
      .selection
      .select(names, |name| records.contains_key(name));
  }

  pub fn deselect<I>(&mut self, names: I)
  where
    I: IntoIterator,
    I::Item: Into<String>,
  {
    let records = &self.records;
    self
      .selection
      .deselect(names, |name| records.contains_key(name));
  }

  pub fn clear_selection(&mut self) {
    self.selection.clear();
  }

  fn insert(&mut self, record: ClipRecord) -> ArchiveResult<String> {
    let name = record.get_name().to_string();
    if self.records.contains_key(&name) {
      return Err(ArchiveError::DuplicateEntry { name });
    }

    debug!("Added entry {:?} -> {:?}", name, record.resource());
    self.records.insert(name.clone(), record);
    self.order.push(name.clone());
    Ok(name)
  }

  /// Returns whether the record actually changed its name.
  fn rekey(&mut self, name: &str, new_name: &str) -> ArchiveResult<bool> {
    if !self.records.contains_key(name) {
      return Err(ArchiveError::NotFound {
        name: name.to_string(),
      });
    }
    if name == new_name {
      return Ok(false);
    }
    if self.records.contains_key(new_name) {
      return Err(ArchiveError::DuplicateEntry {
        name: new_name.to_string(),
      });
    }

    if let Some(mut record) = self.records.remove(name) {
      record.set_name(new_name.to_string());
      self.records.insert(new_name.to_string(), record);
    }
    if let Some(key) = self.order.iter_mut().find(|key| key.as_str() == name) {
      *key = new_name.to_string();
    }
    self.selection.reconcile_renamed(name, new_name);

    debug!("Renamed entry {:?} to {:?}", name, new_name);
    Ok(true)
  }
}

fn check_batch(names: usize, values: usize) -> ArchiveResult<()> {
  if names == values {
    Ok(())
  } else {
    Err(ArchiveError::BatchLengthMismatch { names, values })
  }
}
