use log::warn;

use crate::bus::NotificationBus;
use crate::store::IgnoreReason;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
  Selected { names: Vec<String> },
  Deselected { names: Vec<String> },
  Ignored { name: String, reason: IgnoreReason },
}

/// Ordered set of selected clip names. The order is the concatenation order.
#[derive(Default)]
pub struct Selection {
  names: Vec<String>,
  bus: NotificationBus<SelectionEvent>,
}

impl Selection {
  pub fn new() -> Selection {
    Selection::default()
  }

  pub fn names(&self) -> &[String] {
    self.names.as_slice()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.names.iter().any(|selected| selected == name)
  }

  pub fn bus_mut(&mut self) -> &mut NotificationBus<SelectionEvent> {
    &mut self.bus
  }

  pub fn select<I, F>(&mut self, names: I, is_known: F)
  where
    I: IntoIterator,
    I::Item: Into<String>,
    F: Fn(&str) -> bool,
  {
    let mut selected = Vec::new();
    for name in names.into_iter().map(Into::into) {
      if !is_known(&name) {
        self.ignore(name, IgnoreReason::SelectMissing);
      } else if !self.contains(&name) && !selected.contains(&name) {
        selected.push(name);
      }
    }

    if !selected.is_empty() {
      self.names.extend(selected.iter().cloned());
      self.bus.publish(&SelectionEvent::Selected { names: selected });
    }
  }

  pub fn deselect<I, F>(&mut self, names: I, is_known: F)
  where
    I: IntoIterator,
    I::Item: Into<String>,
    F: Fn(&str) -> bool,
  {
    let mut deselected = Vec::new();
    for name in names.into_iter().map(Into::into) {
      if !is_known(&name) {
        self.ignore(name, IgnoreReason::DeselectMissing);
      } else if !self.remove(&name) {
        self.ignore(name, IgnoreReason::NotSelected);
      } else {
        deselected.push(name);
      }
    }

    if !deselected.is_empty() {
      self.bus.publish(&SelectionEvent::Deselected { names: deselected });
    }
  }

  pub fn clear(&mut self) {
    if !self.names.is_empty() {
      let names = std::mem::replace(&mut self.names, Vec::new());
      self.bus.publish(&SelectionEvent::Deselected { names });
    }
  }

  /// Drops a name that is no longer in the store.
  pub(crate) fn reconcile_removed(&mut self, name: &str) {
    if self.remove(name) {
      self.bus.publish(&SelectionEvent::Deselected {
        names: vec![name.to_string()],
      });
    }
  }

  /// Replaces a renamed entry keeping its position.
  pub(crate) fn reconcile_renamed(&mut self, name: &str, new_name: &str) {
    if let Some(selected) = self.names.iter_mut().find(|selected| selected.as_str() == name) {
      *selected = new_name.to_string();
    }
  }

  fn remove(&mut self, name: &str) -> bool {
    let len = self.names.len();
    self.names.retain(|selected| selected != name);
    self.names.len() != len
  }

  fn ignore(&mut self, name: String, reason: IgnoreReason) {
    warn!("Ignoring {:?}: {}", name, reason);
    self.bus.publish(&SelectionEvent::Ignored { name, reason });
  }
}
