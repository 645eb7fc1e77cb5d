use std::path::PathBuf;

use crossbeam_channel::Sender;

use crate::queue::RequestId;
use crate::store::{IgnoreReason, SelectionEvent, StoreEvent};

/// Messages delivered to the client of an archive.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
  EntryAdded {
    names: Vec<String>,
  },
  EntryRemoved {
    name: String,
  },
  EntryRenamed {
    renames: Vec<(String, String)>,
  },
  Ignored {
    name: String,
    reason: IgnoreReason,
  },

  RequestMissing {
    id: RequestId,
    label: String,
    missing: Vec<String>,
  },
  RequestFulfilled {
    id: RequestId,
    label: String,
    artifact: PathBuf,
  },
  RequestFailed {
    id: RequestId,
    label: String,
    cause: String,
  },
  RequestCancelled {
    id: RequestId,
    label: String,
  },
}

impl From<&StoreEvent> for Notification {
  fn from(event: &StoreEvent) -> Notification {
    match event.clone() {
      StoreEvent::EntryAdded { names } => Notification::EntryAdded { names },
      StoreEvent::EntryRemoved { name } => Notification::EntryRemoved { name },
      StoreEvent::EntryRenamed { renames } => Notification::EntryRenamed { renames },
      StoreEvent::Ignored { name, reason } => Notification::Ignored { name, reason },
    }
  }
}

pub fn forward_store_events(tx: Sender<Notification>) -> impl FnMut(&StoreEvent) + Send {
  move |event: &StoreEvent| drop(tx.send(Notification::from(event)))
}

pub fn forward_ignored_selections(tx: Sender<Notification>) -> impl FnMut(&SelectionEvent) + Send {
  move |event: &SelectionEvent| {
    if let SelectionEvent::Ignored { name, reason } = event {
      drop(tx.send(Notification::Ignored {
        name: name.clone(),
        reason: *reason,
      }));
    }
  }
}
