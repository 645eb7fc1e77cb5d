use std::fmt;
use std::path::PathBuf;

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ArchiveError, ArchiveResult};
use crate::notification::Notification;
use crate::store::EntryStore;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct RequestId(Uuid);

impl RequestId {
  pub fn new() -> RequestId {
    RequestId(Uuid::new_v4())
  }

  pub fn parse(value: &str) -> Option<RequestId> {
    Uuid::parse_str(value.trim()).ok().map(RequestId)
  }
}

impl fmt::Display for RequestId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Splits a composite request into clip names, one per line.
pub fn parse_request(text: &str) -> Vec<String> {
  text
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(String::from)
    .collect()
}

pub fn label_for(names: &[String]) -> String {
  names.join("_")
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
  id: RequestId,
  names: Vec<String>,
  label: String,
  created_at: u64,
}

impl PendingRequest {
  pub fn id(&self) -> RequestId {
    self.id
  }

  pub fn names(&self) -> &[String] {
    self.names.as_slice()
  }

  pub fn label(&self) -> &str {
    self.label.as_str()
  }

  pub fn created_at(&self) -> u64 {
    self.created_at
  }

  /// Requested names not in the store, in request order and without repetitions.
  pub fn missing(&self, store: &EntryStore) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in self.names.iter() {
      if !store.contains(name) && !missing.contains(name) {
        missing.push(name.clone());
      }
    }
    missing
  }
}

/// Produces the artifact for a request whose clips are all in the store.
pub trait Fulfiller {
  fn fulfil(&mut self, store: &EntryStore, request: &PendingRequest) -> ArchiveResult<PathBuf>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  Fulfilled {
    id: RequestId,
    label: String,
    artifact: PathBuf,
  },
  Unsatisfied {
    id: RequestId,
    label: String,
    missing: Vec<String>,
  },
  Failed {
    id: RequestId,
    label: String,
    cause: String,
  },
}

/// Composite requests waiting for some of their clips, in arrival order.
pub struct PendingQueue {
  requests: Vec<PendingRequest>,
  next_created_at: u64,
  notifications: Sender<Notification>,
}

impl PendingQueue {
  pub fn new(notifications: Sender<Notification>) -> PendingQueue {
    PendingQueue {
      requests: Vec::new(),
      next_created_at: 0,
      notifications,
    }
  }

  pub fn pending(&self) -> &[PendingRequest] {
    self.requests.as_slice()
  }

  pub fn len(&self) -> usize {
    self.requests.len()
  }

  pub fn is_empty(&self) -> bool {
    self.requests.is_empty()
  }

  pub fn submit<F>(
    &mut self,
    names: Vec<String>,
    store: &EntryStore,
    fulfiller: &mut F,
  ) -> ArchiveResult<Outcome>
  where
    F: Fulfiller + ?Sized,
  {
    if names.len() < 2 {
      return Err(ArchiveError::InsufficientSelection { count: names.len() });
    }

    let request = self.create(names);
    let missing = request.missing(store);

    if missing.is_empty() {
      let artifact = self.fulfil(&request, store, fulfiller)?;
      Ok(Outcome::Fulfilled {
        id: request.id,
        label: request.label,
        artifact,
      })
    } else {
      info!(
        "Queued request {:?}, waiting for {:?}",
        request.label, missing
      );
      self.notify_missing(&request, &missing);
      let outcome = Outcome::Unsatisfied {
        id: request.id,
        label: request.label.clone(),
        missing,
      };
      self.requests.push(request);
      Ok(outcome)
    }
  }

  /// Re-evaluates every queued request against the store.
  /// The queue is taken out before the scan and the unresolved requests are put back in order.
  pub fn on_entry_added<F>(&mut self, store: &EntryStore, fulfiller: &mut F) -> Vec<Outcome>
  where
    F: Fulfiller + ?Sized,
  {
    let snapshot = std::mem::replace(&mut self.requests, Vec::new());
    debug!("Re-scanning {} pending requests", snapshot.len());

    let mut outcomes = Vec::with_capacity(snapshot.len());
    for request in snapshot {
      let missing = request.missing(store);
      if missing.is_empty() {
        let outcome = match self.fulfil(&request, store, fulfiller) {
          Ok(artifact) => Outcome::Fulfilled {
            id: request.id,
            label: request.label,
            artifact,
          },
          Err(err) => Outcome::Failed {
            id: request.id,
            label: request.label,
            cause: err.to_string(),
          },
        };
        outcomes.push(outcome);
      } else {
        self.notify_missing(&request, &missing);
        outcomes.push(Outcome::Unsatisfied {
          id: request.id,
          label: request.label.clone(),
          missing,
        });
        self.requests.push(request);
      }
    }

    outcomes
  }

  pub fn cancel(&mut self, id: RequestId) -> Option<PendingRequest> {
    let index = self.requests.iter().position(|request| request.id == id)?;
    let request = self.requests.remove(index);
    info!("Cancelled request {:?}", request.label);
    drop(self.notifications.send(Notification::RequestCancelled {
      id: request.id,
      label: request.label.clone(),
    }));
    Some(request)
  }

  fn create(&mut self, names: Vec<String>) -> PendingRequest {
    let created_at = self.next_created_at;
    self.next_created_at += 1;
    PendingRequest {
      id: RequestId::new(),
      label: label_for(&names),
      names,
      created_at,
    }
  }

  fn fulfil<F>(
    &self,
    request: &PendingRequest,
    store: &EntryStore,
    fulfiller: &mut F,
  ) -> ArchiveResult<PathBuf>
  where
    F: Fulfiller + ?Sized,
  {
    match fulfiller.fulfil(store, request) {
      Ok(artifact) => {
        info!("Fulfilled request {:?} into {:?}", request.label, artifact);
        drop(self.notifications.send(Notification::RequestFulfilled {
          id: request.id,
          label: request.label.clone(),
          artifact: artifact.clone(),
        }));
        Ok(artifact)
      }
      Err(err) => {
        warn!("Failed to fulfil request {:?}: {}", request.label, err);
        drop(self.notifications.send(Notification::RequestFailed {
          id: request.id,
          label: request.label.clone(),
          cause: err.to_string(),
        }));
        Err(err)
      }
    }
  }

  fn notify_missing(&self, request: &PendingRequest, missing: &[String]) {
    drop(self.notifications.send(Notification::RequestMissing {
      id: request.id,
      label: request.label.clone(),
      missing: missing.to_vec(),
    }));
  }
}
