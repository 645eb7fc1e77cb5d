use std::path::PathBuf;
use std::thread;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use failure::Fail;
use log::{debug, info};

use clip_archive_core::audio::OutputFormat;
use clip_archive_core::concat::ConcatReport;
use clip_archive_core::queue::{Outcome, PendingRequest, RequestId};
use clip_archive_core::store::ClipRecord;
use clip_archive_core::{Archive, ArchiveResult};

#[derive(Debug, Fail)]
pub enum ControllerError {
  #[fail(display = "Failed to create the Controller thread: {}", cause)]
  Start { cause: String },

  #[fail(display = "Failed to join the Controller thread")]
  Stop,

  #[fail(display = "The Controller thread is gone")]
  Disconnected,
}

/// Snapshot of the archive state.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
  pub clips: Vec<ClipRecord>,
  pub selection: Vec<String>,
  pub pending: Vec<(PendingRequest, Vec<String>)>,
}

pub enum Protocol {
  Stop,

  Submit {
    names: Vec<String>,
    reply: Sender<ArchiveResult<Outcome>>,
  },

  Add {
    name: String,
    resource: PathBuf,
    reply: Sender<ArchiveResult<()>>,
  },

  Remove {
    name: String,
    reply: Sender<bool>,
  },

  Rename {
    name: String,
    new_name: String,
    reply: Sender<ArchiveResult<()>>,
  },

  Select {
    names: Vec<String>,
    reply: Sender<Vec<String>>,
  },

  Deselect {
    names: Vec<String>,
    reply: Sender<Vec<String>>,
  },

  Cancel {
    id: RequestId,
    reply: Sender<bool>,
  },

  Merge {
    output: PathBuf,
    format: Option<OutputFormat>,
    reply: Sender<ArchiveResult<ConcatReport>>,
  },

  Import {
    count: usize,
    reply: Sender<ArchiveResult<Vec<String>>>,
  },

  List {
    reply: Sender<Listing>,
  },
}

struct ControllerThread {
  archive: Archive,
}

impl ControllerThread {
  fn new(archive: Archive) -> ControllerThread {
    ControllerThread { archive }
  }

  pub fn handle_messages(&mut self, protocol_rx: Receiver<Protocol>) {
    for msg in protocol_rx.iter() {
      match msg {
        Protocol::Stop => break,

        Protocol::Submit { names, reply } => {
          debug!("Submit {:?}", names);
          drop(reply.send(self.archive.submit(names)));
        }

        Protocol::Add {
          name,
          resource,
          reply,
        } => {
          debug!("Add {:?} -> {}", name, resource.display());
          drop(reply.send(self.archive.add_clip(name, resource)));
        }

        Protocol::Remove { name, reply } => {
          drop(reply.send(self.archive.remove_clip(&name)));
        }

        Protocol::Rename {
          name,
          new_name,
          reply,
        } => {
          drop(reply.send(self.archive.rename_clip(&name, &new_name)));
        }

        Protocol::Select { names, reply } => {
          self.archive.select(names);
          drop(reply.send(self.archive.selection().to_vec()));
        }

        Protocol::Deselect { names, reply } => {
          self.archive.deselect(names);
          drop(reply.send(self.archive.selection().to_vec()));
        }

        Protocol::Cancel { id, reply } => {
          drop(reply.send(self.archive.cancel(id).is_some()));
        }

        Protocol::Merge {
          output,
          format,
          reply,
        } => {
          drop(reply.send(self.archive.concatenate_selection(output, format)));
        }

        Protocol::Import { count, reply } => {
          drop(reply.send(self.archive.import_recent(count)));
        }

        Protocol::List { reply } => {
          drop(reply.send(self.listing()));
        }
      }
    }
  }

  fn listing(&self) -> Listing {
    let store = self.archive.store();
    Listing {
      clips: store.records().cloned().collect(),
      selection: self.archive.selection().to_vec(),
      pending: self
        .archive
        .pending()
        .iter()
        .map(|request| (request.clone(), request.missing(store)))
        .collect(),
    }
  }
}

pub struct Controller {
  handler: JoinHandle<()>,
  protocol_tx: Sender<Protocol>,
}

impl Controller {
  pub fn new_channel(capacity: usize) -> (Sender<Protocol>, Receiver<Protocol>) {
    crossbeam_channel::bounded::<Protocol>(capacity)
  }

  pub fn new(
    archive: Archive,
    protocol_tx: Sender<Protocol>,
    protocol_rx: Receiver<Protocol>,
  ) -> Result<Controller, ControllerError> {
    info!("Starting Controller ...");

    thread::Builder::new()
      .name("controller".into())
      .spawn(move || ControllerThread::new(archive).handle_messages(protocol_rx))
      .map_err(|err| ControllerError::Start {
        cause: err.to_string(),
      })
      .map(|handler| Controller {
        handler,
        protocol_tx,
      })
  }

  pub fn client(&self) -> ControllerClient {
    ControllerClient {
      protocol_tx: self.protocol_tx.clone(),
    }
  }

  pub fn stop(self) -> Result<(), ControllerError> {
    info!("Stopping Controller ...");

    self
      .protocol_tx
      .send(Protocol::Stop)
      .map_err(|_| ControllerError::Stop)
      .and_then(|()| self.handler.join().map_err(|_| ControllerError::Stop))
  }
}

/// Sends one message to the controller and waits for its reply.
#[derive(Clone)]
pub struct ControllerClient {
  protocol_tx: Sender<Protocol>,
}

impl ControllerClient {
  pub fn submit(&self, names: Vec<String>) -> Result<ArchiveResult<Outcome>, ControllerError> {
    self.request(|reply| Protocol::Submit { names, reply })
  }

  pub fn add<N, R>(&self, name: N, resource: R) -> Result<ArchiveResult<()>, ControllerError>
  where
    N: Into<String>,
    R: Into<PathBuf>,
  {
    let (name, resource) = (name.into(), resource.into());
    self.request(|reply| Protocol::Add {
      name,
      resource,
      reply,
    })
  }

  pub fn remove<N: Into<String>>(&self, name: N) -> Result<bool, ControllerError> {
    let name = name.into();
    self.request(|reply| Protocol::Remove { name, reply })
  }

  pub fn rename<N, M>(&self, name: N, new_name: M) -> Result<ArchiveResult<()>, ControllerError>
  where
    N: Into<String>,
    M: Into<String>,
  {
    let (name, new_name) = (name.into(), new_name.into());
    self.request(|reply| Protocol::Rename {
      name,
      new_name,
      reply,
    })
  }

  pub fn select(&self, names: Vec<String>) -> Result<Vec<String>, ControllerError> {
    self.request(|reply| Protocol::Select { names, reply })
  }

  pub fn deselect(&self, names: Vec<String>) -> Result<Vec<String>, ControllerError> {
    self.request(|reply| Protocol::Deselect { names, reply })
  }

  pub fn cancel(&self, id: RequestId) -> Result<bool, ControllerError> {
    self.request(|reply| Protocol::Cancel { id, reply })
  }

  pub fn merge<P: Into<PathBuf>>(
    &self,
    output: P,
    format: Option<OutputFormat>,
  ) -> Result<ArchiveResult<ConcatReport>, ControllerError> {
    let output = output.into();
    self.request(|reply| Protocol::Merge {
      output,
      format,
      reply,
    })
  }

  pub fn import(&self, count: usize) -> Result<ArchiveResult<Vec<String>>, ControllerError> {
    self.request(|reply| Protocol::Import { count, reply })
  }

  pub fn list(&self) -> Result<Listing, ControllerError> {
    self.request(|reply| Protocol::List { reply })
  }

  fn request<T, F>(&self, message: F) -> Result<T, ControllerError>
  where
    F: FnOnce(Sender<T>) -> Protocol,
  {
    let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
    self
      .protocol_tx
      .send(message(reply_tx))
      .map_err(|_| ControllerError::Disconnected)?;
    reply_rx.recv().map_err(|_| ControllerError::Disconnected)
  }
}
