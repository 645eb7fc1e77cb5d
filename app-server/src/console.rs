use std::io::{BufRead, Write};

use failure::{Error, Fail};
use log::{debug, info};

use clip_archive_core::audio::OutputFormat;
use clip_archive_core::queue::{self, Outcome, RequestId};
use clip_archive_core::store::Clip;
use clip_archive_core::Notification;

use crate::controller::ControllerClient;

#[derive(Debug, PartialEq)]
pub enum Command {
  Add { name: String, path: String },
  Remove { name: String },
  Rename { name: String, new_name: String },
  Select { names: Vec<String> },
  Deselect { names: Vec<String> },
  Merge {
    output: String,
    format: Option<OutputFormat>,
  },
  Cancel { id: RequestId },
  Import { count: usize },
  List,
  Quit,
}

#[derive(Debug, PartialEq, Fail)]
pub enum CommandError {
  #[fail(display = "Unknown command: /{}", command)]
  Unknown { command: String },

  #[fail(display = "Usage: {}", usage)]
  Usage { usage: &'static str },

  #[fail(display = "Not a request id: {}", value)]
  InvalidId { value: String },

  #[fail(display = "Not a count: {}", value)]
  InvalidCount { value: String },

  #[fail(display = "Not an output format: {} (pcm16 or float32)", value)]
  InvalidFormat { value: String },
}

/// Parses a console line starting with `/`.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
  let line = line.trim();
  let line = line.strip_prefix('/').unwrap_or(line);
  let mut words = line.split_whitespace();
  let command = words.next().unwrap_or("");
  let args: Vec<String> = words.map(str::to_string).collect();

  let usage = |usage: &'static str| CommandError::Usage { usage };

  match (command, args.as_slice()) {
    ("add", [name, path]) => Ok(Command::Add {
      name: name.clone(),
      path: path.clone(),
    }),
    ("add", _) => Err(usage("/add NAME PATH")),

    ("remove", [name]) => Ok(Command::Remove { name: name.clone() }),
    ("remove", _) => Err(usage("/remove NAME")),

    ("rename", [name, new_name]) => Ok(Command::Rename {
      name: name.clone(),
      new_name: new_name.clone(),
    }),
    ("rename", _) => Err(usage("/rename OLD NEW")),

    ("select", names) if !names.is_empty() => Ok(Command::Select {
      names: names.to_vec(),
    }),
    ("select", _) => Err(usage("/select NAMES...")),

    ("deselect", names) if !names.is_empty() => Ok(Command::Deselect {
      names: names.to_vec(),
    }),
    ("deselect", _) => Err(usage("/deselect NAMES...")),

    ("merge", [output]) => Ok(Command::Merge {
      output: output.clone(),
      format: None,
    }),
    ("merge", [output, format]) => format
      .parse::<OutputFormat>()
      .map(|format| Command::Merge {
        output: output.clone(),
        format: Some(format),
      })
      .map_err(|_| CommandError::InvalidFormat {
        value: format.clone(),
      }),
    ("merge", _) => Err(usage("/merge PATH [pcm16|float32]")),

    ("cancel", [id]) => RequestId::parse(id)
      .map(|id| Command::Cancel { id })
      .ok_or_else(|| CommandError::InvalidId { value: id.clone() }),
    ("cancel", _) => Err(usage("/cancel ID")),

    ("import", [count]) => count
      .parse::<usize>()
      .map(|count| Command::Import { count })
      .map_err(|_| CommandError::InvalidCount {
        value: count.clone(),
      }),
    ("import", _) => Err(usage("/import COUNT")),

    ("list", []) => Ok(Command::List),
    ("list", _) => Err(usage("/list")),

    ("quit", _) => Ok(Command::Quit),

    (command, _) => Err(CommandError::Unknown {
      command: command.to_string(),
    }),
  }
}

pub fn describe(notification: &Notification) -> String {
  match notification {
    Notification::EntryAdded { names } => format!("added {}", names.join(", ")),
    Notification::EntryRemoved { name } => format!("removed {}", name),
    Notification::EntryRenamed { renames } => {
      let renames: Vec<String> = renames
        .iter()
        .map(|(name, new_name)| format!("{} -> {}", name, new_name))
        .collect();
      format!("renamed {}", renames.join(", "))
    }
    Notification::Ignored { name, reason } => format!("ignored {}: {}", name, reason),
    Notification::RequestMissing { id, label, missing } => format!(
      "request {} ({}) is waiting for {}",
      id,
      label,
      missing.join(", ")
    ),
    Notification::RequestFulfilled {
      id,
      label,
      artifact,
    } => format!(
      "request {} ({}) fulfilled: {}",
      id,
      label,
      artifact.display()
    ),
    Notification::RequestFailed { id, label, cause } => {
      format!("request {} ({}) failed: {}", id, label, cause)
    }
    Notification::RequestCancelled { id, label } => {
      format!("request {} ({}) cancelled", id, label)
    }
  }
}

/// Line oriented front end of the controller.
///
/// Lines starting with `/` are commands. Any other line is a clip name added to
/// the request being composed, which is submitted at the next empty line or at
/// the end of the input.
pub struct Console<W: Write> {
  client: ControllerClient,
  out: W,
  request: String,
}

impl<W: Write> Console<W> {
  pub fn new(client: ControllerClient, out: W) -> Console<W> {
    Console {
      client,
      out,
      request: String::new(),
    }
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), Error> {
    info!("Reading commands ...");

    for line in input.lines() {
      let line = line?;
      let trimmed = line.trim();

      if trimmed.starts_with('/') {
        match parse_command(trimmed) {
          Ok(Command::Quit) => return Ok(()),
          Ok(command) => self.execute(command)?,
          Err(err) => writeln!(self.out, "error: {}", err)?,
        }
      } else if trimmed.is_empty() {
        self.submit()?;
      } else {
        self.request.push_str(trimmed);
        self.request.push('\n');
      }
    }

    self.submit()
  }

  fn submit(&mut self) -> Result<(), Error> {
    let names = queue::parse_request(&self.request);
    self.request.clear();
    if names.is_empty() {
      return Ok(());
    }

    debug!("Submitting {:?}", names);
    match self.client.submit(names)? {
      Ok(Outcome::Fulfilled { id, artifact, .. }) => {
        writeln!(self.out, "request {} fulfilled: {}", id, artifact.display())?
      }
      Ok(Outcome::Unsatisfied { id, missing, .. }) => writeln!(
        self.out,
        "request {} queued, missing {}",
        id,
        missing.join(", ")
      )?,
      Ok(Outcome::Failed { id, cause, .. }) => {
        writeln!(self.out, "request {} failed: {}", id, cause)?
      }
      Err(err) => writeln!(self.out, "error: {}", err)?,
    }
    Ok(())
  }

  fn execute(&mut self, command: Command) -> Result<(), Error> {
    match command {
      Command::Add { name, path } => match self.client.add(name.as_str(), path)? {
        Ok(()) => writeln!(self.out, "added {}", name)?,
        Err(err) => writeln!(self.out, "error: {}", err)?,
      },

      Command::Remove { name } => {
        if self.client.remove(name.as_str())? {
          writeln!(self.out, "removed {}", name)?
        } else {
          writeln!(self.out, "no clip named {}", name)?
        }
      }

      Command::Rename { name, new_name } => {
        match self.client.rename(name.as_str(), new_name.as_str())? {
          Ok(()) => writeln!(self.out, "renamed {} to {}", name, new_name)?,
          Err(err) => writeln!(self.out, "error: {}", err)?,
        }
      }

      Command::Select { names } => {
        let selection = self.client.select(names)?;
        writeln!(self.out, "selection: {}", selection.join(", "))?
      }

      Command::Deselect { names } => {
        let selection = self.client.deselect(names)?;
        writeln!(self.out, "selection: {}", selection.join(", "))?
      }

      Command::Merge { output, format } => match self.client.merge(output, format)? {
        Ok(report) => {
          writeln!(
            self.out,
            "wrote {} ({:.2}s)",
            report.output.display(),
            report.duration
          )?;
          for warning in report.warnings {
            writeln!(self.out, "warning: {}", warning)?;
          }
        }
        Err(err) => writeln!(self.out, "error: {}", err)?,
      },

      Command::Cancel { id } => {
        if self.client.cancel(id)? {
          writeln!(self.out, "cancelled {}", id)?
        } else {
          writeln!(self.out, "no pending request {}", id)?
        }
      }

      Command::Import { count } => match self.client.import(count)? {
        Ok(names) => writeln!(self.out, "imported {}", names.join(", "))?,
        Err(err) => writeln!(self.out, "error: {}", err)?,
      },

      Command::List => {
        let listing = self.client.list()?;
        for clip in &listing.clips {
          writeln!(
            self.out,
            "clip {} -> {}",
            clip.get_name(),
            clip.resource().display()
          )?;
        }
        writeln!(self.out, "selection: {}", listing.selection.join(", "))?;
        for (request, missing) in &listing.pending {
          writeln!(
            self.out,
            "pending {} ({}) waiting for {}",
            request.id(),
            request.label(),
            missing.join(", ")
          )?;
        }
      }

      Command::Quit => {}
    }
    Ok(())
  }
}
