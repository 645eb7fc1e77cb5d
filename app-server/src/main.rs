use std::path::Path;
use std::thread;
use std::thread::JoinHandle;

use log::{debug, info, warn};

use failure;
use failure::{Error, Fail};

use crossbeam_channel::Receiver;

use clip_archive_core::config::Config;
use clip_archive_core::{Archive, Notification};

mod config;
use crate::config::Config as AppConfig;

mod console;
use crate::console::Console;

mod controller;
use crate::controller::Controller;

const CLIP_ARCHIVE_CONFIG: &str = "CLIP_ARCHIVE_CONFIG";
const DEFAULT_CLIP_ARCHIVE_CONFIG: &str = "archive.toml";

const CLIP_ARCHIVE_LOG_CONFIG: &str = "CLIP_ARCHIVE_LOG_CONFIG";
const DEFAULT_CLIP_ARCHIVE_LOG_CONFIG: &str = "log4rs.yaml";

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },

  #[fail(display = "Failed to start the notifications listener: {}", cause)]
  ListenerStart { cause: String },

  #[fail(display = "Failed to join the notifications listener")]
  ListenerStop,
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let (config, app_config) = init_config()?;

  let (notifications_tx, notifications_rx) = crossbeam_channel::unbounded::<Notification>();

  let archive = init_archive(config, notifications_tx)?;

  let listener = init_listener(notifications_rx)?;

  let controller = init_controller(archive, &app_config)?;

  let stdin = std::io::stdin();
  let mut console = Console::new(controller.client(), std::io::stdout());
  let result = console.run(stdin.lock());
  drop(console);

  controller.stop()?;

  // the archive owned the last notification senders
  listener.join().map_err(|_| MainError::ListenerStop)?;

  result
}

fn init_logging() -> Result<(), Error> {
  let log_config_path = std::env::var(CLIP_ARCHIVE_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_CLIP_ARCHIVE_LOG_CONFIG.to_string());

  log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
    MainError::LoggingInit {
      cause: err.to_string(),
    }
  })?;

  Ok(())
}

fn init_config() -> Result<(Config, AppConfig), Error> {
  let config_path = std::env::var(CLIP_ARCHIVE_CONFIG)
    .unwrap_or_else(|_| DEFAULT_CLIP_ARCHIVE_CONFIG.to_string());

  if !Path::new(config_path.as_str()).is_file() {
    warn!(
      "No configuration found at {}, using the defaults",
      config_path
    );
    return Ok((Config::default(), AppConfig::default()));
  }

  info!("Loading the archive configuration from {} ...", config_path);
  let config = Config::from_file(config_path.as_str())?;
  let app_config = AppConfig::from_file(config_path.as_str())?;
  debug!("{:#?}", config);
  debug!("{:#?}", app_config);

  Ok((config, app_config))
}

fn init_archive(
  config: Config,
  notifications_tx: crossbeam_channel::Sender<Notification>,
) -> Result<Archive, Error> {
  info!("Initialising the archive ...");

  let archive = Archive::load(config, notifications_tx)?;

  info!(
    "{} clips, output into {}",
    archive.store().len(),
    archive.config().archive.output_dir.display()
  );

  Ok(archive)
}

fn init_listener(notifications_rx: Receiver<Notification>) -> Result<JoinHandle<()>, Error> {
  thread::Builder::new()
    .name("notifications".into())
    .spawn(move || {
      for notification in notifications_rx.iter() {
        println!("* {}", console::describe(&notification));
      }
    })
    .map_err(|err| {
      MainError::ListenerStart {
        cause: err.to_string(),
      }
      .into()
    })
}

fn init_controller(archive: Archive, app_config: &AppConfig) -> Result<Controller, Error> {
  let (protocol_tx, protocol_rx) = Controller::new_channel(app_config.controller.channel_capacity);
  let controller = Controller::new(archive, protocol_tx, protocol_rx)?;
  Ok(controller)
}
