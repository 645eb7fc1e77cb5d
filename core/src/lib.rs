pub mod archive;
pub mod audio;
pub mod bus;
pub mod concat;
pub mod config;
pub mod error;
pub mod notification;
pub mod queue;
pub mod store;

pub use crate::archive::Archive;
pub use crate::error::{ArchiveError, ArchiveResult};
pub use crate::notification::Notification;
