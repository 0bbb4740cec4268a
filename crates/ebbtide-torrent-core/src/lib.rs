//! Engine-agnostic torrent DTOs and collaborator traits.
//!
//! The transfer engine, disk probe, notifier, and review surface are all
//! external collaborators; this crate pins down the shapes they exchange with
//! the intake and session layers.

pub mod error;
pub mod model;
pub mod service;

pub use error::{TorrentError, TorrentResult};
pub use model::{
    AddFlags, DiskUsage, SessionEvent, SessionStats, TorrentDescriptor, TorrentHandle, TorrentInfo,
};
pub use service::{DiskSpaceProbe, Notifier, ReviewSink, TorrentEngine};
