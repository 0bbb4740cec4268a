//! Torrent intake: descriptor construction, label routing, classification.
//!
//! Raw inputs (magnet links, torrent files) become [`TorrentDescriptor`]s
//! here, with malformed items skipped individually and logged, never
//! aborting a batch. The classifier then applies defaults and label routing
//! and splits the batch into immediately-addable descriptors and hashes that
//! still need engine-side metadata resolution.
//!
//! [`TorrentDescriptor`]: ebbtide_torrent_core::TorrentDescriptor

pub mod classify;
pub mod error;
pub mod label;
pub mod magnet;
pub mod source;

pub use classify::{Classification, classify};
pub use error::{IntakeError, IntakeResult};
pub use label::{LabelAssignment, match_label};
pub use magnet::{MagnetLink, descriptor_from_magnet, descriptors_from_magnets};
pub use source::{DecodedMetainfo, MetainfoDecoder, descriptors_from_files};
