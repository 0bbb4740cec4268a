#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Settings model for the intake and session core.
//!
//! Layout: `model.rs` (typed settings and label records), `validate.rs`
//! (validation helpers), `loader.rs` (JSON file loader), `service.rs`
//! (`SettingsService` handing out copy-on-read snapshots).

pub mod error;
pub mod loader;
pub mod model;
pub mod service;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_from_path;
pub use model::{DiskSpaceLimit, Label, LabelId, Settings};
pub use service::SettingsService;
pub use validate::validate;
