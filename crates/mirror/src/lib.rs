//! Recursive HLS manifest mirroring.
//!
//! Given the URL of a root playlist, [`MirrorBuilder`] fetches the manifest,
//! recursively resolves every nested playlist and media resource it
//! references, rewrites all internal references to relative local paths, and
//! writes a self-contained, offline-playable copy of the stream to disk.

mod builder;
mod codec;
pub mod config;
mod crypto;
pub mod error;
mod fetch;
mod layout;

pub use builder::MirrorBuilder;
pub use config::MirrorConfig;
pub use crypto::{decrypt_file, encrypt_file};
pub use error::MirrorError;
pub use layout::{MASTER_PLAYLIST, MEDIA_PLAYLIST};
