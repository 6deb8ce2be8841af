//! # exif-edit
//!
//! View and edit the EXIF metadata of JPEG images, GPS coordinates included,
//! and save the result as a new `<name>_modified.jpg`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_edit::exif::{self, TagValue, WriteOptions};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("photo.jpg");
//!
//!     // 1. Read the image and its tags
//!     let meta = exif::read(path)?;
//!     println!("Camera: {:?}", meta.tags.get("Model"));
//!     println!("Position: {:?}", meta.gps);
//!
//!     // 2. Edit in memory
//!     let mut tags = meta.tags;
//!     tags.set_tag("Artist", TagValue::Text("Jane Doe".into()))?;
//!     tags.remove_gps_info();
//!
//!     // 3. Save as photo_modified.jpg
//!     let report = exif::write(path, meta.handle, &tags, &WriteOptions::default())?;
//!     println!("Saved {}", report.path.display());
//!     for name in &report.skipped {
//!         println!("  not written: {name}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Downloading
//!
//! ```rust,no_run
//! use exif_edit::acquire::{download, download_target, DownloadOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dest = download_target("holiday");
//!     download("https://example.com/photo.jpg", &dest, &DownloadOptions::default()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`exif`] — tag reading, editing, GPS conversion and writing
//! - [`acquire`] — HTTP download of a source image
//! - [`session`] — the interactive view/edit/save loop
//! - [`display`] — terminal table rendering
//! - [`config`] — configuration types and loading/saving

pub mod acquire;
pub mod config;
pub mod display;
pub mod exif;
pub mod session;
