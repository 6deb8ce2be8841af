//! EXIF metadata for JPEG images: reading, in-memory editing and writing.
//!
//! - [`read`] — decode an image and resolve its EXIF tags by name
//! - [`MetadataSet`] — the editable tag set (see the `set_tag` family)
//! - [`write`] — re-encode the pixels to `<stem>_modified.jpg` with the edited tags
//!
//! GPS sub-tags live in their own nested set; [`gps::degrees`] turns their
//! degrees/minutes/seconds form into signed decimal degrees.

mod editor;
pub mod gps;
mod reader;
pub mod tags;
mod value;
mod writer;

pub use editor::EditError;
pub use gps::{Axis, GpsCoordinate};
pub use reader::{ImageHandle, Metadata, ReadError, read, read_tags};
pub use value::{GPS_INFO_KEY, MetadataSet, ParseValueError, Rational, TagMap, TagValue, WireType};
pub use writer::{WriteError, WriteOptions, WriteReport, output_path, write};
