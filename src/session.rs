//! The interactive view/edit/save loop, driven by any line-based input.
//!
//! ```text
//! Viewing ──1──▶ Editing ──(empty name)──▶ Viewing
//!    │ 2: drop GPS, stay
//!    ├──3──▶ ConfirmingClear ──▶ Viewing
//!    ├──4──▶ Saving ──▶ Viewing
//!    └──5──▶ Exiting
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::display::{self, Palette};
use crate::exif::{self, Axis, ImageHandle, Metadata, MetadataSet, TagValue, WriteOptions, tags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Viewing,
    Editing,
    ConfirmingClear,
    Saving,
    Exiting,
}

/// What happened during a session.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub saved: Vec<PathBuf>,
    /// Input ended before the user chose to exit.
    pub interrupted: bool,
}

/// Where the image to edit comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Local(PathBuf),
    Download { url: String, name: String },
}

pub struct Session<R, W> {
    input: R,
    output: W,
    path: PathBuf,
    handle: Option<ImageHandle>,
    tags: MetadataSet,
    options: WriteOptions,
    palette: Palette,
    state: State,
    saved: Vec<PathBuf>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, path: PathBuf, metadata: Metadata, options: WriteOptions, palette: Palette) -> Self {
        Self {
            input,
            output,
            path,
            handle: Some(metadata.handle),
            tags: metadata.tags,
            options,
            palette,
            state: State::Viewing,
            saved: Vec::new(),
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(mut self) -> io::Result<Summary> {
        if self.tags.is_empty() {
            writeln!(self.output, "No EXIF metadata found in {}.", self.path.display())?;
            let Some(answer) = self.prompt("Create metadata? (yes/no): ")? else {
                return Ok(self.finish(true));
            };
            self.state = if is_yes(&answer) { State::Editing } else { State::Exiting };
        } else {
            self.show()?;
        }

        loop {
            let next = match self.state {
                State::Viewing => self.view()?,
                State::Editing => self.edit()?,
                State::ConfirmingClear => self.confirm_clear()?,
                State::Saving => Some(self.save()?),
                State::Exiting => return Ok(self.finish(false)),
            };
            match next {
                Some(state) => self.state = state,
                None => return Ok(self.finish(true)),
            }
        }
    }

    fn finish(self, interrupted: bool) -> Summary {
        Summary { saved: self.saved, interrupted }
    }

    fn view(&mut self) -> io::Result<Option<State>> {
        writeln!(self.output, "1. Modify or add a tag")?;
        writeln!(self.output, "2. Remove GPS info")?;
        writeln!(self.output, "3. Clear all metadata")?;
        writeln!(self.output, "4. Save")?;
        writeln!(self.output, "5. Exit")?;
        let Some(choice) = self.prompt("Choose an option: ")? else {
            return Ok(None);
        };
        let next = match choice.as_str() {
            "1" => State::Editing,
            "2" => {
                if self.tags.has_gps() {
                    self.tags.remove_gps_info();
                    writeln!(self.output, "GPS info removed.")?;
                } else {
                    writeln!(self.output, "No GPS info to remove.")?;
                }
                State::Viewing
            }
            "3" => State::ConfirmingClear,
            "4" => State::Saving,
            "5" => State::Exiting,
            other => {
                writeln!(self.output, "Invalid choice `{other}`.")?;
                State::Viewing
            }
        };
        Ok(Some(next))
    }

    fn edit(&mut self) -> io::Result<Option<State>> {
        let Some(name) = self.prompt("Tag name (empty to finish): ")? else {
            return Ok(None);
        };
        if name.is_empty() {
            self.show()?;
            return Ok(Some(State::Viewing));
        }
        let existing = self.existing_value(&name);
        if let Some(current) = &existing {
            writeln!(self.output, "Current value: {current}")?;
        }
        let Some(input) = self.prompt("New value: ")? else {
            return Ok(None);
        };

        // Decimal degrees for a coordinate are stored as DMS plus its reference.
        let result = match (coordinate_axis(&name), input.parse::<f64>()) {
            (Some(Axis::Latitude), Ok(decimal)) => self.tags.set_latitude(decimal),
            (Some(Axis::Longitude), Ok(decimal)) => self.tags.set_longitude(decimal),
            _ => {
                let value = match (&existing, tags::expected_type(&name)) {
                    (None, Some(wire)) => TagValue::parse_as(wire, &input),
                    _ => TagValue::parse_like(existing.as_ref(), &input),
                };
                self.tags.set_tag(&name, value)
            }
        };
        match result {
            Ok(()) => writeln!(self.output, "Set {name}.")?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(Some(State::Editing))
    }

    fn confirm_clear(&mut self) -> io::Result<Option<State>> {
        let Some(answer) = self.prompt("Clear all metadata? (yes/no): ")? else {
            return Ok(None);
        };
        if is_yes(&answer) {
            self.tags.clear_all();
            writeln!(self.output, "All metadata cleared.")?;
        }
        Ok(Some(State::Viewing))
    }

    fn save(&mut self) -> io::Result<State> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => match ImageHandle::open(&self.path) {
                Ok(handle) => handle,
                Err(e) => {
                    writeln!(self.output, "Cannot re-open image: {e}")?;
                    return Ok(State::Viewing);
                }
            },
        };
        match exif::write(&self.path, handle, &self.tags, &self.options) {
            Ok(report) => {
                display::write_report(&mut self.output, &report, &self.palette)?;
                self.saved.push(report.path);
            }
            Err(e) => {
                log::error!("Save failed: {e}");
                writeln!(self.output, "Save failed: {e}")?;
            }
        }
        Ok(State::Viewing)
    }

    fn show(&mut self) -> io::Result<()> {
        display::write_metadata(&mut self.output, &self.path, &self.tags, &self.palette)
    }

    /// Current value under `name`, looking in the GPS set for GPS names.
    fn existing_value(&self, name: &str) -> Option<TagValue> {
        match (tags::tag_id(name), tags::gps_tag_id(name)) {
            (None, Some(id)) => self.tags.gps()?.get(&*tags::gps_tag_name(id)).cloned(),
            _ => self.tags.get(tags::canonical_name(name).unwrap_or(name)).cloned(),
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        prompt(&mut self.input, &mut self.output, text)
    }
}

/// Ask whether to download or open a local file. `None` when input ends.
pub fn ask_source<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<Source>> {
    let Some(answer) = prompt(input, output, "Download the image from a URL? (yes/no): ")? else {
        return Ok(None);
    };
    if is_yes(&answer) {
        let Some(url) = prompt(input, output, "Image URL: ")? else {
            return Ok(None);
        };
        loop {
            let Some(name) = prompt(input, output, "Save as (file name): ")? else {
                return Ok(None);
            };
            if !name.is_empty() {
                return Ok(Some(Source::Download { url, name }));
            }
            writeln!(output, "A file name is required.")?;
        }
    }
    let Some(path) = prompt(input, output, "Path to local image: ")? else {
        return Ok(None);
    };
    Ok(Some(Source::Local(Path::new(&path).to_path_buf())))
}

/// Print `text`, read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

fn coordinate_axis(name: &str) -> Option<Axis> {
    if name.eq_ignore_ascii_case("GPSLatitude") {
        Some(Axis::Latitude)
    } else if name.eq_ignore_ascii_case("GPSLongitude") {
        Some(Axis::Longitude)
    } else {
        None
    }
}
