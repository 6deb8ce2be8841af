//! Terminal rendering of a metadata set.

use std::io::{self, Write};
use std::path::Path;

use crate::exif::{MetadataSet, WriteReport};

/// Max value column width (terminal ~80 cols minus tag column and padding).
const VAL_WIDTH: usize = 46;
/// Indent for continuation lines (tag column width + " : " = 25 chars + 2 leading spaces).
const INDENT: &str = "                           ";

/// ANSI escape codes, or empty strings when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bold: &'static str,
    pub dim: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const ANSI: Palette = Palette {
        bold: "\x1b[1m",
        dim: "\x1b[2m",
        green: "\x1b[32m",
        yellow: "\x1b[33m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Palette = Palette {
        bold: "",
        dim: "",
        green: "",
        yellow: "",
        reset: "",
    };

    pub fn new(color: bool) -> Self {
        if color { Self::ANSI } else { Self::PLAIN }
    }
}

/// Print every tag of `set`, then the GPS block if there is one.
pub fn write_metadata<W: Write>(out: &mut W, path: &Path, set: &MetadataSet, p: &Palette) -> io::Result<()> {
    let Palette { bold, dim, reset, .. } = *p;
    writeln!(out)?;
    writeln!(out, "{bold}File:{reset} {}", path.display())?;
    writeln!(out, "{dim}{}{reset}", "═".repeat(72))?;

    if set.is_empty() {
        writeln!(out, "  {dim}(no EXIF metadata found){reset}")?;
        writeln!(out)?;
        return Ok(());
    }

    if set.iter().next().is_some() {
        writeln!(out, "  {bold}Tags{reset}")?;
        writeln!(out, "  {dim}{}{reset}", "─".repeat(70))?;
        for (tag, value) in set.iter() {
            write_row(out, tag, &value.to_string())?;
        }
        writeln!(out)?;
    }

    if let Some(gps) = set.gps() {
        writeln!(out, "  {bold}GPS{reset}")?;
        writeln!(out, "  {dim}{}{reset}", "─".repeat(70))?;
        let coord = set.coordinate();
        if let Some(lat) = coord.latitude {
            write_row(out, "Latitude", &format!("{lat:.6}"))?;
        }
        if let Some(lon) = coord.longitude {
            write_row(out, "Longitude", &format!("{lon:.6}"))?;
        }
        for (tag, value) in gps {
            write_row(out, tag, &value.to_string())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Print where a save went and anything that did not make it.
pub fn write_report<W: Write>(out: &mut W, report: &WriteReport, p: &Palette) -> io::Result<()> {
    let Palette { green, yellow, reset, .. } = *p;
    writeln!(out, "{green}Saved {}{reset}", report.path.display())?;
    if !report.skipped.is_empty() {
        writeln!(out, "{yellow}Not written (no standard EXIF id or structural): {}{reset}", report.skipped.join(", "))?;
    }
    if let Some(reason) = &report.fallback_reason {
        writeln!(out, "{yellow}Metadata could not be encoded ({reason}); image saved without EXIF.{reset}")?;
    }
    Ok(())
}

/// Print a single row in the metadata table.
fn write_row<W: Write>(out: &mut W, tag: &str, val: &str) -> io::Result<()> {
    let tag_col = format!("{:<22}", tag);
    for (i, line) in wrap_text(val, VAL_WIDTH).iter().enumerate() {
        if i == 0 {
            writeln!(out, "  {tag_col} : {line}")?;
        } else {
            writeln!(out, "  {INDENT}{line}")?;
        }
    }
    Ok(())
}

/// Wrap text at word boundaries to fit within max_width.
fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in s.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(s.to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::{Rational, TagValue};

    fn render(set: &MetadataSet) -> String {
        let mut out = Vec::new();
        write_metadata(&mut out, Path::new("a.jpg"), set, &Palette::PLAIN).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_set_says_so() {
        let text = render(&MetadataSet::new());
        assert!(text.contains("File: a.jpg"));
        assert!(text.contains("(no EXIF metadata found)"));
    }

    #[test]
    fn tags_and_gps_are_listed() {
        let mut set = MetadataSet::new();
        set.set_tag("Make", "Canon".into()).unwrap();
        set.set_tag("ExposureTime", Rational::new(1, 250).into()).unwrap();
        set.set_latitude(40.4462).unwrap();

        let text = render(&set);
        let row = |tag: &str, val: &str| format!("  {tag:<22} : {val}\n");
        assert!(text.contains(&row("Make", "Canon")));
        assert!(text.contains(&row("ExposureTime", "1/250")));
        assert!(text.contains(&row("Latitude", "40.446200")));
        assert!(text.contains(&row("GPSLatitudeRef", "N")));
        assert!(!text.contains("GPSInfo"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn long_values_wrap() {
        let mut set = MetadataSet::new();
        let long = "word ".repeat(30);
        set.set_tag("ImageDescription", TagValue::Text(long)).unwrap();
        let text = render(&set);
        assert!(text.lines().any(|l| l.starts_with(&format!("  {INDENT}word"))));
    }

    #[test]
    fn wrap_text_keeps_short_lines() {
        assert_eq!(wrap_text("a b c", 10), ["a b c"]);
        assert_eq!(wrap_text("", 10), [""]);
        assert_eq!(wrap_text("aaaa bbbb", 4), ["aaaa", "bbbb"]);
    }

    #[test]
    fn report_mentions_skipped_and_fallback() {
        let report = WriteReport {
            path: "x_modified.jpg".into(),
            skipped: vec!["MyTag".into()],
            fallback_reason: Some("`Artist` contains a NUL byte".into()),
            ..Default::default()
        };
        let mut out = Vec::new();
        write_report(&mut out, &report, &Palette::PLAIN).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Saved x_modified.jpg"));
        assert!(text.contains("MyTag"));
        assert!(text.contains("without EXIF"));
    }
}
