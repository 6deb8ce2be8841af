use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::gps::{self, GpsCoordinate};

/// Reserved key under which the GPS sub-structure lives.
pub const GPS_INFO_KEY: &str = "GPSInfo";

/// Prefix EXIF uses for ASCII-encoded `UserComment` payloads.
const ASCII_COMMENT_PREFIX: &[u8] = b"ASCII\0\0\0";

/// Bytes values longer than this are abbreviated when displayed.
const MAX_DISPLAY_BYTES: usize = 32;

/// An EXIF rational. Covers both the unsigned and signed wire forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: i64,
    pub den: i64,
}

impl Rational {
    pub fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// Floating-point value, or `None` for a zero denominator.
    pub fn to_f64(self) -> Option<f64> {
        if self.den == 0 {
            None
        } else {
            Some(self.num as f64 / self.den as f64)
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Accepts `a/b`, a whole number, or a decimal such as `46.3` (stored as
/// `463/10`).
impl FromStr for Rational {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((num, den)) = s.split_once('/') {
            let num = num.trim().parse().map_err(|_| ParseValueError)?;
            let den = den.trim().parse().map_err(|_| ParseValueError)?;
            return Ok(Self::new(num, den));
        }
        if let Ok(whole) = s.parse::<i64>() {
            return Ok(Self::new(whole, 1));
        }
        let (int_part, frac_part) = s.split_once('.').ok_or(ParseValueError)?;
        if frac_part.is_empty() || frac_part.len() > 9 || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseValueError);
        }
        let den = 10i64.pow(frac_part.len() as u32);
        let negative = int_part.starts_with('-');
        let int_value: i64 = match int_part {
            "" | "-" | "+" => 0,
            other => other.parse().map_err(|_| ParseValueError)?,
        };
        let frac_value: i64 = frac_part.parse().map_err(|_| ParseValueError)?;
        let magnitude = int_value
            .checked_abs()
            .and_then(|v| v.checked_mul(den))
            .and_then(|v| v.checked_add(frac_value))
            .ok_or(ParseValueError)?;
        Ok(Self::new(if negative { -magnitude } else { magnitude }, den))
    }
}

/// User input could not be parsed into the requested value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value does not match the expected format")]
pub struct ParseValueError;

/// EXIF field type of a value as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
}

/// A single EXIF value in its original representation.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Integer(i64),
    Integers(Vec<i64>),
    Rational(Rational),
    Rationals(Vec<Rational>),
    Float(f64),
    Floats(Vec<f64>),
    Bytes(Vec<u8>),
}

impl TagValue {
    /// Parse user input into the same kind as `existing`.
    ///
    /// Falls back to [`TagValue::Text`] when there is no existing value or the
    /// input does not fit its kind.
    pub fn parse_like(existing: Option<&TagValue>, input: &str) -> TagValue {
        let text = || TagValue::Text(input.to_string());
        let Some(existing) = existing else {
            return text();
        };
        match existing {
            TagValue::Text(_) => text(),
            TagValue::Integer(_) | TagValue::Integers(_) => {
                parse_list(input, |s| s.parse::<i64>().ok(), TagValue::Integer, TagValue::Integers)
                    .unwrap_or_else(text)
            }
            TagValue::Rational(_) | TagValue::Rationals(_) => {
                parse_list(input, |s| s.parse::<Rational>().ok(), TagValue::Rational, TagValue::Rationals)
                    .unwrap_or_else(text)
            }
            TagValue::Float(_) | TagValue::Floats(_) => {
                parse_list(input, |s| s.parse::<f64>().ok(), TagValue::Float, TagValue::Floats)
                    .unwrap_or_else(text)
            }
            TagValue::Bytes(old) => {
                if let Some(bytes) = parse_hex(input) {
                    return TagValue::Bytes(bytes);
                }
                let mut bytes = Vec::new();
                if old.starts_with(ASCII_COMMENT_PREFIX) {
                    bytes.extend_from_slice(ASCII_COMMENT_PREFIX);
                }
                bytes.extend_from_slice(input.as_bytes());
                TagValue::Bytes(bytes)
            }
        }
    }

    /// Parse user input for a tag that has no value yet but whose field type
    /// is known.
    pub fn parse_as(wire: WireType, input: &str) -> TagValue {
        let template = match wire {
            WireType::Ascii => TagValue::Text(String::new()),
            WireType::Undefined | WireType::SByte => TagValue::Bytes(Vec::new()),
            WireType::Byte | WireType::Short | WireType::Long | WireType::SShort | WireType::SLong => {
                TagValue::Integer(0)
            }
            WireType::Rational | WireType::SRational => TagValue::Rational(Rational::new(0, 1)),
            WireType::Float | WireType::Double => TagValue::Float(0.0),
        };
        Self::parse_like(Some(&template), input)
    }
}

/// One item becomes `one`, several become `many`. `None` when any item fails.
fn parse_list<T>(
    input: &str,
    parse: impl Fn(&str) -> Option<T>,
    one: fn(T) -> TagValue,
    many: fn(Vec<T>) -> TagValue,
) -> Option<TagValue> {
    let mut items = split_list(input).map(parse).collect::<Option<Vec<T>>>()?;
    match items.len() {
        0 => None,
        1 => items.pop().map(one),
        _ => Some(many(items)),
    }
}

fn split_list(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|s| s.trim_matches(|c| c == '(' || c == ')'))
        .filter(|s| !s.is_empty())
}

fn parse_hex(input: &str) -> Option<Vec<u8>> {
    let digits: String = input
        .trim()
        .strip_prefix("0x")?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if digits.is_empty() || digits.len() % 2 != 0 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| std::str::from_utf8(pair).ok().and_then(|p| u8::from_str_radix(p, 16).ok()))
        .collect()
}

/// Render a byte payload: readable ASCII as text, anything else as hex.
fn format_bytes(bytes: &[u8]) -> String {
    let payload = bytes.strip_prefix(ASCII_COMMENT_PREFIX).unwrap_or(bytes);
    let trimmed = match payload.iter().rposition(|b| *b != 0) {
        Some(last) => &payload[..=last],
        None => &payload[..0],
    };
    if !trimmed.is_empty() && trimmed.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return String::from_utf8_lossy(trimmed).into_owned();
    }
    let shown = &bytes[..bytes.len().min(MAX_DISPLAY_BYTES)];
    let hex: String = shown.iter().map(|b| format!("{b:02x}")).collect();
    if bytes.len() > MAX_DISPLAY_BYTES {
        format!("0x{hex}... ({} bytes)", bytes.len())
    } else {
        format!("0x{hex}")
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(s) => f.write_str(s),
            TagValue::Integer(n) => write!(f, "{n}"),
            TagValue::Integers(v) => f.write_str(&join(v)),
            TagValue::Rational(r) => write!(f, "{r}"),
            TagValue::Rationals(v) => f.write_str(&join(v)),
            TagValue::Float(x) => write!(f, "{x}"),
            TagValue::Floats(v) => f.write_str(&join(v)),
            TagValue::Bytes(b) => f.write_str(&format_bytes(b)),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Text(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Text(s)
    }
}

impl From<i64> for TagValue {
    fn from(n: i64) -> Self {
        TagValue::Integer(n)
    }
}

impl From<Rational> for TagValue {
    fn from(r: Rational) -> Self {
        TagValue::Rational(r)
    }
}

/// Insertion-ordered tag name → value map.
pub type TagMap = IndexMap<String, TagValue>;

/// The resolved metadata of one image.
///
/// Flat tags keep the order they were read in. The GPS sub-structure is held
/// apart under [`GPS_INFO_KEY`] so it never shows up in the flat listing.
/// Tags read from a file remember their field type so a save writes them
/// back unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataSet {
    pub(crate) tags: TagMap,
    pub(crate) gps: Option<TagMap>,
    pub(crate) wire: HashMap<String, WireType>,
    pub(crate) gps_wire: HashMap<String, WireType>,
}

impl MetadataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when there are neither flat tags nor GPS sub-tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.gps.as_ref().is_none_or(|gps| gps.is_empty())
    }

    /// Number of flat tags (GPS sub-tags excluded).
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Flat tags in read order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The nested GPS set, if the image carries one.
    pub fn gps(&self) -> Option<&TagMap> {
        self.gps.as_ref()
    }

    pub fn has_gps(&self) -> bool {
        self.gps.is_some()
    }

    /// Decimal coordinates derived from the GPS set. Recomputed on every call.
    pub fn coordinate(&self) -> GpsCoordinate {
        self.gps.as_ref().map(gps::coordinate).unwrap_or_default()
    }

    /// Field type `name` was read as, if it came from a file.
    pub fn wire_type(&self, name: &str) -> Option<WireType> {
        self.wire.get(name).copied()
    }

    pub fn gps_wire_type(&self, name: &str) -> Option<WireType> {
        self.gps_wire.get(name).copied()
    }

    pub(crate) fn insert_raw(&mut self, name: String, value: TagValue) {
        self.tags.insert(name, value);
    }

    pub(crate) fn insert_gps_raw(&mut self, name: String, value: TagValue) {
        self.gps.get_or_insert_with(TagMap::new).insert(name, value);
    }

    pub(crate) fn insert_read(&mut self, name: String, value: TagValue, wire: WireType) {
        self.wire.insert(name.clone(), wire);
        self.insert_raw(name, value);
    }

    pub(crate) fn insert_gps_read(&mut self, name: String, value: TagValue, wire: WireType) {
        self.gps_wire.insert(name.clone(), wire);
        self.insert_gps_raw(name, value);
    }
}
