use exif::{Context, Field, In, Value};
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use super::gps::GpsCoordinate;
use super::tags::{self, TAG_EXIF_OFFSET, TAG_GPS_INFO, TAG_INTEROP_OFFSET};
use super::value::{MetadataSet, Rational, TagValue, WireType};

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("cannot decode {path}: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A decoded image ready to be re-encoded.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    image: DynamicImage,
    format: Option<ImageFormat>,
}

impl ImageHandle {
    /// Decode the pixels at `path`, guessing the container from its content.
    pub fn open(path: &Path) -> Result<Self, ReadError> {
        if !path.exists() {
            return Err(ReadError::NotFound(path.to_path_buf()));
        }
        let io_err = |source| ReadError::Io { path: path.to_path_buf(), source };
        let reader = ImageReader::open(path).map_err(io_err)?.with_guessed_format().map_err(io_err)?;
        let format = reader.format();
        let image = reader.decode().map_err(|e| ReadError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { image, format })
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn color(&self) -> ColorType {
        self.image.color()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

/// Everything read from one image file.
#[derive(Debug)]
pub struct Metadata {
    pub handle: ImageHandle,
    pub tags: MetadataSet,
    pub gps: GpsCoordinate,
}

impl Metadata {
    /// `true` when the image carried no EXIF tags at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Open an image and resolve its EXIF tags.
///
/// A decodable image without EXIF yields an empty set rather than an error.
pub fn read(path: &Path) -> Result<Metadata, ReadError> {
    let handle = ImageHandle::open(path)?;
    let tags = if handle.format() == Some(ImageFormat::Jpeg) {
        read_tags(path)?
    } else {
        log::debug!("{} is not a JPEG; no EXIF read", path.display());
        MetadataSet::new()
    };
    let gps = tags.coordinate();
    log::debug!(
        "read {} tags from {} ({}x{}, {:?})",
        tags.len(),
        path.display(),
        handle.width(),
        handle.height(),
        handle.color()
    );
    Ok(Metadata { handle, tags, gps })
}

/// Extract the primary image's EXIF fields into a [`MetadataSet`].
pub fn read_tags(path: &Path) -> Result<MetadataSet, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::Io { path: path.to_path_buf(), source })?;
    let mut bufreader = BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut bufreader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => {
            log::debug!("No EXIF data found in {}", path.display());
            return Ok(MetadataSet::new());
        }
        Err(e) => {
            log::warn!("Ignoring unreadable EXIF in {}: {e}", path.display());
            return Ok(MetadataSet::new());
        }
    };

    let mut set = MetadataSet::new();
    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        collect_field(&mut set, field);
    }
    Ok(set)
}

fn collect_field(set: &mut MetadataSet, field: &Field) {
    let id = field.tag.number();
    let (Some(value), Some(wire)) = (convert(&field.value), wire_type(&field.value)) else {
        log::debug!("skipping tag {id:#06x} with unsupported value type");
        return;
    };
    match field.tag.context() {
        Context::Tiff if id == TAG_EXIF_OFFSET || id == TAG_GPS_INFO => {}
        Context::Exif if id == TAG_INTEROP_OFFSET => {}
        Context::Tiff if tags::is_xp(id) => {
            let value = match value {
                TagValue::Bytes(raw) => TagValue::Text(decode_utf16le(&raw)),
                other => other,
            };
            set.insert_read(tags::tag_name(id).into_owned(), value, wire);
        }
        Context::Tiff | Context::Exif => set.insert_read(tags::tag_name(id).into_owned(), value, wire),
        Context::Gps => set.insert_gps_read(tags::gps_tag_name(id).into_owned(), value, wire),
        _ => {}
    }
}

/// XP* payloads are NUL-terminated UTF-16LE.
fn decode_utf16le(raw: &[u8]) -> String {
    let units: Vec<u16> = raw.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect();
    String::from_utf16_lossy(&units).trim_end_matches('\0').to_string()
}

fn wire_type(value: &Value) -> Option<WireType> {
    let wire = match value {
        Value::Byte(_) => WireType::Byte,
        Value::Ascii(_) => WireType::Ascii,
        Value::Short(_) => WireType::Short,
        Value::Long(_) => WireType::Long,
        Value::Rational(_) => WireType::Rational,
        Value::SByte(_) => WireType::SByte,
        Value::Undefined(..) => WireType::Undefined,
        Value::SShort(_) => WireType::SShort,
        Value::SLong(_) => WireType::SLong,
        Value::SRational(_) => WireType::SRational,
        Value::Float(_) => WireType::Float,
        Value::Double(_) => WireType::Double,
        _ => return None,
    };
    Some(wire)
}

fn convert(value: &Value) -> Option<TagValue> {
    let converted = match value {
        Value::Byte(v) | Value::Undefined(v, _) => TagValue::Bytes(v.clone()),
        Value::SByte(v) => TagValue::Bytes(v.iter().map(|b| *b as u8).collect()),
        Value::Ascii(parts) => TagValue::Text(
            parts
                .iter()
                .map(|p| String::from_utf8_lossy(p).trim_end_matches('\0').to_string())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        Value::Short(v) => integers(v.iter().map(|n| i64::from(*n))),
        Value::Long(v) => integers(v.iter().map(|n| i64::from(*n))),
        Value::SShort(v) => integers(v.iter().map(|n| i64::from(*n))),
        Value::SLong(v) => integers(v.iter().map(|n| i64::from(*n))),
        Value::Rational(v) => rationals(v.iter().map(|r| Rational::new(r.num.into(), r.denom.into()))),
        Value::SRational(v) => rationals(v.iter().map(|r| Rational::new(r.num.into(), r.denom.into()))),
        Value::Float(v) => floats(v.iter().map(|x| f64::from(*x))),
        Value::Double(v) => floats(v.iter().copied()),
        _ => return None,
    };
    Some(converted)
}

fn integers(values: impl Iterator<Item = i64>) -> TagValue {
    let mut v: Vec<i64> = values.collect();
    if v.len() == 1 { TagValue::Integer(v.remove(0)) } else { TagValue::Integers(v) }
}

fn rationals(values: impl Iterator<Item = Rational>) -> TagValue {
    let mut v: Vec<Rational> = values.collect();
    if v.len() == 1 { TagValue::Rational(v.remove(0)) } else { TagValue::Rationals(v) }
}

fn floats(values: impl Iterator<Item = f64>) -> TagValue {
    let mut v: Vec<f64> = values.collect();
    if v.len() == 1 { TagValue::Float(v.remove(0)) } else { TagValue::Floats(v) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read(&dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, ReadError::NotFound(_)));
    }

    #[test]
    fn garbage_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(matches!(read(&path), Err(ReadError::UnsupportedFormat { .. })));
    }

    #[test]
    fn jpeg_without_exif_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.jpg");
        RgbImage::from_pixel(8, 6, image::Rgb([10, 20, 30])).save(&path).unwrap();

        let meta = read(&path).unwrap();
        assert!(meta.is_empty());
        assert_eq!(meta.gps, GpsCoordinate::default());
        assert_eq!(meta.handle.width(), 8);
        assert_eq!(meta.handle.height(), 6);
        assert_eq!(meta.handle.format(), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn png_input_reads_without_tags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(4, 4, image::Luma([128])).save(&path).unwrap();

        let meta = read(&path).unwrap();
        assert!(meta.is_empty());
        assert_eq!(meta.handle.color(), ColorType::L8);
    }

    #[test]
    fn value_conversion() {
        assert_eq!(convert(&Value::Short(vec![1])), Some(TagValue::Integer(1)));
        assert_eq!(convert(&Value::Short(vec![8, 8, 8])), Some(TagValue::Integers(vec![8, 8, 8])));
        assert_eq!(
            convert(&Value::Ascii(vec![b"Canon\0".to_vec()])),
            Some(TagValue::Text("Canon".into()))
        );
        assert_eq!(
            convert(&Value::Undefined(b"0230".to_vec(), 0)),
            Some(TagValue::Bytes(b"0230".to_vec()))
        );
        assert_eq!(
            convert(&Value::SRational(vec![exif::SRational { num: -1, denom: 3 }])),
            Some(TagValue::Rational(Rational::new(-1, 3)))
        );
        assert_eq!(convert(&Value::Double(vec![1.5])), Some(TagValue::Float(1.5)));
        assert_eq!(convert(&Value::Float(vec![0.5, 2.0])), Some(TagValue::Floats(vec![0.5, 2.0])));
        assert_eq!(convert(&Value::Unknown(0, 0, 0)), None);
    }

    #[test]
    fn wire_types_follow_the_value() {
        assert_eq!(wire_type(&Value::Long(vec![1])), Some(WireType::Long));
        assert_eq!(wire_type(&Value::SByte(vec![-1])), Some(WireType::SByte));
        assert_eq!(wire_type(&Value::Float(vec![1.0])), Some(WireType::Float));
        assert_eq!(wire_type(&Value::Unknown(0, 0, 0)), None);
    }

    #[test]
    fn xp_text_is_utf16le() {
        assert_eq!(decode_utf16le(&[0x48, 0, 0x69, 0, 0, 0]), "Hi");
        assert_eq!(decode_utf16le(&[0xAC, 0x20, 0, 0]), "€");
        assert_eq!(decode_utf16le(&[]), "");
    }
}
