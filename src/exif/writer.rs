use exif::experimental::Writer;
use exif::{Context, Field, In, Tag, Value};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use super::reader::ImageHandle;
use super::tags::{self, Ifd};
use super::value::{GPS_INFO_KEY, MetadataSet, Rational, TagValue, WireType};

// GPS tags whose byte payload is UNDEFINED; the rest are BYTE.
const TAG_GPS_PROCESSING_METHOD: u16 = 0x001B;
const TAG_GPS_AREA_INFORMATION: u16 = 0x001C;

const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const EXIF_PREFIX: &[u8] = b"Exif\0\0";

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to encode pixel data: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why an EXIF block could not be built. Never escapes [`write`]: it only
/// switches the save to the pixels-only fallback.
#[derive(Debug, thiserror::Error)]
pub(crate) enum EncodeError {
    #[error("`{0}` contains a NUL byte")]
    Nul(String),
    #[error("`{0}` has no values")]
    Empty(String),
    #[error("`{0}` is out of range for any EXIF integer type")]
    Range(String),
    #[error("EXIF encoder rejected the tags: {0}")]
    Exif(#[from] exif::Error),
    #[error("cannot embed EXIF: {0}")]
    Embed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { jpeg_quality: 95 }
    }
}

/// Outcome of a save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    /// An EXIF segment was embedded in the output.
    pub metadata_written: bool,
    /// Names of the tags that went into the EXIF block.
    pub written: Vec<String>,
    /// Tags left out: unknown names and structural tags.
    pub skipped: Vec<String>,
    /// Set when the EXIF block had to be dropped.
    pub fallback_reason: Option<String>,
}

/// `photo.JPG` → `photo_modified.JPG`; any other extension → `<stem>_modified.jpg`.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .filter(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or_else(|| "jpg".to_string());
    input.with_file_name(format!("{stem}_modified.{ext}"))
}

/// Save `handle` as a JPEG next to `input`, carrying `metadata` as EXIF.
///
/// The handle is consumed; saving again means re-opening the image. If the
/// tag set cannot be encoded the pixels are still saved, without EXIF, and
/// the report says why.
pub fn write(
    input: &Path,
    handle: ImageHandle,
    metadata: &MetadataSet,
    options: &WriteOptions,
) -> Result<WriteReport, WriteError> {
    let out = output_path(input);
    let pixels = encode_pixels(handle.into_image(), options.jpeg_quality)?;

    let mut report = WriteReport { path: out.clone(), ..Default::default() };
    let plan = plan_fields(metadata, &mut report);

    let bytes = if plan.is_empty() {
        pixels
    } else {
        match build_tiff(&plan).and_then(|tiff| embed(&pixels, tiff)) {
            Ok(bytes) => {
                report.metadata_written = true;
                report.written = plan.iter().map(|p| p.name.clone()).collect();
                bytes
            }
            Err(e) => {
                log::warn!("Saving {} without EXIF: {e}", out.display());
                report.fallback_reason = Some(e.to_string());
                pixels
            }
        }
    };

    std::fs::write(&out, &bytes).map_err(|source| WriteError::Io { path: out.clone(), source })?;
    log::info!("Saved {}", out.display());
    Ok(report)
}

/// Re-encode pixels as baseline JPEG, converting to 8-bit RGB first.
fn encode_pixels(image: DynamicImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let rgb = match image {
        DynamicImage::ImageRgb8(_) => image,
        other => {
            log::debug!("normalizing {:?} to Rgb8", other.color());
            DynamicImage::ImageRgb8(other.to_rgb8())
        }
    };
    let mut buf = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)))?;
    Ok(buf)
}

struct Planned<'a> {
    name: String,
    tag: Tag,
    value: &'a TagValue,
    /// Field type read from the file, else the standard one.
    wire: Option<WireType>,
}

/// Resolve every tag to its EXIF id, recording what gets skipped.
fn plan_fields<'a>(metadata: &'a MetadataSet, report: &mut WriteReport) -> Vec<Planned<'a>> {
    let mut plan = Vec::new();
    for (name, value) in metadata.iter() {
        let Some(id) = tags::tag_id(name) else {
            log::debug!("skipping custom tag {name}");
            report.skipped.push(name.to_string());
            continue;
        };
        if tags::is_structural(id) {
            log::debug!("skipping structural tag {name}");
            report.skipped.push(name.to_string());
            continue;
        }
        let context = match tags::tag_ifd(id) {
            Ifd::Primary => Context::Tiff,
            Ifd::Exif => Context::Exif,
        };
        plan.push(Planned {
            name: name.to_string(),
            tag: Tag(context, id),
            value,
            wire: metadata.wire_type(name).or_else(|| tags::standard_type(id)),
        });
    }
    for (name, value) in metadata.gps().into_iter().flatten() {
        match tags::gps_tag_id(name) {
            Some(id) => plan.push(Planned {
                name: format!("{GPS_INFO_KEY}.{name}"),
                tag: Tag(Context::Gps, id),
                value,
                wire: metadata.gps_wire_type(name).or_else(|| tags::gps_standard_type(id)),
            }),
            None => {
                log::debug!("skipping unknown GPS tag {name}");
                report.skipped.push(format!("{GPS_INFO_KEY}.{name}"));
            }
        }
    }
    plan
}

/// Build a little-endian TIFF block holding the planned fields.
fn build_tiff(plan: &[Planned<'_>]) -> Result<Vec<u8>, EncodeError> {
    let fields = plan
        .iter()
        .map(|p| {
            Ok(Field {
                tag: p.tag,
                ifd_num: In::PRIMARY,
                value: to_exif_value(p)?,
            })
        })
        .collect::<Result<Vec<_>, EncodeError>>()?;

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true)?;
    Ok(buf.into_inner())
}

fn to_exif_value(p: &Planned<'_>) -> Result<Value, EncodeError> {
    if let TagValue::Text(s) = p.value {
        if s.contains('\0') {
            return Err(EncodeError::Nul(p.name.clone()));
        }
        if matches!(p.tag.context(), Context::Tiff) && tags::is_xp(p.tag.number()) {
            return Ok(Value::Byte(encode_utf16le(s)));
        }
    }
    if let Some(value) = p.wire.and_then(|wire| encode_as(wire, p.value)) {
        return Ok(value);
    }
    infer_value(&p.name, p.tag, p.value)
}

/// NUL-terminated UTF-16LE, as Windows stores XP* text.
fn encode_utf16le(s: &str) -> Vec<u8> {
    let mut bytes: Vec<u8> = s.encode_utf16().flat_map(|c| c.to_le_bytes()).collect();
    bytes.extend_from_slice(&[0, 0]);
    bytes
}

/// Encode `value` as `wire`. `None` when the value does not fit that type.
fn encode_as(wire: WireType, value: &TagValue) -> Option<Value> {
    let v = match (wire, value) {
        (WireType::Ascii, TagValue::Text(s)) => Value::Ascii(vec![s.as_bytes().to_vec()]),
        (WireType::Byte, TagValue::Bytes(b)) => Value::Byte(b.clone()),
        (WireType::Undefined, TagValue::Bytes(b)) => Value::Undefined(b.clone(), 0),
        (WireType::SByte, TagValue::Bytes(b)) => Value::SByte(b.iter().map(|x| *x as i8).collect()),
        (WireType::Byte, _) => Value::Byte(narrow(int_list(value)?)?),
        (WireType::SByte, _) => Value::SByte(narrow(int_list(value)?)?),
        (WireType::Short, _) => Value::Short(narrow(int_list(value)?)?),
        (WireType::Long, _) => Value::Long(narrow(int_list(value)?)?),
        (WireType::SShort, _) => Value::SShort(narrow(int_list(value)?)?),
        (WireType::SLong, _) => Value::SLong(narrow(int_list(value)?)?),
        (WireType::Rational, _) => Value::Rational(
            rational_list(value)?
                .iter()
                .map(|r| {
                    Some(exif::Rational {
                        num: u32::try_from(r.num).ok()?,
                        denom: u32::try_from(r.den).ok()?,
                    })
                })
                .collect::<Option<_>>()?,
        ),
        (WireType::SRational, _) => Value::SRational(
            rational_list(value)?
                .iter()
                .map(|r| {
                    Some(exif::SRational {
                        num: i32::try_from(r.num).ok()?,
                        denom: i32::try_from(r.den).ok()?,
                    })
                })
                .collect::<Option<_>>()?,
        ),
        (WireType::Float, _) => Value::Float(float_list(value)?.iter().map(|x| *x as f32).collect()),
        (WireType::Double, _) => Value::Double(float_list(value)?.to_vec()),
        _ => return None,
    };
    Some(v)
}

fn narrow<T: TryFrom<i64>>(values: &[i64]) -> Option<Vec<T>> {
    values.iter().map(|n| T::try_from(*n).ok()).collect()
}

fn int_list(value: &TagValue) -> Option<&[i64]> {
    match value {
        TagValue::Integer(n) => Some(std::slice::from_ref(n)),
        TagValue::Integers(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

fn rational_list(value: &TagValue) -> Option<&[Rational]> {
    match value {
        TagValue::Rational(r) => Some(std::slice::from_ref(r)),
        TagValue::Rationals(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

fn float_list(value: &TagValue) -> Option<&[f64]> {
    match value {
        TagValue::Float(x) => Some(std::slice::from_ref(x)),
        TagValue::Floats(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

/// Type for a value with no known field type, chosen from the value itself.
fn infer_value(name: &str, tag: Tag, value: &TagValue) -> Result<Value, EncodeError> {
    let v = match value {
        TagValue::Text(s) => Value::Ascii(vec![s.as_bytes().to_vec()]),
        TagValue::Integer(n) => integer_value(name, std::slice::from_ref(n))?,
        TagValue::Integers(v) => integer_value(name, v)?,
        TagValue::Rational(r) => rational_value(name, std::slice::from_ref(r))?,
        TagValue::Rationals(v) => rational_value(name, v)?,
        TagValue::Float(x) => Value::Double(vec![*x]),
        TagValue::Floats(v) if v.is_empty() => return Err(EncodeError::Empty(name.to_string())),
        TagValue::Floats(v) => Value::Double(v.clone()),
        TagValue::Bytes(b) => {
            let (context, id) = (tag.context(), tag.number());
            let is_byte = match context {
                Context::Gps => id != TAG_GPS_PROCESSING_METHOD && id != TAG_GPS_AREA_INFORMATION,
                _ => tags::is_xp(id),
            };
            if is_byte { Value::Byte(b.clone()) } else { Value::Undefined(b.clone(), 0) }
        }
    };
    Ok(v)
}

/// Pick the narrowest EXIF integer type that holds every value.
fn integer_value(name: &str, values: &[i64]) -> Result<Value, EncodeError> {
    if values.is_empty() {
        return Err(EncodeError::Empty(name.to_string()));
    }
    if let Some(v) = narrow::<u16>(values) {
        return Ok(Value::Short(v));
    }
    if let Some(v) = narrow::<u32>(values) {
        return Ok(Value::Long(v));
    }
    narrow::<i32>(values).map(Value::SLong).ok_or_else(|| EncodeError::Range(name.to_string()))
}

/// RATIONAL when every part is non-negative, SRATIONAL otherwise.
fn rational_value(name: &str, values: &[Rational]) -> Result<Value, EncodeError> {
    if values.is_empty() {
        return Err(EncodeError::Empty(name.to_string()));
    }
    if let Some(v) = encode_as(WireType::Rational, &TagValue::Rationals(values.to_vec())) {
        return Ok(v);
    }
    encode_as(WireType::SRational, &TagValue::Rationals(values.to_vec()))
        .ok_or_else(|| EncodeError::Range(name.to_string()))
}

/// Splice the TIFF block into the JPEG as an APP1 segment right after APP0.
fn embed(jpeg_bytes: &[u8], tiff: Vec<u8>) -> Result<Vec<u8>, EncodeError> {
    let mut jpeg =
        Jpeg::from_bytes(Bytes::copy_from_slice(jpeg_bytes)).map_err(|e| EncodeError::Embed(e.to_string()))?;
    jpeg.set_exif(Some(Bytes::from(tiff)));

    let target = match jpeg.segments().first() {
        Some(s) if s.marker() == APP0 => 1,
        _ => 0,
    };
    if let Some(pos) = find_exif_segment_pos(&jpeg) {
        if pos > target {
            let segments = jpeg.segments_mut();
            let seg = segments.remove(pos);
            segments.insert(target, seg);
        }
    }
    Ok(jpeg.encoder().bytes().to_vec())
}

fn find_exif_segment_pos(jpeg: &Jpeg) -> Option<usize> {
    jpeg.segments()
        .iter()
        .position(|s| s.marker() == APP1 && s.contents().starts_with(EXIF_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::reader::{self, ReadError};
    use image::{GrayAlphaImage, RgbImage};
    use tempfile::TempDir;

    fn sample_jpeg(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        RgbImage::from_fn(16, 12, |x, y| image::Rgb([(x * 10) as u8, (y * 10) as u8, 90])).save(&path).unwrap();
        path
    }

    fn r(num: i64, den: i64) -> Rational {
        Rational::new(num, den)
    }

    #[test]
    fn output_path_rules() {
        assert_eq!(output_path(Path::new("/a/photo.jpg")), PathBuf::from("/a/photo_modified.jpg"));
        assert_eq!(output_path(Path::new("/a/photo.JPEG")), PathBuf::from("/a/photo_modified.JPEG"));
        assert_eq!(output_path(Path::new("/a/shot.png")), PathBuf::from("/a/shot_modified.jpg"));
        assert_eq!(output_path(Path::new("noext")), PathBuf::from("noext_modified.jpg"));
    }

    #[test]
    fn round_trip_keeps_values() {
        let dir = TempDir::new().unwrap();
        let path = sample_jpeg(&dir, "in.jpg");
        let meta = reader::read(&path).unwrap();

        let mut set = meta.tags;
        set.set_tag("Make", "Canon".into()).unwrap();
        set.set_tag("Orientation", TagValue::Integer(1)).unwrap();
        set.set_tag("ExposureTime", r(1, 250).into()).unwrap();
        set.set_tag("ExifVersion", TagValue::Bytes(b"0230".to_vec())).unwrap();

        let report = write(&path, meta.handle, &set, &WriteOptions::default()).unwrap();
        assert!(report.metadata_written);
        assert!(report.skipped.is_empty());
        assert_eq!(report.path, dir.path().join("in_modified.jpg"));

        let back = reader::read(&report.path).unwrap();
        for (name, value) in back.tags.iter() {
            assert_eq!(set.get(name), Some(value), "{name}");
        }
        assert_eq!(back.tags.get("Make"), Some(&TagValue::Text("Canon".into())));
        assert_eq!(back.tags.get("ExposureTime"), Some(&TagValue::Rational(r(1, 250))));
        assert_eq!(back.tags.get("ExifVersion"), Some(&TagValue::Bytes(b"0230".to_vec())));
    }

    #[test]
    fn gps_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = sample_jpeg(&dir, "gps.jpg");
        let meta = reader::read(&path).unwrap();

        let mut set = meta.tags;
        set.set_gps_tag("GPSLatitudeRef", "N".into()).unwrap();
        set.set_gps_tag("GPSLatitude", TagValue::Rationals(vec![r(40, 1), r(26, 1), r(463, 10)])).unwrap();
        set.set_gps_tag("GPSLongitudeRef", "W".into()).unwrap();
        set.set_gps_tag("GPSLongitude", TagValue::Rationals(vec![r(79, 1), r(56, 1), r(552, 10)])).unwrap();

        let report = write(&path, meta.handle, &set, &WriteOptions::default()).unwrap();
        assert!(report.metadata_written);

        let back = reader::read(&report.path).unwrap();
        assert!(back.tags.has_gps());
        assert!(!back.tags.contains(GPS_INFO_KEY));
        let lat = back.gps.latitude.unwrap();
        let lon = back.gps.longitude.unwrap();
        assert!((lat - 40.4462).abs() < 1e-4);
        assert!((lon + 79.9487).abs() < 1e-4);
    }

    #[test]
    fn removed_gps_stays_removed() {
        let dir = TempDir::new().unwrap();
        let path = sample_jpeg(&dir, "strip.jpg");
        let meta = reader::read(&path).unwrap();
        let mut set = meta.tags;
        set.set_tag("Make", "Nikon".into()).unwrap();
        set.set_latitude(12.5).unwrap();
        set.set_longitude(-3.25).unwrap();
        let first = write(&path, meta.handle, &set, &WriteOptions::default()).unwrap();

        let meta = reader::read(&first.path).unwrap();
        assert!(meta.gps.latitude.is_some());
        let mut set = meta.tags;
        set.remove_gps_info();
        let second = write(&first.path, meta.handle, &set, &WriteOptions::default()).unwrap();

        let back = reader::read(&second.path).unwrap();
        assert!(!back.tags.has_gps());
        assert_eq!(back.gps, crate::exif::GpsCoordinate::default());
        assert_eq!(back.tags.get("Make"), Some(&TagValue::Text("Nikon".into())));
    }

    #[test]
    fn custom_and_structural_tags_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = sample_jpeg(&dir, "custom.jpg");
        let meta = reader::read(&path).unwrap();
        let mut set = meta.tags;
        set.set_tag("Artist", "me".into()).unwrap();
        set.set_tag("MyCustomTag", "hello".into()).unwrap();
        set.set_tag("ImageWidth", TagValue::Integer(9999)).unwrap();

        let report = write(&path, meta.handle, &set, &WriteOptions::default()).unwrap();
        assert!(report.metadata_written);
        assert_eq!(report.written, ["Artist"]);
        assert_eq!(report.skipped, ["MyCustomTag", "ImageWidth"]);

        let back = reader::read(&report.path).unwrap();
        assert!(back.tags.get("MyCustomTag").is_none());
        assert_eq!(back.handle.width(), 16);
    }

    #[test]
    fn bad_value_falls_back_to_pixels_only() {
        let dir = TempDir::new().unwrap();
        let path = sample_jpeg(&dir, "nul.jpg");
        let meta = reader::read(&path).unwrap();
        let mut set = meta.tags;
        set.set_tag("Artist", "bad\0value".into()).unwrap();

        let report = write(&path, meta.handle, &set, &WriteOptions::default()).unwrap();
        assert!(!report.metadata_written);
        assert!(report.fallback_reason.is_some());

        let back = reader::read(&report.path).unwrap();
        assert!(back.is_empty());
        assert_eq!(back.handle.width(), 16);
    }

    #[test]
    fn out_of_range_integer_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = sample_jpeg(&dir, "big.jpg");
        let meta = reader::read(&path).unwrap();
        let mut set = meta.tags;
        set.set_tag("Orientation", TagValue::Integer(i64::MAX)).unwrap();

        let report = write(&path, meta.handle, &set, &WriteOptions::default()).unwrap();
        assert!(!report.metadata_written);
        assert!(report.path.exists());
    }

    #[test]
    fn grayscale_alpha_is_normalized_to_rgb() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ga.png");
        GrayAlphaImage::from_pixel(5, 5, image::LumaA([100, 200])).save(&path).unwrap();
        let meta = reader::read(&path).unwrap();

        let report = write(&path, meta.handle, &meta.tags, &WriteOptions::default()).unwrap();
        assert_eq!(report.path, dir.path().join("ga_modified.jpg"));
        let back = reader::read(&report.path).unwrap();
        assert_eq!(back.handle.color(), image::ColorType::Rgb8);
        assert_eq!(back.handle.format(), Some(image::ImageFormat::Jpeg));
    }

    #[test]
    fn field_types_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let path = sample_jpeg(&dir, "wire.jpg");
        let meta = reader::read(&path).unwrap();
        let mut set = meta.tags;
        set.set_tag("ExposureBiasValue", r(0, 1).into()).unwrap();
        set.insert_read("Orientation".into(), TagValue::Integer(1), WireType::Long);
        set.insert_read("Gamma".into(), TagValue::Floats(vec![0.5, 2.0]), WireType::Float);

        let first = write(&path, meta.handle, &set, &WriteOptions::default()).unwrap();
        assert!(first.metadata_written);
        let back = reader::read(&first.path).unwrap();
        assert_eq!(back.tags.wire_type("ExposureBiasValue"), Some(WireType::SRational));
        assert_eq!(back.tags.wire_type("Orientation"), Some(WireType::Long));
        assert_eq!(back.tags.wire_type("Gamma"), Some(WireType::Float));
        assert_eq!(back.tags.get("Gamma"), Some(&TagValue::Floats(vec![0.5, 2.0])));

        // A second save writes back what was read.
        let second = write(&first.path, back.handle, &back.tags, &WriteOptions::default()).unwrap();
        let again = reader::read(&second.path).unwrap();
        assert_eq!(again.tags.wire_type("Orientation"), Some(WireType::Long));
        assert_eq!(again.tags.wire_type("ExposureBiasValue"), Some(WireType::SRational));
    }

    #[test]
    fn xp_tags_are_utf16le() {
        let dir = TempDir::new().unwrap();
        let path = sample_jpeg(&dir, "xp.jpg");
        let meta = reader::read(&path).unwrap();
        let mut set = meta.tags;
        set.set_tag("XPTitle", "Hi €".into()).unwrap();

        let report = write(&path, meta.handle, &set, &WriteOptions::default()).unwrap();
        let back = reader::read(&report.path).unwrap();
        assert_eq!(back.tags.get("XPTitle"), Some(&TagValue::Text("Hi €".into())));
        assert_eq!(back.tags.wire_type("XPTitle"), Some(WireType::Byte));
        assert_eq!(encode_utf16le("Hi"), [0x48, 0, 0x69, 0, 0, 0]);
    }

    #[test]
    fn encode_as_rejects_values_that_do_not_fit() {
        assert!(matches!(encode_as(WireType::Short, &TagValue::Integer(70000)), None));
        assert!(matches!(encode_as(WireType::Long, &TagValue::Integer(70000)), Some(Value::Long(v)) if v == [70000]));
        assert!(matches!(encode_as(WireType::SRational, &r(1, 3).into()), Some(Value::SRational(_))));
        assert!(matches!(encode_as(WireType::Rational, &r(-1, 3).into()), None));
        assert!(matches!(encode_as(WireType::Ascii, &TagValue::Integer(1)), None));
        assert!(matches!(encode_as(WireType::Byte, &TagValue::Integers(vec![2, 2, 0, 0])), Some(Value::Byte(v)) if v == [2, 2, 0, 0]));
        assert!(matches!(encode_as(WireType::Float, &TagValue::Float(1.5)), Some(Value::Float(v)) if v == [1.5f32]));
    }

    #[test]
    fn integer_width_follows_range() {
        assert!(matches!(integer_value("a", &[1, 65535]).unwrap(), Value::Short(v) if v == [1, 65535]));
        assert!(matches!(integer_value("a", &[65536]).unwrap(), Value::Long(v) if v == [65536]));
        assert!(matches!(integer_value("a", &[-1]).unwrap(), Value::SLong(v) if v == [-1]));
        assert!(integer_value("a", &[]).is_err());
    }

    #[test]
    fn rational_sign_picks_type() {
        assert!(matches!(rational_value("a", &[r(1, 2)]).unwrap(), Value::Rational(_)));
        assert!(matches!(rational_value("a", &[r(-1, 2)]).unwrap(), Value::SRational(_)));
        assert!(rational_value("a", &[r(i64::MAX, 1)]).is_err());
    }

    #[test]
    fn missing_input_still_reports_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(reader::read(&dir.path().join("x.jpg")), Err(ReadError::NotFound(_))));
    }
}
