//! Static name tables for EXIF and GPS tag identifiers.
//!
//! Names follow the conventional EXIF dictionary spelling (`ExifOffset`,
//! `ISOSpeedRatings`, `GPSLatitude`, ...). Lookups by name are
//! case-insensitive so user input like `make` resolves to `Make`.

use std::borrow::Cow;

use super::value::WireType;

/// The directory a standard tag is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ifd {
    /// IFD0: image-level tags (Make, Model, Orientation, ...).
    Primary,
    /// The Exif sub-IFD: capture settings (ExposureTime, FNumber, ...).
    Exif,
}

/// Pointer to the Exif sub-IFD (stored in IFD0).
pub const TAG_EXIF_OFFSET: u16 = 0x8769;
/// Pointer to the GPS sub-IFD (stored in IFD0).
pub const TAG_GPS_INFO: u16 = 0x8825;
/// Pointer to the interoperability sub-IFD (stored in the Exif IFD).
pub const TAG_INTEROP_OFFSET: u16 = 0xA005;

// Windows XP* tags: UTF-16LE text stored as BYTE.
const TAG_XP_FIRST: u16 = 0x9C9B;
const TAG_XP_LAST: u16 = 0x9C9F;

const EXIF_TAGS: &[(u16, &str, Ifd)] = &[
    (0x00FE, "NewSubfileType", Ifd::Primary),
    (0x00FF, "SubfileType", Ifd::Primary),
    (0x0100, "ImageWidth", Ifd::Primary),
    (0x0101, "ImageLength", Ifd::Primary),
    (0x0102, "BitsPerSample", Ifd::Primary),
    (0x0103, "Compression", Ifd::Primary),
    (0x0106, "PhotometricInterpretation", Ifd::Primary),
    (0x010D, "DocumentName", Ifd::Primary),
    (0x010E, "ImageDescription", Ifd::Primary),
    (0x010F, "Make", Ifd::Primary),
    (0x0110, "Model", Ifd::Primary),
    (0x0111, "StripOffsets", Ifd::Primary),
    (0x0112, "Orientation", Ifd::Primary),
    (0x0115, "SamplesPerPixel", Ifd::Primary),
    (0x0116, "RowsPerStrip", Ifd::Primary),
    (0x0117, "StripByteCounts", Ifd::Primary),
    (0x011A, "XResolution", Ifd::Primary),
    (0x011B, "YResolution", Ifd::Primary),
    (0x011C, "PlanarConfiguration", Ifd::Primary),
    (0x0128, "ResolutionUnit", Ifd::Primary),
    (0x012D, "TransferFunction", Ifd::Primary),
    (0x0131, "Software", Ifd::Primary),
    (0x0132, "DateTime", Ifd::Primary),
    (0x013B, "Artist", Ifd::Primary),
    (0x013C, "HostComputer", Ifd::Primary),
    (0x013E, "WhitePoint", Ifd::Primary),
    (0x013F, "PrimaryChromaticities", Ifd::Primary),
    (0x0142, "TileWidth", Ifd::Primary),
    (0x0143, "TileLength", Ifd::Primary),
    (0x0144, "TileOffsets", Ifd::Primary),
    (0x0145, "TileByteCounts", Ifd::Primary),
    (0x014A, "SubIFDs", Ifd::Primary),
    (0x0201, "JpegIFOffset", Ifd::Primary),
    (0x0202, "JpegIFByteCount", Ifd::Primary),
    (0x0211, "YCbCrCoefficients", Ifd::Primary),
    (0x0212, "YCbCrSubSampling", Ifd::Primary),
    (0x0213, "YCbCrPositioning", Ifd::Primary),
    (0x0214, "ReferenceBlackWhite", Ifd::Primary),
    (0x02BC, "XMLPacket", Ifd::Primary),
    (0x4746, "Rating", Ifd::Primary),
    (0x4749, "RatingPercent", Ifd::Primary),
    (0x8298, "Copyright", Ifd::Primary),
    (TAG_EXIF_OFFSET, "ExifOffset", Ifd::Primary),
    (TAG_GPS_INFO, "GPSInfo", Ifd::Primary),
    (0x9C9B, "XPTitle", Ifd::Primary),
    (0x9C9C, "XPComment", Ifd::Primary),
    (0x9C9D, "XPAuthor", Ifd::Primary),
    (0x9C9E, "XPKeywords", Ifd::Primary),
    (0x9C9F, "XPSubject", Ifd::Primary),
    (0xC4A5, "PrintImageMatching", Ifd::Primary),
    (0x829A, "ExposureTime", Ifd::Exif),
    (0x829D, "FNumber", Ifd::Exif),
    (0x8822, "ExposureProgram", Ifd::Exif),
    (0x8824, "SpectralSensitivity", Ifd::Exif),
    (0x8827, "ISOSpeedRatings", Ifd::Exif),
    (0x8828, "OECF", Ifd::Exif),
    (0x8830, "SensitivityType", Ifd::Exif),
    (0x8831, "StandardOutputSensitivity", Ifd::Exif),
    (0x8832, "RecommendedExposureIndex", Ifd::Exif),
    (0x9000, "ExifVersion", Ifd::Exif),
    (0x9003, "DateTimeOriginal", Ifd::Exif),
    (0x9004, "DateTimeDigitized", Ifd::Exif),
    (0x9010, "OffsetTime", Ifd::Exif),
    (0x9011, "OffsetTimeOriginal", Ifd::Exif),
    (0x9012, "OffsetTimeDigitized", Ifd::Exif),
    (0x9101, "ComponentsConfiguration", Ifd::Exif),
    (0x9102, "CompressedBitsPerPixel", Ifd::Exif),
    (0x9201, "ShutterSpeedValue", Ifd::Exif),
    (0x9202, "ApertureValue", Ifd::Exif),
    (0x9203, "BrightnessValue", Ifd::Exif),
    (0x9204, "ExposureBiasValue", Ifd::Exif),
    (0x9205, "MaxApertureValue", Ifd::Exif),
    (0x9206, "SubjectDistance", Ifd::Exif),
    (0x9207, "MeteringMode", Ifd::Exif),
    (0x9208, "LightSource", Ifd::Exif),
    (0x9209, "Flash", Ifd::Exif),
    (0x920A, "FocalLength", Ifd::Exif),
    (0x9214, "SubjectArea", Ifd::Exif),
    (0x927C, "MakerNote", Ifd::Exif),
    (0x9286, "UserComment", Ifd::Exif),
    (0x9290, "SubsecTime", Ifd::Exif),
    (0x9291, "SubsecTimeOriginal", Ifd::Exif),
    (0x9292, "SubsecTimeDigitized", Ifd::Exif),
    (0xA000, "FlashPixVersion", Ifd::Exif),
    (0xA001, "ColorSpace", Ifd::Exif),
    (0xA002, "ExifImageWidth", Ifd::Exif),
    (0xA003, "ExifImageHeight", Ifd::Exif),
    (0xA004, "RelatedSoundFile", Ifd::Exif),
    (TAG_INTEROP_OFFSET, "ExifInteroperabilityOffset", Ifd::Exif),
    (0xA20B, "FlashEnergy", Ifd::Exif),
    (0xA20E, "FocalPlaneXResolution", Ifd::Exif),
    (0xA20F, "FocalPlaneYResolution", Ifd::Exif),
    (0xA210, "FocalPlaneResolutionUnit", Ifd::Exif),
    (0xA214, "SubjectLocation", Ifd::Exif),
    (0xA215, "ExposureIndex", Ifd::Exif),
    (0xA217, "SensingMethod", Ifd::Exif),
    (0xA300, "FileSource", Ifd::Exif),
    (0xA301, "SceneType", Ifd::Exif),
    (0xA302, "CFAPattern", Ifd::Exif),
    (0xA401, "CustomRendered", Ifd::Exif),
    (0xA402, "ExposureMode", Ifd::Exif),
    (0xA403, "WhiteBalance", Ifd::Exif),
    (0xA404, "DigitalZoomRatio", Ifd::Exif),
    (0xA405, "FocalLengthIn35mmFilm", Ifd::Exif),
    (0xA406, "SceneCaptureType", Ifd::Exif),
    (0xA407, "GainControl", Ifd::Exif),
    (0xA408, "Contrast", Ifd::Exif),
    (0xA409, "Saturation", Ifd::Exif),
    (0xA40A, "Sharpness", Ifd::Exif),
    (0xA40B, "DeviceSettingDescription", Ifd::Exif),
    (0xA40C, "SubjectDistanceRange", Ifd::Exif),
    (0xA420, "ImageUniqueID", Ifd::Exif),
    (0xA430, "CameraOwnerName", Ifd::Exif),
    (0xA431, "BodySerialNumber", Ifd::Exif),
    (0xA432, "LensSpecification", Ifd::Exif),
    (0xA433, "LensMake", Ifd::Exif),
    (0xA434, "LensModel", Ifd::Exif),
    (0xA435, "LensSerialNumber", Ifd::Exif),
    (0xA500, "Gamma", Ifd::Exif),
];

const GPS_TAGS: &[(u16, &str)] = &[
    (0x0000, "GPSVersionID"),
    (0x0001, "GPSLatitudeRef"),
    (0x0002, "GPSLatitude"),
    (0x0003, "GPSLongitudeRef"),
    (0x0004, "GPSLongitude"),
    (0x0005, "GPSAltitudeRef"),
    (0x0006, "GPSAltitude"),
    (0x0007, "GPSTimeStamp"),
    (0x0008, "GPSSatellites"),
    (0x0009, "GPSStatus"),
    (0x000A, "GPSMeasureMode"),
    (0x000B, "GPSDOP"),
    (0x000C, "GPSSpeedRef"),
    (0x000D, "GPSSpeed"),
    (0x000E, "GPSTrackRef"),
    (0x000F, "GPSTrack"),
    (0x0010, "GPSImgDirectionRef"),
    (0x0011, "GPSImgDirection"),
    (0x0012, "GPSMapDatum"),
    (0x0013, "GPSDestLatitudeRef"),
    (0x0014, "GPSDestLatitude"),
    (0x0015, "GPSDestLongitudeRef"),
    (0x0016, "GPSDestLongitude"),
    (0x0017, "GPSDestBearingRef"),
    (0x0018, "GPSDestBearing"),
    (0x0019, "GPSDestDistanceRef"),
    (0x001A, "GPSDestDistance"),
    (0x001B, "GPSProcessingMethod"),
    (0x001C, "GPSAreaInformation"),
    (0x001D, "GPSDateStamp"),
    (0x001E, "GPSDifferential"),
    (0x001F, "GPSHPositioningError"),
];

// Field types from the EXIF 2.32 tables. Tags allowing SHORT or LONG list SHORT.
const EXIF_TYPES: &[(u16, WireType)] = &[
    (0x00FE, WireType::Long),
    (0x00FF, WireType::Short),
    (0x010D, WireType::Ascii),
    (0x010E, WireType::Ascii),
    (0x010F, WireType::Ascii),
    (0x0110, WireType::Ascii),
    (0x0112, WireType::Short),
    (0x011A, WireType::Rational),
    (0x011B, WireType::Rational),
    (0x0128, WireType::Short),
    (0x012D, WireType::Short),
    (0x0131, WireType::Ascii),
    (0x0132, WireType::Ascii),
    (0x013B, WireType::Ascii),
    (0x013C, WireType::Ascii),
    (0x013E, WireType::Rational),
    (0x013F, WireType::Rational),
    (0x0211, WireType::Rational),
    (0x0213, WireType::Short),
    (0x0214, WireType::Rational),
    (0x02BC, WireType::Byte),
    (0x4746, WireType::Short),
    (0x4749, WireType::Short),
    (0x8298, WireType::Ascii),
    (0xC4A5, WireType::Undefined),
    (0x829A, WireType::Rational),
    (0x829D, WireType::Rational),
    (0x8822, WireType::Short),
    (0x8824, WireType::Ascii),
    (0x8827, WireType::Short),
    (0x8828, WireType::Undefined),
    (0x8830, WireType::Short),
    (0x8831, WireType::Long),
    (0x8832, WireType::Long),
    (0x9000, WireType::Undefined),
    (0x9003, WireType::Ascii),
    (0x9004, WireType::Ascii),
    (0x9010, WireType::Ascii),
    (0x9011, WireType::Ascii),
    (0x9012, WireType::Ascii),
    (0x9101, WireType::Undefined),
    (0x9102, WireType::Rational),
    (0x9201, WireType::SRational),
    (0x9202, WireType::Rational),
    (0x9203, WireType::SRational),
    (0x9204, WireType::SRational),
    (0x9205, WireType::Rational),
    (0x9206, WireType::Rational),
    (0x9207, WireType::Short),
    (0x9208, WireType::Short),
    (0x9209, WireType::Short),
    (0x920A, WireType::Rational),
    (0x9214, WireType::Short),
    (0x927C, WireType::Undefined),
    (0x9286, WireType::Undefined),
    (0x9290, WireType::Ascii),
    (0x9291, WireType::Ascii),
    (0x9292, WireType::Ascii),
    (0xA000, WireType::Undefined),
    (0xA001, WireType::Short),
    (0xA004, WireType::Ascii),
    (0xA20B, WireType::Rational),
    (0xA20E, WireType::Rational),
    (0xA20F, WireType::Rational),
    (0xA210, WireType::Short),
    (0xA214, WireType::Short),
    (0xA215, WireType::Rational),
    (0xA217, WireType::Short),
    (0xA300, WireType::Undefined),
    (0xA301, WireType::Undefined),
    (0xA302, WireType::Undefined),
    (0xA401, WireType::Short),
    (0xA402, WireType::Short),
    (0xA403, WireType::Short),
    (0xA404, WireType::Rational),
    (0xA405, WireType::Short),
    (0xA406, WireType::Short),
    (0xA407, WireType::Short),
    (0xA408, WireType::Short),
    (0xA409, WireType::Short),
    (0xA40A, WireType::Short),
    (0xA40B, WireType::Undefined),
    (0xA40C, WireType::Short),
    (0xA420, WireType::Ascii),
    (0xA430, WireType::Ascii),
    (0xA431, WireType::Ascii),
    (0xA432, WireType::Rational),
    (0xA433, WireType::Ascii),
    (0xA434, WireType::Ascii),
    (0xA435, WireType::Ascii),
    (0xA500, WireType::Rational),
];

const GPS_TYPES: &[(u16, WireType)] = &[
    (0x0000, WireType::Byte),
    (0x0001, WireType::Ascii),
    (0x0002, WireType::Rational),
    (0x0003, WireType::Ascii),
    (0x0004, WireType::Rational),
    (0x0005, WireType::Byte),
    (0x0006, WireType::Rational),
    (0x0007, WireType::Rational),
    (0x0008, WireType::Ascii),
    (0x0009, WireType::Ascii),
    (0x000A, WireType::Ascii),
    (0x000B, WireType::Rational),
    (0x000C, WireType::Ascii),
    (0x000D, WireType::Rational),
    (0x000E, WireType::Ascii),
    (0x000F, WireType::Rational),
    (0x0010, WireType::Ascii),
    (0x0011, WireType::Rational),
    (0x0012, WireType::Ascii),
    (0x0013, WireType::Ascii),
    (0x0014, WireType::Rational),
    (0x0015, WireType::Ascii),
    (0x0016, WireType::Rational),
    (0x0017, WireType::Ascii),
    (0x0018, WireType::Rational),
    (0x0019, WireType::Ascii),
    (0x001A, WireType::Rational),
    (0x001B, WireType::Undefined),
    (0x001C, WireType::Undefined),
    (0x001D, WireType::Ascii),
    (0x001E, WireType::Short),
    (0x001F, WireType::Rational),
];

// Tags describing the container itself. Never copied from a caller's tag set.
const STRUCTURAL_TAGS: &[u16] = &[
    0x0100, // ImageWidth
    0x0101, // ImageLength
    0x0102, // BitsPerSample
    0x0103, // Compression
    0x0106, // PhotometricInterpretation
    0x0111, // StripOffsets
    0x0115, // SamplesPerPixel
    0x0116, // RowsPerStrip
    0x0117, // StripByteCounts
    0x011C, // PlanarConfiguration
    0x0142, // TileWidth
    0x0143, // TileLength
    0x0144, // TileOffsets
    0x0145, // TileByteCounts
    0x014A, // SubIFDs
    0x0201, // JpegIFOffset
    0x0202, // JpegIFByteCount
    0x0212, // YCbCrSubSampling
    TAG_EXIF_OFFSET,
    TAG_GPS_INFO,
    TAG_INTEROP_OFFSET,
    0xA002, // ExifImageWidth
    0xA003, // ExifImageHeight
];

/// Display name for an EXIF tag id, or the id in decimal when unknown.
pub fn tag_name(id: u16) -> Cow<'static, str> {
    EXIF_TAGS
        .iter()
        .find(|(tag, _, _)| *tag == id)
        .map(|(_, name, _)| Cow::Borrowed(*name))
        .unwrap_or_else(|| Cow::Owned(id.to_string()))
}

/// Standard id for an EXIF tag name. `None` for custom or unknown names.
pub fn tag_id(name: &str) -> Option<u16> {
    EXIF_TAGS
        .iter()
        .find(|(_, tag, _)| tag.eq_ignore_ascii_case(name))
        .map(|(id, _, _)| *id)
}

/// Display name for a GPS sub-tag id, or the id in decimal when unknown.
pub fn gps_tag_name(id: u16) -> Cow<'static, str> {
    GPS_TAGS
        .iter()
        .find(|(tag, _)| *tag == id)
        .map(|(_, name)| Cow::Borrowed(*name))
        .unwrap_or_else(|| Cow::Owned(id.to_string()))
}

/// Standard id for a GPS sub-tag name.
pub fn gps_tag_id(name: &str) -> Option<u16> {
    GPS_TAGS
        .iter()
        .find(|(_, tag)| tag.eq_ignore_ascii_case(name))
        .map(|(id, _)| *id)
}

/// Directory a standard EXIF tag belongs to. Unknown ids default to the
/// Exif sub-IFD.
pub fn tag_ifd(id: u16) -> Ifd {
    EXIF_TAGS
        .iter()
        .find(|(tag, _, _)| *tag == id)
        .map(|(_, _, ifd)| *ifd)
        .unwrap_or(Ifd::Exif)
}

/// Whether the tag describes container structure and must not be copied
/// from caller-supplied metadata.
pub fn is_structural(id: u16) -> bool {
    STRUCTURAL_TAGS.contains(&id)
}

/// Whether the id is one of the UTF-16LE Windows XP* tags.
pub fn is_xp(id: u16) -> bool {
    (TAG_XP_FIRST..=TAG_XP_LAST).contains(&id)
}

/// Standard field type of an EXIF tag. `None` for XP* tags, structural tags
/// and unknown ids.
pub fn standard_type(id: u16) -> Option<WireType> {
    EXIF_TYPES.iter().find(|(tag, _)| *tag == id).map(|(_, wire)| *wire)
}

pub fn gps_standard_type(id: u16) -> Option<WireType> {
    GPS_TYPES.iter().find(|(tag, _)| *tag == id).map(|(_, wire)| *wire)
}

/// Standard field type for a tag name, looking in the EXIF table first.
pub fn expected_type(name: &str) -> Option<WireType> {
    match tag_id(name) {
        Some(id) => standard_type(id),
        None => gps_tag_id(name).and_then(gps_standard_type),
    }
}

/// Canonical spelling of a known tag name (EXIF table first, then GPS).
pub fn canonical_name(name: &str) -> Option<&'static str> {
    EXIF_TAGS
        .iter()
        .find(|(_, tag, _)| tag.eq_ignore_ascii_case(name))
        .map(|(_, tag, _)| *tag)
        .or_else(|| {
            GPS_TAGS
                .iter()
                .find(|(_, tag)| tag.eq_ignore_ascii_case(name))
                .map(|(_, tag)| *tag)
        })
}
