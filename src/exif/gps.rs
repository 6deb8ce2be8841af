//! Degrees/minutes/seconds ↔ signed decimal degree conversion.

use super::value::{Rational, TagMap, TagValue};

/// Hundredths of an arc-second per degree.
const CENTISECONDS_PER_DEGREE: i64 = 360_000;

/// One of the three parts of a DMS triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Rational(Rational),
    Number(f64),
}

impl Component {
    fn value(self) -> Option<f64> {
        let v = match self {
            Component::Rational(r) => r.to_f64()?,
            Component::Number(n) => n,
        };
        v.is_finite().then_some(v)
    }
}

impl From<Rational> for Component {
    fn from(r: Rational) -> Self {
        Component::Rational(r)
    }
}

impl From<f64> for Component {
    fn from(n: f64) -> Self {
        Component::Number(n)
    }
}

impl From<i64> for Component {
    fn from(n: i64) -> Self {
        Component::Number(n as f64)
    }
}

/// Which coordinate a DMS triple describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    fn reference(self, negative: bool) -> &'static str {
        match (self, negative) {
            (Axis::Latitude, false) => "N",
            (Axis::Latitude, true) => "S",
            (Axis::Longitude, false) => "E",
            (Axis::Longitude, true) => "W",
        }
    }
}

/// Decimal latitude/longitude derived from a GPS sub-set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpsCoordinate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GpsCoordinate {
    pub fn is_some(&self) -> bool {
        self.latitude.is_some() || self.longitude.is_some()
    }
}

/// Convert a DMS triple and hemisphere reference into signed decimal degrees.
///
/// `S` and `W` negate the result. Returns `None` for a zero denominator, a
/// non-finite component or an unrecognised reference.
pub fn degrees<D, M, S>((d, m, s): (D, M, S), reference: &str) -> Option<f64>
where
    D: Into<Component>,
    M: Into<Component>,
    S: Into<Component>,
{
    let sign = match reference
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_ascii_uppercase()
        .as_str()
    {
        "N" | "E" => 1.0,
        "S" | "W" => -1.0,
        _ => return None,
    };
    let total = d.into().value()? + m.into().value()? / 60.0 + s.into().value()? / 3600.0;
    total.is_finite().then_some(sign * total)
}

/// Inverse of [`degrees`]: split a decimal value into a DMS triple and its
/// reference letter. Seconds keep two decimal places.
///
/// `None` if the value is not finite or lies outside the axis range.
pub fn to_dms(decimal: f64, axis: Axis) -> Option<([Rational; 3], &'static str)> {
    if !decimal.is_finite() || decimal.abs() > axis.limit() {
        return None;
    }
    let total = (decimal.abs() * CENTISECONDS_PER_DEGREE as f64).round() as i64;
    let d = total / CENTISECONDS_PER_DEGREE;
    let rem = total % CENTISECONDS_PER_DEGREE;
    let m = rem / 6000;
    let s = rem % 6000;
    Some((
        [Rational::new(d, 1), Rational::new(m, 1), Rational::new(s, 100)],
        axis.reference(decimal < 0.0 && total != 0),
    ))
}

/// Compute the coordinate pair from a nested GPS tag map.
pub fn coordinate(gps: &TagMap) -> GpsCoordinate {
    GpsCoordinate {
        latitude: axis_value(gps, "GPSLatitude", "GPSLatitudeRef"),
        longitude: axis_value(gps, "GPSLongitude", "GPSLongitudeRef"),
    }
}

fn axis_value(gps: &TagMap, value_key: &str, ref_key: &str) -> Option<f64> {
    let triple = triple(gps.get(value_key)?)?;
    let reference = reference(gps.get(ref_key)?)?;
    degrees(triple, &reference)
}

fn triple(value: &TagValue) -> Option<(Component, Component, Component)> {
    let parts: Vec<Component> = match value {
        TagValue::Rationals(v) => v.iter().copied().map(Component::Rational).collect(),
        TagValue::Integers(v) => v.iter().map(|n| Component::from(*n)).collect(),
        TagValue::Text(s) => s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<Rational>().ok().map(Component::Rational))
            .collect::<Option<_>>()?,
        _ => return None,
    };
    match parts.as_slice() {
        [d, m, s] => Some((*d, *m, *s)),
        _ => None,
    }
}

fn reference(value: &TagValue) -> Option<String> {
    match value {
        TagValue::Text(s) => Some(s.clone()),
        TagValue::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(num: i64, den: i64) -> Rational {
        Rational::new(num, den)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn north_and_east_are_positive() {
        let v = degrees((r(40, 1), r(26, 1), r(463, 10)), "N").unwrap();
        assert!(close(v, 40.0 + 26.0 / 60.0 + 46.3 / 3600.0));
        let v = degrees((10i64, 30i64, 0i64), "E").unwrap();
        assert!(close(v, 10.5));
    }

    #[test]
    fn south_and_west_negate() {
        let v = degrees((r(79, 1), r(56, 1), r(552, 10)), "W").unwrap();
        assert!(close(v, -79.9487));
        let v = degrees((33.0, 52.0, 4.0), "s").unwrap();
        assert!(v < 0.0);
    }

    #[test]
    fn reference_padding_is_ignored() {
        assert_eq!(degrees((1i64, 0i64, 0i64), " N\0"), Some(1.0));
    }

    #[test]
    fn zero_denominator_is_none() {
        assert_eq!(degrees((r(40, 0), r(0, 1), r(0, 1)), "N"), None);
        assert_eq!(degrees((r(40, 1), r(0, 1), r(1, 0)), "S"), None);
    }

    #[test]
    fn non_finite_and_bad_reference_are_none() {
        assert_eq!(degrees((f64::NAN, 0.0, 0.0), "N"), None);
        assert_eq!(degrees((f64::INFINITY, 0.0, 0.0), "N"), None);
        assert_eq!(degrees((1.0, 0.0, 0.0), ""), None);
        assert_eq!(degrees((1.0, 0.0, 0.0), "X"), None);
    }

    #[test]
    fn dms_round_trip() {
        let (dms, reference) = to_dms(-79.9487, Axis::Longitude).unwrap();
        assert_eq!(reference, "W");
        assert_eq!(dms[0], r(79, 1));
        assert_eq!(dms[1], r(56, 1));
        let back = degrees((dms[0], dms[1], dms[2]), reference).unwrap();
        assert!(close(back, -79.9487));

        let (_, reference) = to_dms(40.4462, Axis::Latitude).unwrap();
        assert_eq!(reference, "N");
    }

    #[test]
    fn dms_rejects_out_of_range() {
        assert!(to_dms(91.0, Axis::Latitude).is_none());
        assert!(to_dms(179.0, Axis::Longitude).is_some());
        assert!(to_dms(f64::NAN, Axis::Longitude).is_none());
    }

    #[test]
    fn coordinate_from_gps_map() {
        let mut gps = TagMap::new();
        gps.insert("GPSLatitudeRef".into(), TagValue::Text("N".into()));
        gps.insert("GPSLatitude".into(), TagValue::Rationals(vec![r(40, 1), r(26, 1), r(463, 10)]));
        gps.insert("GPSLongitudeRef".into(), TagValue::Bytes(b"W\0".to_vec()));
        gps.insert("GPSLongitude".into(), TagValue::Rationals(vec![r(79, 1), r(56, 1), r(552, 10)]));

        let c = coordinate(&gps);
        assert!(close(c.latitude.unwrap(), 40.4462));
        assert!(close(c.longitude.unwrap(), -79.9487));
    }

    #[test]
    fn missing_or_malformed_parts_are_none() {
        let mut gps = TagMap::new();
        gps.insert("GPSLatitude".into(), TagValue::Rationals(vec![r(40, 1), r(26, 1)]));
        gps.insert("GPSLatitudeRef".into(), TagValue::Text("N".into()));
        gps.insert("GPSLongitude".into(), TagValue::Rationals(vec![r(79, 1), r(56, 1), r(552, 10)]));

        let c = coordinate(&gps);
        assert_eq!(c, GpsCoordinate::default());
        assert!(!c.is_some());
    }
}
