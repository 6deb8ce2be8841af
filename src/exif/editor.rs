//! In-memory mutations over a [`MetadataSet`]. Nothing here touches disk.

use super::gps::{self, Axis};
use super::tags;
use super::value::{GPS_INFO_KEY, MetadataSet, TagValue};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditError {
    #[error("tag name must not be empty")]
    EmptyName,
    #[error("`{0}` is reserved; edit GPS sub-tags individually")]
    Reserved(String),
    #[error("{0} is out of range for a coordinate")]
    Coordinate(f64),
}

impl MetadataSet {
    /// Insert or replace a tag.
    ///
    /// Known names are stored under their canonical spelling. Names from the
    /// GPS table are routed into the GPS set. Anything else is kept as a
    /// custom tag.
    pub fn set_tag(&mut self, name: &str, value: TagValue) -> Result<(), EditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyName);
        }
        if name.eq_ignore_ascii_case(GPS_INFO_KEY) {
            return Err(EditError::Reserved(GPS_INFO_KEY.to_string()));
        }
        if tags::tag_id(name).is_none() && tags::gps_tag_id(name).is_some() {
            return self.set_gps_tag(name, value);
        }
        let key = tags::canonical_name(name).map_or_else(|| name.to_string(), str::to_string);
        log::debug!("set {key} = {value}");
        self.insert_raw(key, value);
        Ok(())
    }

    /// Insert or replace a tag in the GPS set, creating the set if needed.
    pub fn set_gps_tag(&mut self, name: &str, value: TagValue) -> Result<(), EditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyName);
        }
        let key = tags::gps_tag_id(name)
            .map(|id| tags::gps_tag_name(id).into_owned())
            .unwrap_or_else(|| name.to_string());
        log::debug!("set GPS {key} = {value}");
        self.insert_gps_raw(key, value);
        Ok(())
    }

    /// Remove a flat tag, returning its old value.
    pub fn remove_tag(&mut self, name: &str) -> Option<TagValue> {
        let name = name.trim();
        let key = tags::canonical_name(name).unwrap_or(name);
        self.wire.remove(key);
        self.tags.shift_remove(key)
    }

    /// Drop the whole GPS set. No-op when there is none.
    pub fn remove_gps_info(&mut self) {
        self.gps_wire.clear();
        if self.gps.take().is_some() {
            log::debug!("removed GPS info");
        }
    }

    /// Empty both the flat set and the GPS set.
    pub fn clear_all(&mut self) {
        self.tags.clear();
        self.gps = None;
        self.wire.clear();
        self.gps_wire.clear();
    }

    pub fn set_latitude(&mut self, decimal: f64) -> Result<(), EditError> {
        self.set_coordinate(decimal, Axis::Latitude)
    }

    pub fn set_longitude(&mut self, decimal: f64) -> Result<(), EditError> {
        self.set_coordinate(decimal, Axis::Longitude)
    }

    fn set_coordinate(&mut self, decimal: f64, axis: Axis) -> Result<(), EditError> {
        let (dms, reference) = gps::to_dms(decimal, axis).ok_or(EditError::Coordinate(decimal))?;
        let (value_key, ref_key) = match axis {
            Axis::Latitude => ("GPSLatitude", "GPSLatitudeRef"),
            Axis::Longitude => ("GPSLongitude", "GPSLongitudeRef"),
        };
        self.insert_gps_raw(ref_key.to_string(), TagValue::Text(reference.to_string()));
        self.insert_gps_raw(value_key.to_string(), TagValue::Rationals(dms.to_vec()));
        Ok(())
    }
}
