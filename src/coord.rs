use serde::Serialize;

use crate::config::Markers;
use crate::{Error, Result};

/// A point in decimal degrees. Latitude and longitude only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Converts degrees, minutes and seconds into decimal degrees.
///
/// The input is expected to be unsigned DMS read next to a hemisphere label.
/// Mixing a negative `degree` with positive `minute`/`second` does not produce a
/// meaningful southern or western value and the result is unspecified.
#[inline]
pub fn to_decimal_degrees(degree: f64, minute: f64, second: f64) -> f64 {
    degree + minute / 60.0 + second / 3600.0
}

/// Reads both halves of a coordinate row such as `北緯31度36分5.39秒 東経130度33分47.21秒`.
///
/// The row must already be known to hold the latitude marker. Any deviation from
/// `<marker><deg><degree mark><min><minute mark><sec><second mark>` is an error.
pub(crate) fn parse_coordinate_row(row: &str, markers: &Markers) -> Result<Coordinate> {
    let lat = parse_dms_after(row, &markers.latitude, markers)?;
    let lng = parse_dms_after(row, &markers.longitude, markers)?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::malformed(row, "latitude out of range"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(Error::malformed(row, "longitude out of range"));
    }
    Ok(Coordinate { lat, lng })
}

fn parse_dms_after(row: &str, hemisphere: &str, markers: &Markers) -> Result<f64> {
    let (_, rest) = row
        .split_once(hemisphere)
        .ok_or_else(|| Error::malformed(row, "missing hemisphere marker"))?;
    let (dms, _) = rest
        .split_once(markers.second.as_str())
        .ok_or_else(|| Error::malformed(row, "missing seconds marker"))?;
    let (degree, rest) = dms
        .split_once(markers.degree.as_str())
        .ok_or_else(|| Error::malformed(row, "missing degree marker"))?;
    let (minute, second) = rest
        .split_once(markers.minute.as_str())
        .ok_or_else(|| Error::malformed(row, "missing minute marker"))?;

    let degree = parse_component(degree, row, "degrees are not a number")?;
    let minute = parse_component(minute, row, "minutes are not a number")?;
    let second = parse_component(second, row, "seconds are not a number")?;
    Ok(to_decimal_degrees(degree, minute, second))
}

#[inline]
fn parse_component(text: &str, row: &str, reason: &'static str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| Error::malformed(row, reason))
}
