use std::collections::BTreeSet;

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::config::Markers;
use crate::coord::{parse_coordinate_row, Coordinate};
use crate::parse::InfoBlock;
use crate::Result;

/// Reads typed fields out of the rows of a single info block.
#[derive(Debug)]
pub struct FieldExtractor<'m> {
    markers: &'m Markers,
    link_pattern: Regex,
}

impl<'m> FieldExtractor<'m> {
    pub fn new(markers: &'m Markers) -> Result<Self> {
        Ok(Self {
            markers,
            link_pattern: Regex::new(&markers.link_pattern)?,
        })
    }

    /// Trimmed text of the first row. `None` for a block without rows.
    pub fn title(&self, block: &InfoBlock<'_>) -> Option<String> {
        block.rows().first().map(|row| row.text().trim().to_string())
    }

    /// Location from the first row carrying the latitude marker.
    ///
    /// Later rows are never looked at, even when the first match turns out malformed:
    /// a broken coordinate row is an error, not a reason to keep scanning.
    pub fn location(&self, block: &InfoBlock<'_>) -> Result<Option<Coordinate>> {
        block
            .rows()
            .iter()
            .find(|row| row.text().contains(self.markers.latitude.as_str()))
            .map(|row| parse_coordinate_row(row.text(), self.markers))
            .transpose()
    }

    /// Every ridership figure found in the block. Rows without digits contribute nothing.
    pub fn passengers(&self, block: &InfoBlock<'_>) -> Vec<u64> {
        block
            .rows()
            .iter()
            .filter(|row| row.text().contains(self.markers.passengers.as_str()))
            .filter_map(|row| {
                let figure = row
                    .text()
                    .split(self.markers.passengers_unit.as_str())
                    .next()
                    .unwrap_or_default();
                parse_figure(figure)
            })
            .collect()
    }

    /// Decoded article links from the rows holding a previous/next glyph.
    pub fn outbound_links(&self, block: &InfoBlock<'_>) -> BTreeSet<String> {
        block
            .rows()
            .iter()
            .filter(|row| {
                let text = row.text();
                text.contains(self.markers.prev_glyph.as_str())
                    || text.contains(self.markers.next_glyph.as_str())
            })
            .flat_map(|row| row.links_matching(&self.link_pattern))
            .map(|href| percent_decode_str(href).decode_utf8_lossy().into_owned())
            .collect()
    }
}

/// Keeps only the digits of `text` (full-width ones folded to ASCII) and reads them as a number.
fn parse_figure(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
            _ => None,
        })
        .collect();
    if digits.is_empty() {
        return None;
    }
    match digits.parse() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(%digits, "ignoring passenger figure: {e}");
            None
        }
    }
}
