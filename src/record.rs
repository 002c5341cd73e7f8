use std::collections::BTreeSet;

use serde::Serialize;

use crate::coord::Coordinate;
use crate::extract::FieldExtractor;
use crate::parse::InfoBlock;
use crate::Result;

/// Everything known about one station article.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationRecord {
    /// Title of the first info block. A blank first title stays `None`; later blocks
    /// never stand in for it.
    pub name: Option<String>,
    pub location: Option<Coordinate>,
    /// Largest daily ridership figure seen, 0 when there was none.
    pub passengers: u64,
    pub outbound_links: BTreeSet<String>,
}

impl StationRecord {
    /// A record with no outbound links ends a walk.
    pub fn is_dead_end(&self) -> bool {
        self.outbound_links.is_empty()
    }
}

/// Folds the blocks of one document into a single record.
///
/// * name: first block only, never overwritten
/// * location: first block that yields one
/// * passengers: maximum over every block
/// * links: union over every block
pub fn aggregate(extractor: &FieldExtractor<'_>, blocks: &[InfoBlock<'_>]) -> Result<StationRecord> {
    let mut record = StationRecord {
        name: blocks
            .first()
            .and_then(|block| extractor.title(block))
            .filter(|name| !name.is_empty()),
        ..StationRecord::default()
    };
    tracing::debug!(blocks = blocks.len(), name = ?record.name, "aggregating info blocks");

    for block in blocks {
        if record.location.is_none() {
            record.location = extractor.location(block)?;
            if let Some(loc) = record.location {
                tracing::debug!(lat = loc.lat, lng = loc.lng, "found location");
            }
        }

        if let Some(max) = extractor.passengers(block).into_iter().max() {
            record.passengers = record.passengers.max(max);
        }

        record.outbound_links.extend(extractor.outbound_links(block));
    }

    tracing::debug!(
        passengers = record.passengers,
        links = ?record.outbound_links,
        "aggregated record"
    );
    Ok(record)
}
