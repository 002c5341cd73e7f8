use std::collections::HashSet;

use chrono::Local;
use rand::seq::IteratorRandom;
use rand::Rng;
use scraper::Html;
use serde::Serialize;
use tokio::task::spawn_blocking;

use crate::config::Markers;
use crate::extract::FieldExtractor;
use crate::parse::BlockLocator;
use crate::record::{aggregate, StationRecord};
use crate::request::Fetch;
use crate::{info_time, Result};

/// Parses a full document and folds its info blocks into one record.
pub fn extract_from_html(html: &str, markers: &Markers) -> Result<StationRecord> {
    let doc = Html::parse_document(html);
    let blocks = BlockLocator::new(markers)?.locate(&doc);
    tracing::debug!("number of info blocks: {}", blocks.len());
    let extractor = FieldExtractor::new(markers)?;
    aggregate(&extractor, &blocks)
}

/// Fetches an article and extracts its station record.
///
/// The parsed tree is not `Send`, so parsing runs on a blocking task.
#[tracing::instrument(skip_all, fields(identifier = %identifier))]
pub async fn extract<F: Fetch>(
    fetcher: &F,
    identifier: &str,
    markers: &Markers,
) -> Result<StationRecord> {
    let start_time = Local::now();
    let html = fetcher.fetch(identifier).await?;

    let record = spawn_blocking({
        let markers = markers.clone();
        move || extract_from_html(&html, &markers)
    })
    .await??;

    info_time!(
        start_time,
        "extracted {:?}: {} passengers, {} links",
        record.name,
        record.passengers,
        record.outbound_links.len()
    );
    Ok(record)
}

/// One visited article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub identifier: String,
    pub record: StationRecord,
}

/// Random walk over outbound links.
///
/// Each call to [`Traversal::next_step`] fetches the current article and picks the next
/// one uniformly from its links. Nothing stops the walk from revisiting articles; the
/// walk only ends by itself at a dead end. After a dead end or an error it is exhausted
/// and cannot be restarted.
pub struct Traversal<F, R> {
    fetcher: F,
    rng: R,
    markers: Markers,
    current: Option<String>,
}

impl<F: Fetch, R: Rng> Traversal<F, R> {
    pub fn new(fetcher: F, start: impl Into<String>, markers: Markers, rng: R) -> Self {
        Self {
            fetcher,
            rng,
            markers,
            current: Some(start.into()),
        }
    }

    /// `Ok(None)` once the walk is over.
    pub async fn next_step(&mut self) -> Result<Option<Step>> {
        let Some(identifier) = self.current.take() else {
            return Ok(None);
        };

        let record = extract(&self.fetcher, &identifier, &self.markers).await?;

        self.current = record
            .outbound_links
            .iter()
            .choose(&mut self.rng)
            .cloned();
        match &self.current {
            Some(next) => tracing::debug!(from = %identifier, to = %next, "next article"),
            None => tracing::info!(%identifier, "dead end"),
        }

        Ok(Some(Step { identifier, record }))
    }
}

/// Caller-side limits for [`walk`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkLimits {
    /// 0 means unlimited.
    pub max_steps: usize,
    /// Stop right after an article that was already in the visited set.
    pub stop_on_revisit: bool,
}

/// Drives a traversal until a dead end or one of the limits, recording every article in
/// `visited`. `on_step` sees each step as soon as it is taken.
pub async fn walk<F, R>(
    traversal: &mut Traversal<F, R>,
    limits: WalkLimits,
    visited: &mut HashSet<String>,
    mut on_step: impl FnMut(&Step) -> Result<()>,
) -> Result<usize>
where
    F: Fetch,
    R: Rng,
{
    let start_time = Local::now();
    let mut steps = 0;

    while limits.max_steps == 0 || steps < limits.max_steps {
        let Some(step) = traversal.next_step().await? else {
            break;
        };
        steps += 1;
        on_step(&step)?;

        let first_visit = visited.insert(step.identifier);
        if !first_visit && limits.stop_on_revisit {
            tracing::info!("revisited an article, stopping");
            break;
        }
    }

    info_time!(start_time, "walk finished after {} steps", steps);
    Ok(steps)
}
