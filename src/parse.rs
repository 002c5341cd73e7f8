use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::Markers;
use crate::{Error, Result};

/// Attributes that mark a `<tr>` as decoration (headers, microdata, styled separators)
/// rather than a fact row.
const DECORATION_ATTRS: [&str; 3] = ["class", "itemprop", "style"];

/// One info block `<table>` with its fact rows in document order.
/// Rows of nested tables are included, the way a plain descendant search finds them.
#[derive(Debug)]
pub struct InfoBlock<'a> {
    rows: Vec<Row<'a>>,
}

impl<'a> InfoBlock<'a> {
    pub fn rows(&self) -> &[Row<'a>] {
        &self.rows
    }
}

#[derive(Debug)]
pub struct Row<'a> {
    text: String,
    hrefs: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Concatenated text of every descendant node.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Link targets in this row whose raw `href` matches `pattern`.
    pub fn links_matching<'r>(&'r self, pattern: &'r Regex) -> impl Iterator<Item = &'a str> + 'r {
        self.hrefs.iter().copied().filter(|href| pattern.is_match(href))
    }
}

/// Finds info blocks by their table signature.
#[derive(Debug)]
pub struct BlockLocator {
    block: Selector,
    row: Selector,
    link: Selector,
}

impl BlockLocator {
    pub fn new(markers: &Markers) -> Result<Self> {
        Ok(Self {
            block: create_selector(&format!(r#"table[class="{}"]"#, markers.block_class))?,
            row: create_selector("tr")?,
            link: create_selector("a[href]")?,
        })
    }

    /// Every matching block in document order. No match is an empty `Vec`, not an error.
    pub fn locate<'a>(&self, doc: &'a Html) -> Vec<InfoBlock<'a>> {
        doc.select(&self.block)
            .map(|table| InfoBlock {
                rows: self.rows_of(table),
            })
            .collect()
    }

    fn rows_of<'a>(&self, table: ElementRef<'a>) -> Vec<Row<'a>> {
        table
            .select(&self.row)
            .filter(|tr| is_fact_row(*tr))
            .map(|tr| Row {
                text: tr.text().collect(),
                hrefs: tr
                    .select(&self.link)
                    .filter_map(|a| a.value().attr("href"))
                    .collect(),
            })
            .collect()
    }
}

#[inline]
fn is_fact_row(tr: ElementRef<'_>) -> bool {
    DECORATION_ATTRS
        .iter()
        .all(|attr| tr.value().attr(attr).map_or(true, str::is_empty))
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
