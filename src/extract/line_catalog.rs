//! Discovers the published lines by scraping the listing pages
use std::sync::Arc;

use itertools::Itertools;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::{resolve, selector};
use crate::{
    error::ExtractError,
    fetch::TextFetcher,
    model::{Area, LineDescriptor, Route, VehicleType},
};

/// Container shared by every line entry, whatever the vehicle
const ELEMENT_CSS: &str = "div.element";
const ROUTE_CSS: &str = ".ruta";
const LINK_CSS: &str = "a";

const LINE_PREFIX: &str = "Line ";

/// Tried in order until one splits the route text in two, the loosest last.
/// The pages are written by hand so the dash isn't always surrounded by spaces.
const ROUTE_SEPARATORS: [&str; 3] = [" - ", "- ", "-"];

#[derive(Clone)]
pub struct LineCatalogExtractor {
    fetcher: Arc<dyn TextFetcher>,
    base_url: Url,
}

impl LineCatalogExtractor {
    pub fn new(fetcher: Arc<dyn TextFetcher>, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// Lines of every known listing page, urban first, each in page order.
    /// A line number present in both areas is returned twice.
    #[tracing::instrument(skip(self), err)]
    pub async fn all_lines(&self) -> Result<Vec<LineDescriptor>, ExtractError> {
        let mut lines = vec![];

        for area in Area::ALL {
            let listing_url = resolve(&self.base_url, area.listing_path())?;
            lines.extend(self.collect(area, &listing_url).await?);
        }

        info!("got {} lines", lines.len());

        Ok(lines)
    }

    /// Lines of a single listing page, all tagged with `area`.
    #[tracing::instrument(skip(self, listing_url), fields(url = %listing_url), err)]
    pub async fn collect(
        &self,
        area: Area,
        listing_url: &Url,
    ) -> Result<Vec<LineDescriptor>, ExtractError> {
        let html = self.fetcher.fetch_text(listing_url).await?.into_body()?;

        let lines = parse_listing(area, &self.base_url, &html)?;

        info!("got {} {:?} lines", lines.len(), area);

        Ok(lines)
    }
}

/// Extracts the lines of a listing page. Entries that can't be made sense of are dropped.
pub fn parse_listing(
    area: Area,
    base_url: &Url,
    html: &str,
) -> Result<Vec<LineDescriptor>, ExtractError> {
    let element_selector = selector(ELEMENT_CSS)?;
    let route_selector = selector(ROUTE_CSS)?;
    let link_selector = selector(LINK_CSS)?;

    let document = Html::parse_document(html);

    let lines = document
        .select(&element_selector)
        .filter_map(|element| {
            let line = parse_element(element, area, base_url, &route_selector, &link_selector);

            if line.is_none() {
                let text: String = element.text().collect();
                debug!(text = text.trim(), "discarding unparseable line element");
            }

            line
        })
        .collect_vec();

    Ok(lines)
}

fn parse_element(
    element: ElementRef,
    area: Area,
    base_url: &Url,
    route_selector: &Selector,
    link_selector: &Selector,
) -> Option<LineDescriptor> {
    let route_text: String = element.select(route_selector).next()?.text().collect();
    let route = split_route(&route_text)?;

    let link = element.select(link_selector).next()?;
    let link_text: String = link.text().collect();
    let detail_url = base_url.join(link.value().attr("href")?).ok()?;

    let classes = element.value().classes().collect_vec();

    Some(LineDescriptor {
        line_id: line_id_from_link_text(&link_text).to_string(),
        detail_url: detail_url.to_string(),
        vehicle_type: VehicleType::from_classes(classes.iter().copied()),
        area,
        route,
    })
}

/// Splits "Start - End" into its two termini. `None` if no separator gives two non-empty halves.
pub fn split_route(route_text: &str) -> Option<Route> {
    ROUTE_SEPARATORS
        .iter()
        .find_map(|separator| split_route_on(route_text, separator))
}

fn split_route_on(route_text: &str, separator: &str) -> Option<Route> {
    let mut parts = route_text.split(separator).map(str::trim);

    let start = parts.next()?;
    let end = parts.next()?;

    if start.is_empty() || end.is_empty() {
        return None;
    }

    Some(Route {
        start: start.to_string(),
        end: end.to_string(),
    })
}

/// "Line 25" -> "25"
fn line_id_from_link_text(link_text: &str) -> &str {
    let link_text = link_text.trim();

    link_text
        .strip_prefix(LINE_PREFIX)
        .unwrap_or(link_text)
        .trim()
}
