//! Fetches and parses the per line csv timetables
use std::sync::Arc;

use itertools::Itertools;
use reqwest::Url;
use tracing::{debug, info};

use super::with_file_name;
use crate::{
    error::ExtractError,
    fetch::TextFetcher,
    model::{DayCategory, LineSchedule, ScheduleRecord},
    utils::{first_two_fields, second_field},
};

/// Lines at the top of every file before the departures start
const HEADER_LINES: usize = 5;

const ROUTE_NAME_LINE: usize = 0;
// line 1 is unused
const EFFECTIVE_DATE_LINE: usize = 2;
const INBOUND_STOP_LINE: usize = 3;
const OUTBOUND_STOP_LINE: usize = 4;

#[derive(Clone)]
pub struct ScheduleExtractor {
    fetcher: Arc<dyn TextFetcher>,
    schedule_base_url: Url,
}

impl ScheduleExtractor {
    pub fn new(fetcher: Arc<dyn TextFetcher>, schedule_base_url: Url) -> Self {
        Self {
            fetcher,
            schedule_base_url,
        }
    }

    /// Gets the week, saturday and sunday timetables of a line, one fetch after the other.
    #[tracing::instrument(skip(self), err)]
    pub async fn schedule(&self, line_id: &str) -> Result<LineSchedule, ExtractError> {
        let mut schedule = LineSchedule::default();

        for category in DayCategory::ALL {
            schedule.set(category, self.category_schedule(line_id, category).await?);
        }

        Ok(schedule)
    }

    /// `None` when the server has no file for this category
    async fn category_schedule(
        &self,
        line_id: &str,
        category: DayCategory,
    ) -> Result<Option<ScheduleRecord>, ExtractError> {
        let url = with_file_name(&self.schedule_base_url, &category.file_name(line_id))?;

        let Some(text) = self.fetcher.fetch_text(&url).await?.into_optional_body()? else {
            info!(?category, "no schedule published");
            return Ok(None);
        };

        parse_schedule(&text).map(Some)
    }
}

/// Parses one timetable file.
///
/// The first five lines are a fixed header, the value of each being the second
/// comma separated field. The header isn't validated beyond that, an extra or
/// missing header line shifts every field.
///
/// Every following line with a comma holds an inbound and an outbound departure,
/// kept verbatim. Lines without a comma are noise. So are lines whose first two
/// fields are both blank (`","`, `" , "`): having a comma isn't enough for those,
/// they are skipped instead of adding an empty departure to both directions.
pub fn parse_schedule(text: &str) -> Result<ScheduleRecord, ExtractError> {
    let lines = text.split('\n').collect_vec();

    let header_field = |line: usize| {
        lines
            .get(line)
            .and_then(|l| second_field(l))
            .map(str::to_string)
            .ok_or(ExtractError::MalformedHeader { line })
    };

    let route_name = header_field(ROUTE_NAME_LINE)?;
    let effective_date = header_field(EFFECTIVE_DATE_LINE)?;
    let inbound_stop = header_field(INBOUND_STOP_LINE)?;
    let outbound_stop = header_field(OUTBOUND_STOP_LINE)?;

    let mut departures_in = vec![];
    let mut departures_out = vec![];
    let mut skipped = 0;

    for row in lines.iter().skip(HEADER_LINES) {
        match first_two_fields(row) {
            Some((inbound, outbound))
                if !(inbound.trim().is_empty() && outbound.trim().is_empty()) =>
            {
                departures_in.push(inbound.to_string());
                departures_out.push(outbound.to_string());
            }
            _ => skipped += 1,
        }
    }

    debug!(
        departures = departures_in.len(),
        skipped, "parsed schedule of {route_name}"
    );

    Ok(ScheduleRecord {
        route_name,
        effective_date,
        inbound_stop,
        outbound_stop,
        departures_in,
        departures_out,
    })
}
