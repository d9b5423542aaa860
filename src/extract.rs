pub mod line_catalog;
pub mod schedule;

pub use line_catalog::*;
pub use schedule::*;

use reqwest::Url;
use scraper::Selector;

use crate::error::ExtractError;

fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        css,
        reason: e.to_string(),
    })
}

/// Appends `file_name` to the directory `base` as one percent-encoded path segment,
/// so a `/`, `?` or `#` in it can't leave the directory.
fn with_file_name(base: &Url, file_name: &str) -> Result<Url, ExtractError> {
    let mut url = base.clone();

    url.path_segments_mut()
        .map_err(|()| ExtractError::InvalidUrl {
            base: base.to_string(),
            path: file_name.to_string(),
            reason: "url can't have a path".to_string(),
        })?
        .pop_if_empty()
        .push(file_name);

    Ok(url)
}

fn resolve(base: &Url, path: &str) -> Result<Url, ExtractError> {
    base.join(path).map_err(|e| ExtractError::InvalidUrl {
        base: base.to_string(),
        path: path.to_string(),
        reason: e.to_string(),
    })
}
