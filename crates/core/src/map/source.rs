//! Raster tile sources and URL template handling.
//!
//! Fetching is the engine's job; this only describes where tiles live. XYZ templates
//! use `{z}/{x}/{y}` and may contain one `{a-c}` style range that fans out across
//! mirror hosts. OGC API tile sets use `{tileMatrix}/{tileRow}/{tileCol}` below the
//! tile-set URL.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TileSourceError {
    #[error("invalid range {start}-{end} in url template {template}")]
    InvalidRange {
        template: String,
        start: char,
        end: char,
    },
    #[error("url template {0} has no tile placeholders")]
    MissingPlaceholders(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossOrigin {
    Anonymous,
    UseCredentials,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TileSource {
    Xyz {
        url: String,
    },
    OgcMapTile {
        url: String,
        #[serde(default)]
        cross_origin: Option<CrossOrigin>,
    },
}

impl TileSource {
    pub fn xyz(url: impl Into<String>) -> Self {
        TileSource::Xyz { url: url.into() }
    }

    pub fn ogc_map_tile(url: impl Into<String>, cross_origin: Option<CrossOrigin>) -> Self {
        TileSource::OgcMapTile {
            url: url.into(),
            cross_origin,
        }
    }

    pub fn cross_origin(&self) -> Option<CrossOrigin> {
        match self {
            TileSource::Xyz { .. } => None,
            TileSource::OgcMapTile { cross_origin, .. } => *cross_origin,
        }
    }

    /// Templates in `{z}/{x}/{y}` form, one per mirror host.
    pub fn xyz_templates(&self) -> Result<Vec<String>, TileSourceError> {
        match self {
            TileSource::Xyz { url } => {
                if !(url.contains("{z}") && url.contains("{x}") && url.contains("{y}")) {
                    return Err(TileSourceError::MissingPlaceholders(url.clone()));
                }
                expand_url(url)
            }
            TileSource::OgcMapTile { url, .. } => Ok(vec![format!(
                "{}/{{z}}/{{y}}/{{x}}",
                url.trim_end_matches('/')
            )]),
        }
    }
}

/// Expands a single `{a-c}` or `{0-3}` range into one URL per value. Templates
/// without a range come back as-is.
pub fn expand_url(template: &str) -> Result<Vec<String>, TileSourceError> {
    let Some((at, start, end)) = find_range(template) else {
        return Ok(vec![template.to_owned()]);
    };

    if start > end {
        return Err(TileSourceError::InvalidRange {
            template: template.to_owned(),
            start,
            end,
        });
    }

    let (prefix, suffix) = (&template[..at], &template[at + 5..]);
    Ok((start..=end)
        .map(|value| format!("{prefix}{value}{suffix}"))
        .collect())
}

fn find_range(template: &str) -> Option<(usize, char, char)> {
    let bytes = template.as_bytes();

    bytes.windows(5).enumerate().find_map(|(at, window)| {
        let &[open, start, dash, end, close] = window else {
            return None;
        };
        let is_range = open == b'{'
            && dash == b'-'
            && close == b'}'
            && start.is_ascii_alphanumeric()
            && end.is_ascii_alphanumeric();

        is_range.then_some((at, start as char, end as char))
    })
}
