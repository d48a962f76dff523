//! Conversion of shareable video links into embeddable player URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static DRIVE_FILE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-A-Za-z0-9_]{25,}").expect("drive file id pattern is valid"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    YouTube,
    Vimeo,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Vimeo => "vimeo",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EmbedError {
    #[error("{provider} link has no video id: {link}")]
    MissingVideoId { provider: Provider, link: String },
}

/// A recognised video link, each variant carrying what its player needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoLink {
    YouTube { id: String },
    Vimeo { id: String },
    Drive { file_id: String },
    /// Anything else is assumed to be embeddable as-is.
    Direct(String),
}

impl VideoLink {
    /// Classifies `raw`. Blank input yields `Ok(None)`.
    pub fn parse(raw: &str) -> Result<Option<Self>, EmbedError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let link = if raw.contains("youtube.com") || raw.contains("youtu.be") {
            let id = youtube_id(raw).ok_or_else(|| EmbedError::MissingVideoId {
                provider: Provider::YouTube,
                link: raw.to_string(),
            })?;
            Self::YouTube { id: id.to_string() }
        } else if raw.contains("vimeo.com") {
            let id = vimeo_id(raw).ok_or_else(|| EmbedError::MissingVideoId {
                provider: Provider::Vimeo,
                link: raw.to_string(),
            })?;
            Self::Vimeo { id: id.to_string() }
        } else if raw.contains("drive.google.com") {
            match DRIVE_FILE_ID.find(raw) {
                Some(found) => Self::Drive {
                    file_id: found.as_str().to_string(),
                },
                None => Self::Direct(raw.to_string()),
            }
        } else {
            Self::Direct(raw.to_string())
        };

        Ok(Some(link))
    }

    pub fn embed_url(&self) -> String {
        match self {
            Self::YouTube { id } => format!("https://www.youtube.com/embed/{id}?autoplay=1"),
            Self::Vimeo { id } => format!("https://player.vimeo.com/video/{id}?autoplay=1"),
            Self::Drive { file_id } => format!("https://drive.google.com/file/d/{file_id}/preview"),
            Self::Direct(url) => url.clone(),
        }
    }
}

/// Maps a raw link to its player URL; blank input maps to an empty string.
pub fn embed_url(raw: &str) -> Result<String, EmbedError> {
    Ok(VideoLink::parse(raw)?
        .map(|link| link.embed_url())
        .unwrap_or_default())
}

fn youtube_id(raw: &str) -> Option<&str> {
    let id = if let Some((_, rest)) = raw.split_once("youtu.be/") {
        truncate_at(rest, '?')
    } else if let Some((_, rest)) = raw.split_once("/embed/") {
        truncate_at(rest, '?')
    } else {
        truncate_at(query_value(raw, "v")?, '&')
    };

    non_empty(id)
}

fn vimeo_id(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("vimeo.com/")?;
    let path = truncate_at(rest, '?');
    let id = path.strip_prefix("video/").unwrap_or(path);

    non_empty(id.trim_end_matches('/'))
}

/// Value of `key` in the query string, if present after `?` or `&`.
fn query_value<'a>(raw: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = raw.split_once('?')?;
    let query = truncate_at(query, '#');

    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == key).then_some(value)
    })
}

fn truncate_at(value: &str, stop: char) -> &str {
    value.split(stop).next().unwrap_or(value)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
