use serde::Deserialize;
use thiserror::Error;

use crate::embed::embed_url;
use crate::logging::log_event;

/// Number of skeleton cards shown while the feed is loading.
pub const SKELETON_CARDS: usize = 6;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub thumbnail: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub description: String,
}

impl Project {
    /// Player URL for the card, or `None` when the card cannot open a modal.
    pub fn embed_url(&self) -> Option<String> {
        match embed_url(&self.video_url) {
            Ok(url) if url.is_empty() => None,
            Ok(url) => Some(url),
            Err(error) => {
                log_event(
                    log::Level::Warn,
                    "video_link_unplayable",
                    serde_json::json!({
                        "title": self.title,
                        "message": error.to_string(),
                    }),
                );
                None
            }
        }
    }

    #[cfg(test)]
    pub fn is_playable(&self) -> bool {
        self.embed_url().is_some()
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed feed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("feed contained no projects")]
    Empty,
}

impl FeedError {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Malformed(_) => "malformed",
            Self::Empty => "empty",
        }
    }
}

#[derive(Deserialize)]
struct ProjectFeed {
    projects: Vec<Project>,
}

/// Parses a `{ "projects": [...] }` document.
pub fn parse_feed(body: &str) -> Result<Vec<Project>, FeedError> {
    let feed: ProjectFeed = serde_json::from_str(body)?;

    if feed.projects.is_empty() {
        return Err(FeedError::Empty);
    }

    Ok(feed.projects)
}

/// The grid never renders empty: any feed failure swaps in [`fallback_projects`].
pub fn projects_or_fallback(result: Result<Vec<Project>, FeedError>, source: &str) -> Vec<Project> {
    match result {
        Ok(projects) => {
            log_event(
                log::Level::Info,
                "project_feed_loaded",
                serde_json::json!({ "source": source, "count": projects.len() }),
            );
            projects
        }
        Err(error) => {
            log_event(
                log::Level::Warn,
                "project_feed_fallback",
                serde_json::json!({
                    "source": source,
                    "error_class": error.class(),
                    "message": error.to_string(),
                }),
            );
            fallback_projects()
        }
    }
}

pub fn fallback_projects() -> Vec<Project> {
    FALLBACK_PROJECTS
        .iter()
        .map(|(title, kind, thumbnail, video_url, description)| Project {
            title: title.to_string(),
            kind: kind.to_string(),
            thumbnail: thumbnail.to_string(),
            video_url: video_url.to_string(),
            description: description.to_string(),
        })
        .collect()
}

const FALLBACK_PROJECTS: [(&str, &str, &str, &str, &str); 6] = [
    (
        "Beyond the Summit",
        "Documentary",
        "https://images.unsplash.com/photo-1492619375914-88005aa9e8fb?w=800&h=500&fit=crop",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "A documentary exploring the challenges of mountain climbing in the Himalayas.",
    ),
    (
        "Future Vision",
        "Commercial",
        "https://images.unsplash.com/photo-1536440136628-849c177e76a1?w=800&h=500&fit=crop",
        "https://vimeo.com/148751763",
        "Tech company commercial showcasing innovative AI solutions.",
    ),
    (
        "Midnight Echo",
        "Music Video",
        "https://images.unsplash.com/photo-1478720568477-152d9b164e26?w=800&h=500&fit=crop",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "Atmospheric music video featuring neon-lit urban landscapes.",
    ),
    (
        "The Last Frame",
        "Short Film",
        "https://images.unsplash.com/photo-1485846234645-a62644f84728?w=800&h=500&fit=crop",
        "https://vimeo.com/148751763",
        "Award-winning short film about a photographer's final assignment.",
    ),
    (
        "Noir Collection",
        "Fashion Campaign",
        "https://images.unsplash.com/photo-1574717024653-61fd2cf4d44d?w=800&h=500&fit=crop",
        "",
        "High-fashion campaign with dramatic lighting and elegant movements.",
    ),
    (
        "Origin Stories",
        "Brand Film",
        "https://images.unsplash.com/photo-1516035069371-29a1b244cc32?w=800&h=500&fit=crop",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "Brand film exploring the heritage of a legacy company.",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_with_projects_is_used_as_is() {
        let body = r#"{
            "projects": [
                {
                    "title": "Salt Flats",
                    "type": "Commercial",
                    "thumbnail": "https://img.example.com/salt.jpg",
                    "videoUrl": "https://vimeo.com/12345",
                    "description": "Car spot shot at dawn."
                },
                {
                    "title": "Stills",
                    "type": "Photo Essay",
                    "thumbnail": "https://img.example.com/stills.jpg"
                }
            ]
        }"#;

        let projects = projects_or_fallback(parse_feed(body), "/projects.json");

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].kind, "Commercial");
        assert_eq!(projects[0].video_url, "https://vimeo.com/12345");
        assert_eq!(projects[1].video_url, "");
        assert_eq!(projects[1].description, "");
    }

    #[test]
    fn malformed_feed_falls_back() {
        let error = parse_feed("<!doctype html><title>404</title>").expect_err("html is not a feed");
        assert_eq!(error.class(), "malformed");

        let projects = projects_or_fallback(Err(error), "/projects.json");
        assert_eq!(projects, fallback_projects());
    }

    #[test]
    fn shape_mismatch_falls_back() {
        assert!(matches!(parse_feed(r#"{ "items": [] }"#), Err(FeedError::Malformed(_))));
        assert!(matches!(
            parse_feed(r#"{ "projects": [{ "title": "No type" }] }"#),
            Err(FeedError::Malformed(_))
        ));
        assert!(matches!(parse_feed(r#"{ "projects": [] }"#), Err(FeedError::Empty)));
    }

    #[test]
    fn transport_and_status_failures_render_the_fallback_grid() {
        for error in [FeedError::Transport("offline".to_string()), FeedError::Status(503)] {
            let projects = projects_or_fallback(Err(error), "https://cdn.example.com/projects.json");
            assert_eq!(projects.len(), SKELETON_CARDS);
            assert!(!projects.is_empty());
        }
    }

    #[test]
    fn fallback_set_has_six_entries_with_one_unplayable() {
        let projects = fallback_projects();

        assert_eq!(projects.len(), 6);
        let unplayable: Vec<&str> = projects
            .iter()
            .filter(|project| !project.is_playable())
            .map(|project| project.title.as_str())
            .collect();
        assert_eq!(unplayable, ["Noir Collection"]);
    }

    #[test]
    fn broken_youtube_link_is_not_playable() {
        let project = Project {
            title: "Broken".to_string(),
            kind: "Commercial".to_string(),
            thumbnail: "https://img.example.com/broken.jpg".to_string(),
            video_url: "https://www.youtube.com/watch".to_string(),
            description: String::new(),
        };

        assert_eq!(project.embed_url(), None);
        assert!(!project.is_playable());
    }
}
