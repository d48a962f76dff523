use log::LevelFilter;
use url::Url;

use crate::logging::log_event;

const DEFAULT_DATA_SOURCE_URL: &str = "/projects.json";
const DEFAULT_RESUME_URL: &str = "/resume.pdf";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

const DATA_SOURCE_URL_KEY: &str = "PORTFOLIO_DATA_SOURCE_URL";
const FORM_RELAY_URL_KEY: &str = "PORTFOLIO_FORM_RELAY_URL";
const RESUME_URL_KEY: &str = "PORTFOLIO_RESUME_URL";
const LOG_LEVEL_KEY: &str = "PORTFOLIO_LOG_LEVEL";

/// Site settings baked in at build time.
///
/// The site runs in the browser, so there is no process environment to read
/// at startup. Each value is captured with `option_env!` when the wasm bundle
/// is compiled and falls back to a compiled-in default.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub data_source_url: String,
    pub form_relay_url: Option<Url>,
    pub resume_url: String,
    pub log_level: LevelFilter,
}

impl SiteConfig {
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name: &str| {
            let value = match name {
                DATA_SOURCE_URL_KEY => option_env!("PORTFOLIO_DATA_SOURCE_URL"),
                FORM_RELAY_URL_KEY => option_env!("PORTFOLIO_FORM_RELAY_URL"),
                RESUME_URL_KEY => option_env!("PORTFOLIO_RESUME_URL"),
                LOG_LEVEL_KEY => option_env!("PORTFOLIO_LOG_LEVEL"),
                _ => None,
            };
            value.map(ToString::to_string)
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_source_url = parse_non_empty_string(&lookup, DATA_SOURCE_URL_KEY)
            .unwrap_or_else(|| DEFAULT_DATA_SOURCE_URL.to_string());
        let resume_url = parse_non_empty_string(&lookup, RESUME_URL_KEY)
            .unwrap_or_else(|| DEFAULT_RESUME_URL.to_string());
        let form_relay_url = parse_http_url(&lookup, FORM_RELAY_URL_KEY);
        let log_level = parse_log_level(&lookup, LOG_LEVEL_KEY, DEFAULT_LOG_LEVEL);

        Self {
            data_source_url,
            form_relay_url,
            resume_url,
            log_level,
        }
    }

    pub fn relay_configured(&self) -> bool {
        self.form_relay_url.is_some()
    }
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_http_url(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<Url> {
    let value = parse_non_empty_string(lookup, name)?;

    match Url::parse(&value) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Some(parsed),
        Ok(parsed) => {
            log_event(
                log::Level::Warn,
                "site_config_invalid",
                serde_json::json!({
                    "key": name,
                    "reason": "unsupported_scheme",
                    "scheme": parsed.scheme(),
                }),
            );
            None
        }
        Err(error) => {
            log_event(
                log::Level::Warn,
                "site_config_invalid",
                serde_json::json!({
                    "key": name,
                    "reason": "unparseable_url",
                    "message": error.to_string(),
                }),
            );
            None
        }
    }
}

fn parse_log_level(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: LevelFilter,
) -> LevelFilter {
    match parse_non_empty_string(lookup, name)
        .unwrap_or_default()
        .to_ascii_lowercase()
        .as_str()
    {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| values.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = SiteConfig::from_lookup(|_| None);

        assert_eq!(config.data_source_url, "/projects.json");
        assert_eq!(config.resume_url, "/resume.pdf");
        assert_eq!(config.form_relay_url, None);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(!config.relay_configured());
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            (DATA_SOURCE_URL_KEY, "  https://cdn.example.com/projects.json "),
            (RESUME_URL_KEY, "https://cdn.example.com/cv.pdf"),
            (LOG_LEVEL_KEY, "DEBUG"),
        ]));

        assert_eq!(config.data_source_url, "https://cdn.example.com/projects.json");
        assert_eq!(config.resume_url, "https://cdn.example.com/cv.pdf");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            (DATA_SOURCE_URL_KEY, "   "),
            (FORM_RELAY_URL_KEY, ""),
            (LOG_LEVEL_KEY, "loud"),
        ]));

        assert_eq!(config.data_source_url, "/projects.json");
        assert_eq!(config.form_relay_url, None);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn relay_url_must_be_http() {
        let https = SiteConfig::from_lookup(lookup_from(&[(
            FORM_RELAY_URL_KEY,
            "https://script.google.com/macros/s/abc/exec",
        )]));
        assert!(https.relay_configured());
        assert_eq!(
            https.form_relay_url.as_ref().map(Url::as_str),
            Some("https://script.google.com/macros/s/abc/exec")
        );

        let ftp = SiteConfig::from_lookup(lookup_from(&[(FORM_RELAY_URL_KEY, "ftp://example.com/relay")]));
        assert!(!ftp.relay_configured());

        let garbage = SiteConfig::from_lookup(lookup_from(&[(FORM_RELAY_URL_KEY, "not a url")]));
        assert!(!garbage.relay_configured());
    }
}
