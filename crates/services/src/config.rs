use std::env;

use url::Url;

pub const DEFAULT_PER_PAGE: u32 = 100;

/// Connection settings for the CMS REST API.
///
/// Built once by the host and handed to the question source; nothing in this
/// crate reads configuration from ambient state after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// REST root, e.g. `https://school.example/wp-json`.
    pub api_url: Url,
    /// WordPress REST nonce sent as `X-WP-Nonce`.
    pub nonce: Option<String>,
    pub per_page: u32,
}

impl ApiConfig {
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            nonce: None,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Reads `QE_API_URL`, `QE_API_NONCE` and `QE_PER_PAGE`.
    ///
    /// Returns `None` when no usable API URL is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let raw_url = lookup("QE_API_URL")?;
        let api_url = match Url::parse(raw_url.trim()) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("ignoring QE_API_URL {raw_url:?}: {err}");
                return None;
            }
        };

        let mut config = Self::new(api_url);
        if let Some(nonce) = lookup("QE_API_NONCE").filter(|n| !n.trim().is_empty()) {
            config = config.with_nonce(nonce);
        }
        if let Some(per_page) = lookup("QE_PER_PAGE").and_then(|p| p.trim().parse().ok()) {
            config = config.with_per_page(per_page);
        }
        Some(config)
    }

    /// Endpoint serving practice questions.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the joined URL is not valid.
    pub fn questions_endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/quiz-extended/v1/questions",
            self.api_url.as_str().trim_end_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_url_disables_config() {
        assert!(ApiConfig::from_lookup(lookup(&[("QE_API_NONCE", "abc")])).is_none());
        assert!(ApiConfig::from_lookup(lookup(&[("QE_API_URL", "not a url")])).is_none());
    }

    #[test]
    fn env_values_are_applied() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("QE_API_URL", "https://school.example/wp-json/"),
            ("QE_API_NONCE", "n0nce"),
            ("QE_PER_PAGE", "25"),
        ]))
        .unwrap();

        assert_eq!(config.nonce.as_deref(), Some("n0nce"));
        assert_eq!(config.per_page, 25);
        assert_eq!(
            config.questions_endpoint().unwrap().as_str(),
            "https://school.example/wp-json/quiz-extended/v1/questions"
        );
    }

    #[test]
    fn defaults_apply_without_optional_vars() {
        let config =
            ApiConfig::from_lookup(lookup(&[("QE_API_URL", "https://school.example/wp-json")]))
                .unwrap();
        assert_eq!(config.nonce, None);
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(
            config.questions_endpoint().unwrap().path(),
            "/wp-json/quiz-extended/v1/questions"
        );
    }

    #[test]
    fn per_page_never_drops_to_zero() {
        let config = ApiConfig::new(Url::parse("https://school.example").unwrap()).with_per_page(0);
        assert_eq!(config.per_page, 1);
    }
}
