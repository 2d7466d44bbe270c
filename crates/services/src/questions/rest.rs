use async_trait::async_trait;
use reqwest::Client;

use quiz_core::model::Question;

use crate::config::ApiConfig;
use crate::error::FetchError;
use super::filter::QuestionFilter;
use super::record::decode_questions;
use super::source::QuestionSource;

const NONCE_HEADER: &str = "X-WP-Nonce";

/// Fetches questions from the `quiz-extended/v1` REST endpoint.
///
/// One GET per call. No retries and no caching; the transport's default
/// timeout applies.
#[derive(Clone, Debug)]
pub struct RestQuestionSource {
    client: Client,
    config: ApiConfig,
}

impl RestQuestionSource {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl QuestionSource for RestQuestionSource {
    async fn fetch_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>, FetchError> {
        let mut url = self.config.questions_endpoint()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("per_page", &self.config.per_page.to_string());
            for (key, value) in filter.query_pairs() {
                query.append_pair(key, &value);
            }
        }

        log::debug!("fetching practice questions from {url}");

        let mut request = self.client.get(url);
        if let Some(nonce) = &self.config.nonce {
            request = request.header(NONCE_HEADER, nonce);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        let questions = decode_questions(&body)?;
        log::debug!("received {} practice questions", questions.len());
        Ok(questions)
    }
}
