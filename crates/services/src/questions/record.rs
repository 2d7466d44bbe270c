//! Wire shape of CMS question posts and their conversion into domain questions.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use quiz_core::model::{OptionId, Question, QuestionId, QuestionOption};

use crate::error::FetchError;

/// A question post as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: TitleField,
    #[serde(default, deserialize_with = "meta_or_default")]
    pub meta: QuestionMeta,
}

/// WordPress returns either a bare string or `{ "rendered": "..." }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TitleField {
    Plain(String),
    Rendered { rendered: String },
}

impl Default for TitleField {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl TitleField {
    fn into_text(self) -> String {
        match self {
            TitleField::Plain(text) | TitleField::Rendered { rendered: text } => text,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionMeta {
    #[serde(rename = "_question_options", default, deserialize_with = "null_as_default")]
    pub options: Vec<OptionRecord>,
    #[serde(rename = "_correct_answer", default)]
    pub correct_answer: Option<WireId>,
    #[serde(rename = "_explanation", default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionRecord {
    pub id: WireId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// Option ids show up as strings or numbers depending on how the post was saved.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl From<WireId> for OptionId {
    fn from(value: WireId) -> Self {
        match value {
            WireId::Text(text) => OptionId::new(text),
            WireId::Number(number) => OptionId::new(number.to_string()),
        }
    }
}

/// Unset post fields arrive as `null`; treat them like absent ones.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// WordPress serializes empty post meta as `[]` rather than `{}`.
fn meta_or_default<'de, D>(deserializer: D) -> Result<QuestionMeta, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => {
            QuestionMeta::deserialize(Value::Object(map)).map_err(D::Error::custom)
        }
        _ => Ok(QuestionMeta::default()),
    }
}

impl QuestionRecord {
    /// Normalize into a domain `Question`.
    ///
    /// A missing correct answer becomes an empty id, so the question is
    /// scored incorrect for any response.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidQuestion` when the option list is inconsistent.
    pub fn into_question(self) -> Result<Question, FetchError> {
        let id = QuestionId::new(self.id);
        let options: Vec<QuestionOption> = self
            .meta
            .options
            .into_iter()
            .map(|option| QuestionOption::new(option.id, option.text))
            .collect();
        let correct = self
            .meta
            .correct_answer
            .map_or_else(|| OptionId::new(""), OptionId::from);
        let explanation = self
            .meta
            .explanation
            .filter(|text| !text.trim().is_empty());

        if !options.iter().any(|option| option.id == correct) {
            log::warn!(
                "question {id}: correct answer {correct:?} matches none of {} options",
                options.len()
            );
        }

        Question::new(id, self.title.into_text(), options, correct, explanation)
            .map_err(|source| FetchError::InvalidQuestion { id, source })
    }
}

/// Decode a response body and normalize every record in it.
///
/// The body is a bare list or a `{ "data": [...] }` envelope. Records are
/// decoded one by one so an error names the record that broke.
pub(crate) fn decode_questions(body: &[u8]) -> Result<Vec<Question>, FetchError> {
    let items = match serde_json::from_slice::<Value>(body)? {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(unexpected_shape()),
        },
        _ => return Err(unexpected_shape()),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: QuestionRecord = serde_json::from_value(item)
                .map_err(|source| FetchError::InvalidRecord { index, source })?;
            record.into_question()
        })
        .collect()
}

fn unexpected_shape() -> FetchError {
    FetchError::Decode(serde_json::Error::custom(
        "expected a list of questions or an object with a `data` list",
    ))
}
