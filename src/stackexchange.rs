//! Stack Exchange API client: search, question detail, user profiles.
//!
//! Blocking HTTP against API v2.3. Network calls live in [`Client`];
//! response-to-domain conversion is split into pure helpers so the
//! parsing can be tested from captured JSON without a network.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::text::{decode_entities, excerpt, html_to_text};
use crate::types::{Error, QuestionDetail, QuestionSummary, UserProfile};

/// Stack Overflow site root, used for browser hand-offs.
pub const SITE_URL: &str = "https://stackoverflow.com";

/// Page for composing a new question.
pub const ASK_URL: &str = "https://stackoverflow.com/questions/ask";

const API_BASE: &str = "https://api.stackexchange.com/2.3";
const SITE: &str = "stackoverflow";

/// At most this many search results are fetched and shown; digits 0-9
/// exactly cover the selectable range.
pub const RESULT_LIMIT: usize = 10;

/// API filter that includes post bodies in responses.
const BODY_FILTER: &str = "withbody";

const EXCERPT_CHARS: usize = 200;

// ============================================================================
// CLIENT
// ============================================================================

/// Blocking Stack Exchange API client.
pub struct Client {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
}

impl Client {
    /// Build a client. The API key, when present, is sent with every
    /// request and raises the rate-limit quota.
    pub fn new(api_key: Option<String>) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("soterm/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(from_reqwest)?;
        Ok(Client { http, api_key })
    }

    /// Search for questions matching `query`, optionally restricted to
    /// `tags`. Returns 0 to [`RESULT_LIMIT`] summaries; callers decide
    /// whether an empty result set ends the session.
    pub fn search(&self, query: &str, tags: &[String]) -> Result<Vec<QuestionSummary>, Error> {
        let pagesize = RESULT_LIMIT.to_string();
        let tagged = tags.join(";");
        let mut params = vec![
            ("q", query),
            ("order", "desc"),
            ("sort", "relevance"),
            ("pagesize", pagesize.as_str()),
            ("filter", BODY_FILTER),
        ];
        if !tagged.is_empty() {
            params.push(("tagged", tagged.as_str()));
        }
        let items: Vec<QuestionItem> = self.get("/search/advanced", &params)?;
        Ok(summaries_from_items(items))
    }

    /// Fetch the full question and its answers for a search hit.
    ///
    /// A question with zero answers is rejected with [`Error::NoAnswers`]
    /// before a [`QuestionDetail`] is ever constructed.
    pub fn question(&self, summary: &QuestionSummary) -> Result<QuestionDetail, Error> {
        let questions: Vec<QuestionItem> = self.get(
            &format!("/questions/{}", summary.question_id),
            &[("filter", BODY_FILTER)],
        )?;
        let answers: Vec<AnswerItem> = self.get(
            &format!("/questions/{}/answers", summary.question_id),
            &[
                ("order", "desc"),
                ("sort", "votes"),
                ("filter", BODY_FILTER),
            ],
        )?;
        detail_from_items(questions.into_iter().next(), answers)
    }

    /// Fetch a user's public profile.
    pub fn user(&self, id: u64) -> Result<UserProfile, Error> {
        let items: Vec<UserItem> = self.get(&format!("/users/{}", id), &[])?;
        let item = items
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api(format!("no user with id {}", id)))?;
        Ok(profile_from_item(item))
    }

    /// GET a v2.3 endpoint and unwrap the response envelope.
    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let mut request = self
            .http
            .get(format!("{}{}", API_BASE, path))
            .query(&[("site", SITE)])
            .query(params);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        let response = request.send().map_err(from_reqwest)?;
        let envelope: ApiResponse<T> = response.json().map_err(from_reqwest)?;
        if let Some(message) = envelope.error_message {
            return Err(Error::Api(decode_entities(&message)));
        }
        Ok(envelope.items)
    }
}

/// Classify a transport error into the session taxonomy.
fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_connect() || e.is_timeout() {
        Error::Connectivity(e)
    } else if e.is_decode() {
        Error::Encoding(e)
    } else {
        Error::Api(e.to_string())
    }
}

// ============================================================================
// WIRE TYPES
// ============================================================================

/// Common envelope around every v2.3 response.
///
/// The path default keeps the derived impl free of a `T: Default`
/// bound; error responses omit `items` entirely.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionItem {
    question_id: u64,
    title: String,
    link: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    answer_count: u64,
    #[serde(default)]
    view_count: u64,
}

#[derive(Debug, Deserialize)]
struct AnswerItem {
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BadgeCounts {
    #[serde(default)]
    gold: u64,
    #[serde(default)]
    silver: u64,
    #[serde(default)]
    bronze: u64,
}

#[derive(Debug, Deserialize)]
struct UserItem {
    display_name: String,
    #[serde(default)]
    reputation: u64,
    #[serde(default)]
    badge_counts: BadgeCounts,
}

// ============================================================================
// RESPONSE → DOMAIN
// ============================================================================

/// Map API question items into session-stable summaries.
fn summaries_from_items(items: Vec<QuestionItem>) -> Vec<QuestionSummary> {
    items
        .into_iter()
        .take(RESULT_LIMIT)
        .enumerate()
        .map(|(index, item)| QuestionSummary {
            index,
            title: decode_entities(&item.title),
            excerpt: excerpt(
                &html_to_text(item.body.as_deref().unwrap_or_default()),
                EXCERPT_CHARS,
            ),
            link: item.link,
            question_id: item.question_id,
        })
        .collect()
}

/// Assemble a [`QuestionDetail`], enforcing the non-empty-answers rule.
fn detail_from_items(
    question: Option<QuestionItem>,
    answers: Vec<AnswerItem>,
) -> Result<QuestionDetail, Error> {
    let question = question.ok_or(Error::NoResults)?;
    let answers: Vec<String> = answers
        .into_iter()
        .filter_map(|a| a.body)
        .map(|body| html_to_text(&body))
        .filter(|text| !text.is_empty())
        .collect();
    if answers.is_empty() {
        return Err(Error::NoAnswers);
    }
    Ok(QuestionDetail {
        title: decode_entities(&question.title),
        description: html_to_text(question.body.as_deref().unwrap_or_default()),
        stats: format!(
            "Votes {} | {} answers | {} views",
            question.score, question.answer_count, question.view_count
        ),
        answers,
    })
}

fn profile_from_item(item: UserItem) -> UserProfile {
    UserProfile {
        display_name: decode_entities(&item.display_name),
        reputation: item.reputation,
        gold_badges: item.badge_counts.gold,
        silver_badges: item.badge_counts.silver,
        bronze_badges: item.badge_counts.bronze,
    }
}

// ============================================================================
// TESTS
// ============================================================================
