//! Domain types for soterm.

use thiserror::Error;

// ============================================================================
// SEARCH RESULTS
// ============================================================================

/// One search hit: enough to render a list entry and fetch the full question.
///
/// Produced once per search, immutable for the life of the result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSummary {
    /// Position in the result set, 0-based, stable for the session.
    pub index: usize,
    /// Question title, plain text.
    pub title: String,
    /// Short plain-text excerpt of the question body.
    pub excerpt: String,
    /// Absolute URL of the question page.
    pub link: String,
    /// Stack Exchange question id, used to fetch answers.
    pub question_id: u64,
}

/// Full content of an opened question.
///
/// `answers` is never empty: the fetch layer rejects an empty answer list
/// with [`Error::NoAnswers`] before this is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDetail {
    pub title: String,
    /// Question body, converted to plain text.
    pub description: String,
    /// One-line stats summary ("Votes N | M answers | K views").
    pub stats: String,
    /// Answer bodies in display order (highest voted first), plain text.
    pub answers: Vec<String>,
}

// ============================================================================
// USER PROFILES
// ============================================================================

/// Public profile of a Stack Overflow user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub display_name: String,
    pub reputation: u64,
    pub gold_badges: u64,
    pub silver_badges: u64,
    pub bronze_badges: u64,
}

impl UserProfile {
    pub fn badge_total(&self) -> u64 {
        self.gold_badges + self.silver_badges + self.bronze_badges
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Everything that can end a soterm session early.
///
/// Each variant maps to a distinct process exit code so scripts can tell
/// "nothing matched" apart from "the network is down".
#[derive(Debug, Error)]
pub enum Error {
    #[error("No results found...")]
    NoResults,

    #[error("No answer found for this question...")]
    NoAnswers,

    #[error("Please check your internet connectivity...")]
    Connectivity(#[source] reqwest::Error),

    #[error(
        "Encoding error: the response could not be decoded.\n\
         Switch your terminal to a UTF-8 locale and try again."
    )]
    Encoding(#[source] reqwest::Error),

    #[error("Stack Exchange API error: {0}")]
    Api(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("Wrong syntax: {0}\nRun `soterm --help` for usage.")]
    Usage(String),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// 1 = no results / no answers, 2 = connectivity, 3 = everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NoResults | Error::NoAnswers => 1,
            Error::Connectivity(_) => 2,
            _ => 3,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_results_message_matches_user_facing_text() {
        assert_eq!(Error::NoResults.to_string(), "No results found...");
    }

    #[test]
    fn no_answers_message_matches_user_facing_text() {
        assert_eq!(
            Error::NoAnswers.to_string(),
            "No answer found for this question..."
        );
    }

    #[test]
    fn exit_codes_are_distinct_per_category() {
        assert_eq!(Error::NoResults.exit_code(), 1);
        assert_eq!(Error::NoAnswers.exit_code(), 1);
        assert_eq!(Error::Api("rate limited".into()).exit_code(), 3);
        assert_eq!(Error::Config("unwritable".into()).exit_code(), 3);
    }

    #[test]
    fn badge_total_sums_all_tiers() {
        let profile = UserProfile {
            display_name: "Jon".into(),
            reputation: 1_000_000,
            gold_badges: 3,
            silver_badges: 20,
            bronze_badges: 100,
        };
        assert_eq!(profile.badge_total(), 123);
    }
}
