use anyhow::{anyhow, Context, Result};
use rand::seq::SliceRandom;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://opentdb.com";

/// Client for the opentdb.com trivia endpoint.
#[derive(Clone)]
pub struct TriviaService {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    results: Vec<TriviaQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub category: String,
    pub difficulty: String,
}

impl TriviaQuestion {
    /// All answers in shuffled presentation order.
    pub fn shuffled_answers(&self) -> Vec<String> {
        let mut answers = self.incorrect_answers.clone();
        answers.push(self.correct_answer.clone());
        answers.shuffle(&mut rand::thread_rng());
        answers
    }
}

impl TriviaService {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches one multiple-choice question.
    pub async fn question(&self) -> Result<TriviaQuestion> {
        let url = format!("{}/api.php", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("amount", "1"), ("type", "multiple")])
            .send()
            .await
            .context("trivia request failed")?
            .error_for_status()
            .context("trivia provider returned an error status")?;

        let body = response
            .json::<TriviaResponse>()
            .await
            .context("failed to decode trivia response")?;

        if body.response_code != 0 {
            return Err(anyhow!(
                "trivia provider response code {}",
                body.response_code
            ));
        }

        body.results
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("trivia provider returned no questions"))
    }
}

pub fn format_question(question: &TriviaQuestion) -> String {
    format!(
        "🎯 Trivia Question\n\n\
         Category: {}\n\
         Difficulty: {}\n\n\
         Question: {}\n\n\
         Select your answer:",
        question.category,
        capitalize(&question.difficulty),
        question.question,
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Fixed apology shown when the provider fails.
pub const UNAVAILABLE_MESSAGE: &str =
    "Failed to fetch a trivia question. Please try again.";
