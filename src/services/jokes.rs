use anyhow::{anyhow, Context, Result};
use rand::seq::SliceRandom;
use serde::Deserialize;

const JOKE_ENDPOINTS: &[&str] = &[
    "https://official-joke-api.appspot.com/random_joke",
    "https://v2.jokeapi.dev/joke/Any?blacklistFlags=nsfw,religious,political,racist,sexist&type=twopart",
];

/// Client for the two public joke APIs; one is picked at random per call
/// and both response shapes are normalized to [`Joke`].
#[derive(Clone)]
pub struct JokeService {
    client: reqwest::Client,
}

/// A setup/punchline pair regardless of which provider produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JokeResponse {
    Classic { setup: String, punchline: String },
    TwoPart { setup: String, delivery: String },
}

impl From<JokeResponse> for Joke {
    fn from(response: JokeResponse) -> Self {
        match response {
            JokeResponse::Classic { setup, punchline } => Joke { setup, punchline },
            JokeResponse::TwoPart { setup, delivery } => Joke {
                setup,
                punchline: delivery,
            },
        }
    }
}

impl JokeService {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn random_joke(&self) -> Result<Joke> {
        let endpoint = *JOKE_ENDPOINTS
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| anyhow!("no joke endpoints configured"))?;

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .context("joke request failed")?
            .error_for_status()
            .context("joke provider returned an error status")?;

        let joke = response
            .json::<JokeResponse>()
            .await
            .context("failed to decode joke response")?;

        Ok(joke.into())
    }
}

pub fn format_joke(joke: &Joke) -> String {
    format!("😂 Joke Time!\n\n{}\n\n🤣 {}", joke.setup, joke.punchline)
}

/// Fixed apology shown when both joke providers are unreachable or broken.
pub const UNAVAILABLE_MESSAGE: &str =
    "Sorry, I couldn't fetch a joke right now. Please try again later.";
