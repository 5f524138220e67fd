use std::time::{Duration, Instant};

use serde_json::{json, Value};

use crate::adapters::object_store::ObjectStore;
use crate::logging::{log_error, log_info};
use crate::runtime::contract::{decode_text_request, InvocationResponse};
use crate::runtime::frequency::{TopWords, WordFrequencyTable, DEFAULT_TOP_N};
use crate::runtime::storage::{
    content_fingerprint, ObjectLocation, DEFAULT_URL_EXPIRY_SECS, MAX_URL_EXPIRY_SECS,
};

pub const BUCKET_ENV: &str = "TOP_WORDS_BUCKET";
pub const OBJECT_KEY_ENV: &str = "TOP_WORDS_OBJECT_KEY";
pub const URL_EXPIRY_ENV: &str = "TOP_WORDS_URL_EXPIRY_SECS";
pub const TOP_N_ENV: &str = "TOP_WORDS_LIMIT";

const COMPONENT: &str = "top_words_handler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub location: ObjectLocation,
    pub top_n: usize,
    pub url_expiry: Duration,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            location: ObjectLocation::default(),
            top_n: DEFAULT_TOP_N,
            url_expiry: Duration::from_secs(DEFAULT_URL_EXPIRY_SECS),
        }
    }
}

impl HandlerConfig {
    /// Builds a config from defaults, overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(bucket) = lookup(BUCKET_ENV) {
            config.location.bucket = non_blank(BUCKET_ENV, bucket)?;
        }
        if let Some(key) = lookup(OBJECT_KEY_ENV) {
            config.location.key = non_blank(OBJECT_KEY_ENV, key)?;
        }
        if let Some(raw) = lookup(URL_EXPIRY_ENV) {
            let seconds = positive_integer(URL_EXPIRY_ENV, &raw)?;
            if seconds > MAX_URL_EXPIRY_SECS {
                return Err(format!(
                    "{URL_EXPIRY_ENV} must not exceed {MAX_URL_EXPIRY_SECS} seconds"
                ));
            }
            config.url_expiry = Duration::from_secs(seconds);
        }
        if let Some(raw) = lookup(TOP_N_ENV) {
            let limit = positive_integer(TOP_N_ENV, &raw)?;
            config.top_n = usize::try_from(limit)
                .map_err(|_| format!("{TOP_N_ENV} is too large for this platform"))?;
        }

        Ok(config)
    }

    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

fn non_blank(name: &str, value: String) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} cannot be blank"));
    }
    Ok(trimmed.to_string())
}

fn positive_integer(name: &str, raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(format!("{name} must be a positive integer")),
        Ok(value) => Ok(value),
        Err(error) => Err(format!("{name} must be a positive integer: {error}")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopWordsOutcome {
    pub download_url: String,
    pub top_words: TopWords,
    pub content_fingerprint: String,
}

/// Decodes, ranks, stores, and presigns. The first failing step aborts the rest.
///
/// A successful write is not rolled back when presigning fails afterwards.
pub fn process_event(
    event: &Value,
    config: &HandlerConfig,
    store: &impl ObjectStore,
) -> Result<TopWordsOutcome, String> {
    let request = decode_text_request(event).map_err(|error| error.message().to_string())?;

    let table = WordFrequencyTable::from_text(&request.text);
    let top_words = table.top(config.top_n);
    let body = top_words.to_json_bytes()?;
    let fingerprint = content_fingerprint(&body);

    store.put_object(&config.location, &body)?;
    log_info(
        COMPONENT,
        "top_words_stored",
        json!({
            "location": config.location.to_string(),
            "total_tokens": table.total_tokens(),
            "distinct_tokens": table.distinct_tokens(),
            "entries": top_words.len(),
            "bytes": body.len(),
            "content_fingerprint": fingerprint.clone(),
        }),
    );

    let download_url = store.presign_get_url(&config.location, config.url_expiry)?;

    Ok(TopWordsOutcome {
        download_url,
        top_words,
        content_fingerprint: fingerprint,
    })
}

/// Runs [`process_event`] behind a single catch-all boundary.
///
/// Every failure, whether bad input or an unavailable backend, becomes a 500
/// response carrying the error message.
pub fn handle_event(
    event: &Value,
    config: &HandlerConfig,
    store: &impl ObjectStore,
) -> InvocationResponse {
    let started_at = Instant::now();
    log_info(
        COMPONENT,
        "request_started",
        json!({ "location": config.location.to_string() }),
    );

    match process_event(event, config, store) {
        Ok(outcome) => {
            log_info(
                COMPONENT,
                "request_completed",
                json!({
                    "duration_ms": started_at.elapsed().as_millis(),
                    "entries": outcome.top_words.len(),
                    "url_expiry_secs": config.url_expiry.as_secs(),
                }),
            );
            InvocationResponse::success(&outcome.download_url)
        }
        Err(message) => {
            log_error(
                COMPONENT,
                "request_failed",
                json!({
                    "duration_ms": started_at.elapsed().as_millis(),
                    "error": message.clone(),
                }),
            );
            InvocationResponse::failure(&message)
        }
    }
}
