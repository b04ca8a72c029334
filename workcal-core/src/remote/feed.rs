//! Calendar feed transport: one GET, no pagination.

use crate::error::{WorkCalError, WorkCalResult};

const GOOGLE_FEED_URL: &str = "https://calendar.google.com/calendar/ical";

#[derive(Debug, Clone)]
pub struct FeedSource {
    url: String,
    http: reqwest::Client,
}

impl FeedSource {
    /// Public feed of a Google calendar, from the two path segments of its iCal address.
    pub fn google(calendar_id: &str, calendar_name: &str) -> Self {
        Self::from_url(format!(
            "{GOOGLE_FEED_URL}/{calendar_id}@group.calendar.google.com/{calendar_name}/basic.ics"
        ))
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        FeedSource {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_text(&self) -> WorkCalResult<String> {
        tracing::info!(url = %self.url, "Fetching calendar feed");

        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| WorkCalError::Transport(format!("GET {}: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WorkCalError::Transport(format!("GET {}: HTTP {status}", self.url)));
        }

        resp.text()
            .await
            .map_err(|e| WorkCalError::Transport(format!("Could not read feed body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_feed_url() {
        let source = FeedSource::google("abc123", "private-0f9e");
        assert_eq!(
            source.url(),
            "https://calendar.google.com/calendar/ical/abc123@group.calendar.google.com/private-0f9e/basic.ics"
        );
    }
}
