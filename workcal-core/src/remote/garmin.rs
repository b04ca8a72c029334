//! Garmin Connect workout and calendar services.

use chrono::NaiveDate;
use reqwest::header::{AUTHORIZATION, COOKIE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::GarminConfig;
use crate::error::{WorkCalError, WorkCalResult};
use crate::remote::{RemoteWorkout, ScheduleDocument, WorkoutGateway};
use crate::workout::WorkoutDocument;

const WORKOUT_SERVICE: &str = "proxy/workout-service";
const CALENDAR_SERVICE: &str = "proxy/calendar-service";

#[derive(Serialize)]
struct ScheduleRequest {
    date: String,
}

/// HTTP gateway authenticated with an existing Garmin Connect session.
pub struct GarminGateway {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

fn header_value(value: &str, what: &str) -> WorkCalResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| WorkCalError::Config(format!("garmin.{what} contains characters not allowed in a header")))
}

impl GarminGateway {
    pub fn new(config: &GarminConfig) -> WorkCalResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("nk", HeaderValue::from_static("NT"));

        match (&config.session_cookie, &config.bearer_token) {
            (None, None) => {
                return Err(WorkCalError::Config(
                    "No Garmin credentials: set garmin.session_cookie or garmin.bearer_token".into(),
                ));
            }
            (cookie, token) => {
                if let Some(cookie) = cookie {
                    headers.insert(COOKIE, header_value(cookie, "session_cookie")?);
                }
                if let Some(token) = token {
                    headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"), "bearer_token")?);
                }
            }
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| WorkCalError::Gateway(format!("Could not build HTTP client: {e}")))?;

        Ok(GarminGateway {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.max(1),
        })
    }

    fn url(&self, service: &str, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, service, path)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> WorkCalResult<Response> {
        let resp = request
            .send()
            .await
            .map_err(|e| WorkCalError::Gateway(format!("{what}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WorkCalError::Gateway(format!("{what}: HTTP {status} {body}")));
        }

        Ok(resp)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> WorkCalResult<T> {
        self.send(request, what)
            .await?
            .json()
            .await
            .map_err(|e| WorkCalError::Serialization(format!("{what}: {e}")))
    }
}

impl WorkoutGateway for GarminGateway {
    async fn list_workouts(&self) -> WorkCalResult<Vec<RemoteWorkout>> {
        let mut workouts = Vec::new();
        let mut start = 0;

        loop {
            let request = self
                .http
                .get(self.url(WORKOUT_SERVICE, "workouts"))
                .query(&[("start", start), ("limit", self.page_size)]);
            let page: Vec<RemoteWorkout> = self.json(request, "list workouts").await?;

            if page.is_empty() {
                break;
            }
            tracing::debug!(start, count = page.len(), "Fetched workout page");
            workouts.extend(page);
            start += self.page_size;
        }

        Ok(workouts)
    }

    async fn get_schedule(&self, year: i32, month: u32) -> WorkCalResult<ScheduleDocument> {
        // The calendar service numbers months from 0
        let path = format!("year/{year}/month/{}", month.saturating_sub(1));
        let request = self.http.get(self.url(CALENDAR_SERVICE, &path));
        self.json(request, "get schedule").await
    }

    async fn create_workout(&self, workout: &WorkoutDocument) -> WorkCalResult<RemoteWorkout> {
        let request = self
            .http
            .post(self.url(WORKOUT_SERVICE, "workout"))
            .json(&workout.to_payload());
        self.json(request, "create workout").await
    }

    async fn delete_workout(&self, workout_id: i64) -> WorkCalResult<()> {
        let request = self
            .http
            .delete(self.url(WORKOUT_SERVICE, &format!("workout/{workout_id}")));
        self.send(request, "delete workout").await?;
        Ok(())
    }

    async fn schedule_workout(&self, workout_id: i64, date: NaiveDate) -> WorkCalResult<()> {
        let request = self
            .http
            .post(self.url(WORKOUT_SERVICE, &format!("schedule/{workout_id}")))
            .json(&ScheduleRequest {
                date: date.format("%Y-%m-%d").to_string(),
            });
        self.send(request, "schedule workout").await?;
        Ok(())
    }
}
