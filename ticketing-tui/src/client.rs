use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use ticketing_core::{configuration::Configuration, TicketingError};

use crate::settings::Settings;

/// Thin wrapper around the backend's HTTP API.
///
/// Only the connect phase can time out (when configured). A backend that
/// accepts the connection and never answers keeps the request pending.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(settings: &Settings) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(timeout));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: settings.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `POST /configurations`. Any non-2xx answer counts as a failure.
    pub async fn save_configuration(&self, config: &Configuration) -> Result<(), TicketingError> {
        self.http
            .post(self.url("configurations"))
            .json(config)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map(|_| ())
            .map_err(|err| TicketingError::Submit(err.to_string()))
    }

    /// `GET /tickets/start`. Only asks the backend to begin a run, the
    /// event stream is opened separately.
    pub async fn start_simulation(&self) -> Result<(), TicketingError> {
        self.get("tickets/start")
            .await
            .map_err(|err| TicketingError::StartRequest(err.to_string()))
    }

    pub async fn stop_simulation(&self) -> Result<(), TicketingError> {
        self.get("tickets/stop")
            .await
            .map_err(|err| TicketingError::StopRequest(err.to_string()))
    }

    /// `GET /tickets` as an event stream. The response body is the stream.
    pub async fn open_event_stream(&self) -> Result<reqwest::Response, TicketingError> {
        self.http
            .get(self.url("tickets"))
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| TicketingError::StreamTransport(err.to_string()))
    }

    async fn get(&self, path: &str) -> reqwest::Result<()> {
        let response = self.http.get(self.url(path)).send().await?.error_for_status()?;
        log::debug!("GET {} answered {}", path, response.status());
        Ok(())
    }
}
