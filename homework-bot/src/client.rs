use anyhow::{Context, Result};
use homework_core::ServiceType;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use std::time::Duration;

use crate::recording::{RecordingLogger, RecordingMiddleware};
use crate::user_agent;

/// Build the HTTP client shared by the API wrappers, with recording attached
/// when a logger is supplied. `timeout` bounds each whole request; `None`
/// waits indefinitely.
pub fn create_http_client(
    service_type: ServiceType,
    recording_logger: Option<RecordingLogger>,
    timeout: Option<Duration>,
) -> Result<ClientWithMiddleware> {
    let mut client = Client::builder().user_agent(user_agent());
    if let Some(timeout) = timeout {
        client = client.timeout(timeout);
    }
    let client = client.build().context("Failed to create HTTP client")?;

    let mut builder = ClientBuilder::new(client);

    if let Some(logger) = recording_logger {
        builder = builder.with(RecordingMiddleware::new(logger, service_type));
    }

    Ok(builder.build())
}
