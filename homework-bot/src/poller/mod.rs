//! The poll loop.
//!
//! Each cycle fetches the review API, validates the payload, formats the
//! latest homework and hands the outcome to the pure [`transition`] function.
//! The resulting effects are executed here. Errors never escape a cycle: they
//! become [`Event::CycleFailed`] and are reported to the chat.

pub mod effect;
pub mod event;
pub mod state;
pub mod transition;

pub use effect::{Effect, LogLevel};
pub use event::Event;
pub use state::{CursorPolicy, PollState};
pub use transition::{failure_message, transition, TransitionResult};

use homework_core::{check_response, format_status};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::{Config, DEFAULT_RETRY_PERIOD};
use crate::error::PollError;
use crate::notifier::Notifier;
use crate::practicum::HomeworkSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    /// Initial `from_date` cursor (unix seconds).
    pub from_date: i64,
    pub retry_period: Duration,
    pub cursor_policy: CursorPolicy,
}

impl PollerSettings {
    pub fn new(from_date: i64) -> Self {
        Self {
            from_date,
            retry_period: DEFAULT_RETRY_PERIOD,
            cursor_policy: CursorPolicy::Fixed,
        }
    }

    pub fn from_config(config: &Config, from_date: i64) -> Self {
        Self {
            from_date,
            retry_period: config.retry_period,
            cursor_policy: config.cursor_policy,
        }
    }
}

pub struct Poller<S, N> {
    source: S,
    notifier: N,
    state: PollState,
    retry_period: Duration,
}

impl<S: HomeworkSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, settings: PollerSettings) -> Self {
        Self {
            source,
            notifier,
            state: PollState::new(settings.from_date, settings.cursor_policy),
            retry_period: settings.retry_period,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one fetch/validate/format/compare/notify cycle. Does not sleep.
    pub async fn poll_once(&mut self) {
        let event = self.observe().await;
        let result = transition(self.state.clone(), event);
        self.state = result.state;
        self.execute_effects(result.effects).await;
    }

    /// Poll forever, sleeping the retry period between cycles.
    ///
    /// `shutdown` is only checked while sleeping; a cycle in progress always
    /// runs to completion.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            self.poll_once().await;

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping poller");
                    return;
                }
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }
    }

    async fn observe(&self) -> Event {
        match self.check_latest().await {
            Ok(event) => event,
            Err(e) => Event::CycleFailed {
                error: e.to_string(),
            },
        }
    }

    async fn check_latest(&self) -> Result<Event, PollError> {
        let response = self.source.fetch_homeworks(self.state.cursor).await?;
        let page = check_response(&response)?;
        let current_date = page.current_date();

        let Some(homework) = page.latest() else {
            return Ok(Event::NoHomework { current_date });
        };
        if page.homeworks().len() > 1 {
            debug!(
                "Response lists {} homeworks, reporting the latest only",
                page.homeworks().len()
            );
        }

        let message = format_status(homework)?;
        Ok(Event::StatusReported {
            message,
            current_date,
        })
    }

    async fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notify { message } => self.notifier.notify(&message).await,
                Effect::Log { level, message } => match level {
                    LogLevel::Debug => debug!("{}", message),
                    LogLevel::Info => info!("{}", message),
                    LogLevel::Error => error!("{}", message),
                },
            }
        }
    }
}
