//! Pure state transition function.
//!
//! Given the poller state and the outcome of one cycle, decide the next state
//! and what should happen. No I/O happens here.

use super::effect::{Effect, LogLevel};
use super::event::Event;
use super::state::PollState;

/// Text sent to the chat when a cycle fails.
pub fn failure_message(error: &str) -> String {
    format!("Program failure: {}", error)
}

/// Result of a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub state: PollState,
    /// Effects to execute, in order.
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: PollState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }
}

fn log(level: LogLevel, message: impl Into<String>) -> Effect {
    Effect::Log {
        level,
        message: message.into(),
    }
}

pub fn transition(state: PollState, event: Event) -> TransitionResult {
    match event {
        Event::StatusReported {
            message,
            current_date,
        } => {
            let cursor = state.next_cursor(current_date);

            if state.last_message.as_deref() == Some(message.as_str()) {
                TransitionResult::new(
                    PollState { cursor, ..state },
                    vec![log(
                        LogLevel::Debug,
                        "Status has not changed, checking again after the retry period",
                    )],
                )
            } else {
                TransitionResult::new(
                    PollState {
                        cursor,
                        last_message: Some(message.clone()),
                        ..state
                    },
                    vec![
                        log(LogLevel::Info, "Homework status changed, notifying"),
                        Effect::Notify { message },
                    ],
                )
            }
        }

        Event::NoHomework { current_date } => {
            let cursor = state.next_cursor(current_date);
            TransitionResult::new(
                PollState { cursor, ..state },
                vec![log(
                    LogLevel::Info,
                    "No homework updates in the requested period",
                )],
            )
        }

        // The remembered status is kept so a recovered API does not re-send it
        Event::CycleFailed { error } => {
            let message = failure_message(&error);
            TransitionResult::new(
                state,
                vec![log(LogLevel::Error, message.clone()), Effect::Notify { message }],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::state::CursorPolicy;
    use proptest::prelude::*;

    fn reported(message: &str) -> Event {
        Event::StatusReported {
            message: message.to_string(),
            current_date: Some(2000),
        }
    }

    fn notifications(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Notify { message } => Some(message.as_str()),
                Effect::Log { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_first_status_notifies_and_is_remembered() {
        let state = PollState::new(1000, CursorPolicy::Fixed);
        let result = transition(state, reported("A"));

        assert_eq!(notifications(&result.effects), vec!["A"]);
        assert_eq!(result.state.last_message.as_deref(), Some("A"));
        assert_eq!(result.state.cursor, 1000);
    }

    #[test]
    fn test_repeated_status_is_skipped() {
        let state = PollState::new(1000, CursorPolicy::Fixed);
        let first = transition(state, reported("A"));
        let second = transition(first.state, reported("A"));

        assert!(notifications(&second.effects).is_empty());
        assert_eq!(
            second.effects,
            vec![Effect::Log {
                level: LogLevel::Debug,
                message: "Status has not changed, checking again after the retry period"
                    .to_string(),
            }]
        );
        assert_eq!(second.state.last_message.as_deref(), Some("A"));
    }

    #[test]
    fn test_changed_status_notifies_again() {
        let state = PollState::new(1000, CursorPolicy::Fixed);
        let first = transition(state, reported("A"));
        let second = transition(first.state, reported("B"));

        assert_eq!(notifications(&second.effects), vec!["B"]);
        assert_eq!(second.state.last_message.as_deref(), Some("B"));
    }

    #[test]
    fn test_no_homework_logs_and_keeps_state() {
        let state = PollState::new(1000, CursorPolicy::Fixed);
        let result = transition(state.clone(), Event::NoHomework { current_date: None });

        assert_eq!(result.state, state);
        assert!(notifications(&result.effects).is_empty());
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::Log {
                level: LogLevel::Info,
                ..
            }]
        ));
    }

    #[test]
    fn test_failure_reports_and_keeps_last_message() {
        let state = PollState {
            cursor: 1000,
            cursor_policy: CursorPolicy::FollowServer,
            last_message: Some("A".to_string()),
        };
        let result = transition(
            state.clone(),
            Event::CycleFailed {
                error: "review API request was not successful, response code: 503".to_string(),
            },
        );

        assert_eq!(result.state, state);
        assert_eq!(
            notifications(&result.effects),
            vec!["Program failure: review API request was not successful, response code: 503"]
        );
        assert!(matches!(
            result.effects[0],
            Effect::Log {
                level: LogLevel::Error,
                ..
            }
        ));
    }

    #[test]
    fn test_follow_server_cursor_advances_on_valid_responses() {
        let state = PollState::new(1000, CursorPolicy::FollowServer);

        let result = transition(
            state,
            Event::NoHomework {
                current_date: Some(1500),
            },
        );
        assert_eq!(result.state.cursor, 1500);

        let result = transition(result.state, reported("A"));
        assert_eq!(result.state.cursor, 2000);

        let result = transition(
            result.state,
            Event::CycleFailed {
                error: "boom".to_string(),
            },
        );
        assert_eq!(result.state.cursor, 2000);
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            3 => prop_oneof![Just("A"), Just("B"), Just("C")].prop_map(reported),
            1 => Just(Event::NoHomework { current_date: None }),
            1 => "[a-z ]{1,10}".prop_map(|error| Event::CycleFailed { error }),
        ]
    }

    proptest! {
        /// Property: a status message is delivered exactly when it differs from
        /// the last delivered one, no matter what happens in between.
        #[test]
        fn status_notified_only_on_change(events in proptest::collection::vec(arb_event(), 0..40)) {
            let mut state = PollState::new(0, CursorPolicy::Fixed);
            let mut last_sent: Option<String> = None;

            for event in events {
                let expected = match &event {
                    Event::StatusReported { message, .. } if last_sent.as_ref() != Some(message) => {
                        last_sent = Some(message.clone());
                        vec![message.clone()]
                    }
                    Event::CycleFailed { error } => vec![failure_message(error)],
                    _ => vec![],
                };

                let result = transition(state, event);
                let sent: Vec<String> = notifications(&result.effects)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                prop_assert_eq!(sent, expected);

                state = result.state;
                prop_assert_eq!(&state.last_message, &last_sent);
            }
        }
    }
}
