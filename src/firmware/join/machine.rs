use statig::prelude::*;

use super::super::types::{JoinFailure, JoinOutcome, JoinState, NetEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum JoinAction {
    None,
    IssueJoin,
    Publish(JoinOutcome),
}

#[derive(Clone, Copy, Debug)]
pub(super) struct DispatchContext {
    pub(super) action: JoinAction,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self {
            action: JoinAction::None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct JoinMachine {
    pub(super) phase: JoinState,
    pub(super) retries: u8,
    pub(super) max_retries: u8,
}

impl JoinMachine {
    pub(super) fn new(max_retries: u8) -> Self {
        Self {
            phase: JoinState::Idle,
            retries: 0,
            max_retries,
        }
    }

    fn ignore(&self, event: &NetEvent) {
        log::trace!(
            "join: ignoring event={} state={}",
            event.as_str(),
            self.phase.as_str()
        );
    }
}

#[state_machine(initial = "State::idle()")]
impl JoinMachine {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &NetEvent) -> Outcome<State> {
        match event {
            NetEvent::StationStarted => {
                self.phase = JoinState::Joining;
                context.action = JoinAction::IssueJoin;
                Transition(State::joining())
            }
            _ => {
                self.ignore(event);
                Handled
            }
        }
    }

    #[state]
    fn joining(&mut self, context: &mut DispatchContext, event: &NetEvent) -> Outcome<State> {
        match *event {
            NetEvent::StationDisconnected { .. } => {
                self.retries = self.retries.saturating_add(1).min(self.max_retries);
                if self.retries < self.max_retries {
                    context.action = JoinAction::IssueJoin;
                    return Handled;
                }
                self.phase = JoinState::Failed;
                context.action = JoinAction::Publish(JoinOutcome::Failure(
                    JoinFailure::RetryLimitExceeded {
                        attempts: self.retries,
                    },
                ));
                Transition(State::failed())
            }
            NetEvent::AddressAcquired(address) => {
                self.retries = 0;
                self.phase = JoinState::Connected;
                context.action = JoinAction::Publish(JoinOutcome::Success(address));
                Transition(State::connected())
            }
            NetEvent::StationStarted => {
                self.ignore(event);
                Handled
            }
        }
    }

    #[state]
    fn connected(&mut self, context: &mut DispatchContext, event: &NetEvent) -> Outcome<State> {
        context.action = JoinAction::None;
        self.ignore(event);
        Handled
    }

    #[state]
    fn failed(&mut self, context: &mut DispatchContext, event: &NetEvent) -> Outcome<State> {
        context.action = JoinAction::None;
        self.ignore(event);
        Handled
    }
}
