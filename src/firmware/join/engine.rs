use statig::blocking::IntoStateMachineExt as _;

use super::super::types::{JoinState, NetEvent, MAX_JOIN_RETRIES};
use super::machine::{DispatchContext, JoinAction, JoinMachine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct JoinStep {
    pub(crate) before: JoinState,
    pub(crate) after: JoinState,
    pub(crate) retries: u8,
    pub(super) action: JoinAction,
}

impl JoinStep {
    pub(crate) fn transitioned(self) -> bool {
        self.before != self.after
    }
}

/// Owned join bookkeeping: the state machine plus its retry counter.
///
/// Only the supervisor's consumer loop touches an engine, so the counter has a
/// single writer and needs no synchronization.
pub struct JoinEngine {
    machine: statig::blocking::StateMachine<JoinMachine>,
}

impl JoinEngine {
    pub fn new() -> Self {
        Self {
            machine: JoinMachine::new(MAX_JOIN_RETRIES).state_machine(),
        }
    }

    pub fn state(&self) -> JoinState {
        self.machine.inner().phase
    }

    pub fn retries(&self) -> u8 {
        self.machine.inner().retries
    }

    pub(crate) fn apply(&mut self, event: NetEvent) -> JoinStep {
        let before = self.state();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        JoinStep {
            before,
            after: self.state(),
            retries: self.retries(),
            action: context.action,
        }
    }
}

impl Default for JoinEngine {
    fn default() -> Self {
        Self::new()
    }
}
