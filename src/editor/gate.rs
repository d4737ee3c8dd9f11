// src/editor/gate.rs
//
// Portão de senha antes do diretório da comunidade. É só cosmético:
// comparação de string fixa, sem hash, sem limite de tentativas.

use std::time::Duration;

use serde::Serialize;

use crate::{
    constants::{COMMUNITY_GATE_BRANCH, COMMUNITY_GATE_PASSWORD},
    services::notify::{Notifier, Toast},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Idle,
    Verifying,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    Granted { branch: String, redirect: String },
    Denied { state: GateState },
}

#[derive(Debug, Clone)]
pub struct GateModal {
    state: GateState,
    delay: Duration,
}

impl GateModal {
    pub fn new(delay: Duration) -> Self {
        Self { state: GateState::Idle, delay }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// idle -> verifying -> success | failure (-> idle).
    pub async fn submit<F>(&mut self, input: &str, notifier: &mut dyn Notifier, on_success: F) -> GateOutcome
    where
        F: FnOnce(&str),
    {
        self.state = GateState::Verifying;

        // A "chamada de API" é um atraso fixo.
        tokio::time::sleep(self.delay).await;

        if input.to_lowercase() == COMMUNITY_GATE_PASSWORD {
            self.state = GateState::Success;
            on_success(COMMUNITY_GATE_BRANCH);
            return GateOutcome::Granted {
                branch: COMMUNITY_GATE_BRANCH.to_string(),
                redirect: format!("/community/{COMMUNITY_GATE_BRANCH}"),
            };
        }

        self.state = GateState::Failure;
        notifier.notify(Toast::error("Access denied", "Incorrect password. Please try again."));
        self.state = GateState::Idle;
        GateOutcome::Denied { state: self.state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notify::{ToastBuffer, ToastLevel};

    #[tokio::test]
    async fn correct_password_grants_branch() {
        let mut gate = GateModal::new(Duration::ZERO);
        let mut toasts = ToastBuffer::default();
        let mut seen = None;

        let outcome = gate.submit("BagyaNagar", &mut toasts, |b| seen = Some(b.to_string())).await;

        assert_eq!(seen.as_deref(), Some("bagyanagar"));
        assert!(matches!(outcome, GateOutcome::Granted { ref branch, .. } if branch == "bagyanagar"));
        assert_eq!(gate.state(), GateState::Success);
        assert!(toasts.as_slice().is_empty());
    }

    #[tokio::test]
    async fn wrong_password_returns_to_idle_with_error_toast() {
        let mut gate = GateModal::new(Duration::ZERO);
        let mut toasts = ToastBuffer::default();
        let mut called = false;

        let outcome = gate.submit("hyderabad", &mut toasts, |_| called = true).await;

        assert!(!called);
        assert_eq!(outcome, GateOutcome::Denied { state: GateState::Idle });
        assert_eq!(gate.state(), GateState::Idle);
        assert_eq!(toasts.as_slice()[0].level, ToastLevel::Error);
    }
}
