// src/services/notify.rs
//
// Colaboradores "dispare e esqueça": toasts para a UI e o coletor de exceções.
// Nenhum retorno deles é usado pela lógica de negócio.

use serde::Serialize;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
}

impl Toast {
    pub fn new(level: ToastLevel, title: &str, message: impl Into<String>) -> Self {
        Self { level, title: title.to_string(), message: message.into() }
    }

    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, title, message)
    }

    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, title, message)
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, title, message)
    }
}

pub trait Notifier: Send {
    fn notify(&mut self, toast: Toast);
}

/// Acumula os toasts de uma sessão até a próxima resposta.
#[derive(Debug, Clone, Default)]
pub struct ToastBuffer(Vec<Toast>);

impl ToastBuffer {
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.0)
    }

    pub fn as_slice(&self) -> &[Toast] {
        &self.0
    }
}

impl Notifier for ToastBuffer {
    fn notify(&mut self, toast: Toast) {
        tracing::debug!(level = ?toast.level, title = %toast.title, "toast");
        self.0.push(toast);
    }
}

/// Coletor de exceções.
pub trait ErrorReporter: Send + Sync {
    fn capture(&self, error: &AppError, context: &str);
}

#[derive(Debug, Clone, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn capture(&self, error: &AppError, context: &str) {
        tracing::error!(context, error = %error, "🔥 exceção capturada");
    }
}
