//! Transient corner notifications.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at_ms: i64,
}

/// Queue of live toasts. Each toast is shown for `visible_ms`, then animates out for
/// `exit_ms` before it is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toaster {
    next_id: u64,
    toasts: Vec<Toast>,
    visible_ms: i64,
    exit_ms: i64,
}

impl Toaster {
    pub fn new(visible_ms: i64, exit_ms: i64) -> Self {
        Self {
            next_id: 1,
            toasts: Vec::new(),
            visible_ms,
            exit_ms,
        }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>, now_ms: i64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            level,
            message: message.into(),
            created_at_ms: now_ms,
        });
        id
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Drops toasts whose exit animation has finished. Returns how many were removed.
    pub fn prune(&mut self, now_ms: i64) -> usize {
        let lifetime = self.visible_ms + self.exit_ms;
        let before = self.toasts.len();
        self.toasts
            .retain(|toast| now_ms - toast.created_at_ms < lifetime);
        before - self.toasts.len()
    }

    pub fn render(&self, now_ms: i64) -> Vec<ToastView> {
        self.toasts
            .iter()
            .map(|toast| ToastView {
                id: toast.id,
                level: toast.level,
                message: toast.message.clone(),
                leaving: now_ms - toast.created_at_ms >= self.visible_ms,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastView {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    /// True while the exit animation plays.
    pub leaving: bool,
}
