//! Contact form state and the submission lifecycle.
//!
//! `Idle -> Sending -> Success | Error -> Idle`. The form relay is an opaque
//! cross-origin receiver: the request goes out in `no-cors` mode and its
//! response cannot be read, so a dispatch that does not raise counts as
//! delivered. Nothing here can confirm the message actually arrived.

use thiserror::Error;
use url::Url;

use crate::toast::ToastDraft;

pub const STATUS_RESET_MS: u32 = 3_000;
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const SERVICE_OPTIONS: [&str; 7] = [
    "Documentary",
    "Commercial",
    "Music Video",
    "Short Film",
    "Corporate Video",
    "Brand Film",
    "Other",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Service,
    Message,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Service => "service",
            Self::Message => "message",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

impl ContactDraft {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Service => self.service = value,
            Field::Message => self.message = value,
        }
    }

    /// Form-encoded body with the four fields in a fixed order.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair(Field::Name.as_str(), &self.name)
            .append_pair(Field::Email.as_str(), &self.email)
            .append_pair(Field::Service.as_str(), &self.service)
            .append_pair(Field::Message.as_str(), &self.message)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

impl SubmitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sending => "sending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Sending => "Sending…",
            Self::Success => "✓ Message Sent",
            Self::Idle | Self::Error => "Send Message →",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("form relay endpoint is not configured")]
    NotConfigured,
    #[error("a submission is already in flight")]
    Busy,
    #[error("dispatch failed: {0}")]
    Dispatch(String),
}

impl SubmitError {
    pub fn class(&self) -> &'static str {
        match self {
            Self::NotConfigured => "config_missing",
            Self::Busy => "busy",
            Self::Dispatch(_) => "dispatch_failed",
        }
    }

    pub fn toast(&self) -> ToastDraft {
        match self {
            Self::NotConfigured => ToastDraft::error(
                "Not Configured",
                "The contact form relay URL has not been set for this site.",
            ),
            Self::Busy => ToastDraft::error(
                "Still Sending",
                "Your previous message is still on its way.",
            ),
            Self::Dispatch(_) => ToastDraft::error(
                "Send Failed",
                "Something went wrong. Please email me directly.",
            ),
        }
    }
}

pub fn sent_toast() -> ToastDraft {
    ToastDraft::success(
        "Message Sent!",
        "Thanks for reaching out. I'll be in touch within 24 hours.",
    )
}

/// Everything needed to dispatch one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub attempt: u32,
    pub endpoint: Url,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactAction {
    Edit(Field, String),
    Begin { attempt: u32 },
    Finish { attempt: u32, outcome: Result<(), SubmitError> },
    Reset { attempt: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactState {
    pub draft: ContactDraft,
    pub status: SubmitStatus,
    /// Number of the latest submission; outcomes and resets for older
    /// attempts are ignored.
    pub attempt: u32,
}

impl ContactState {
    /// Checks whether a submission may start and packages it.
    pub fn prepare(&self, relay: Option<&Url>) -> Result<Submission, SubmitError> {
        let endpoint = relay.ok_or(SubmitError::NotConfigured)?;

        if self.status == SubmitStatus::Sending {
            return Err(SubmitError::Busy);
        }

        Ok(Submission {
            attempt: self.attempt.wrapping_add(1),
            endpoint: endpoint.clone(),
            body: self.draft.encode(),
        })
    }

    pub fn apply(&self, action: ContactAction) -> Self {
        let mut next = self.clone();

        match action {
            ContactAction::Edit(field, value) => next.draft.set(field, value),
            ContactAction::Begin { attempt } => {
                if self.status == SubmitStatus::Sending {
                    return next;
                }
                next.attempt = attempt;
                next.status = SubmitStatus::Sending;
            }
            ContactAction::Finish { attempt, outcome } => {
                if attempt != self.attempt || self.status != SubmitStatus::Sending {
                    return next;
                }
                match outcome {
                    Ok(()) => {
                        next.status = SubmitStatus::Success;
                        next.draft = ContactDraft::default();
                    }
                    Err(_) => next.status = SubmitStatus::Error,
                }
            }
            ContactAction::Reset { attempt } => {
                if attempt == self.attempt && self.status != SubmitStatus::Sending {
                    next.status = SubmitStatus::Idle;
                }
            }
        }

        next
    }

    pub fn is_sending(&self) -> bool {
        self.status == SubmitStatus::Sending
    }

    /// Attempt whose outcome is on display and due for a reset after
    /// [`STATUS_RESET_MS`].
    pub fn pending_reset(&self) -> Option<u32> {
        match self.status {
            SubmitStatus::Success | SubmitStatus::Error => Some(self.attempt),
            SubmitStatus::Idle | SubmitStatus::Sending => None,
        }
    }
}
