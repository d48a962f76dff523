//! Lifetime of the video modal's page-level side effects.

use crate::logging::log_event;

/// Page-level hooks the modal needs while it is open.
pub trait ModalHost {
    fn lock_scroll(&mut self);
    fn unlock_scroll(&mut self);
    fn attach_escape_listener(&mut self);
    fn detach_escape_listener(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    Backdrop,
    CloseButton,
    Escape,
}

impl DismissReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backdrop => "backdrop",
            Self::CloseButton => "close_button",
            Self::Escape => "escape",
        }
    }
}

pub fn is_escape_key(key: &str) -> bool {
    key == "Escape" || key == "Esc"
}

/// Holds the scroll lock and the Escape listener for as long as it lives.
///
/// Dropping the session is the only release path, so every way the modal can
/// close (backdrop, button, Escape, unmount) restores scrolling.
pub struct ModalSession<H: ModalHost> {
    host: H,
    title: String,
}

impl<H: ModalHost> ModalSession<H> {
    pub fn open(mut host: H, title: &str) -> Self {
        host.lock_scroll();
        host.attach_escape_listener();
        log_event(
            log::Level::Debug,
            "modal_opened",
            serde_json::json!({ "title": title }),
        );

        Self {
            host,
            title: title.to_string(),
        }
    }
}

impl<H: ModalHost> Drop for ModalSession<H> {
    fn drop(&mut self) {
        self.host.detach_escape_listener();
        self.host.unlock_scroll();
        log_event(
            log::Level::Debug,
            "modal_closed",
            serde_json::json!({ "title": self.title }),
        );
    }
}
