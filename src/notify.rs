use crate::controller::Route;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// How long a message stays visible.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Info,
    Error,
}

/// Text, background and border colors for a message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

impl MessageKind {
    pub fn palette(self) -> Palette {
        match self {
            MessageKind::Success => Palette {
                text: "#155724",
                background: "#d4edda",
                border: "#c3e6cb",
            },
            MessageKind::Error => Palette {
                text: "#721c24",
                background: "#f8d7da",
                border: "#f5c6cb",
            },
            MessageKind::Info => Palette {
                text: "#004085",
                background: "#cce5ff",
                border: "#b8daff",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLink {
    pub label: String,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
    pub link: Option<MessageLink>,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            link: None,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, text)
    }

    pub fn with_link(mut self, label: impl Into<String>, route: Route) -> Self {
        self.link = Some(MessageLink {
            label: label.into(),
            route,
        });
        self
    }
}

pub trait Notifier {
    fn notify(&self, message: Message);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: Message,
    pub shown_at: Instant,
}

impl Notice {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < MESSAGE_TIMEOUT
    }
}

/// Holds the most recent message. A new message replaces the current one and
/// restarts its timeout.
#[derive(Debug, Default)]
pub struct MessageArea {
    current: Mutex<Option<Notice>>,
}

impl MessageArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_at(&self, message: Message, now: Instant) {
        match message.kind {
            MessageKind::Error => warn!("message ({:?}): {}", message.kind, message.text),
            _ => info!("message ({:?}): {}", message.kind, message.text),
        }
        *self.slot() = Some(Notice {
            message,
            shown_at: now,
        });
    }

    /// Last message shown, regardless of its timeout.
    pub fn last(&self) -> Option<Notice> {
        self.slot().clone()
    }

    pub fn visible_at(&self, now: Instant) -> Option<Message> {
        self.slot()
            .as_ref()
            .filter(|notice| notice.is_visible_at(now))
            .map(|notice| notice.message.clone())
    }

    pub fn visible(&self) -> Option<Message> {
        self.visible_at(Instant::now())
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Notice>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for MessageArea {
    fn notify(&self, message: Message) {
        self.show_at(message, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_hides_after_timeout() {
        let area = MessageArea::new();
        let shown = Instant::now();
        area.show_at(Message::success("saved"), shown);

        assert!(area.visible_at(shown + Duration::from_secs(4)).is_some());
        assert!(area.visible_at(shown + MESSAGE_TIMEOUT).is_none());
        assert!(area.last().is_some());
    }

    #[test]
    fn new_message_overwrites_and_restarts_timeout() {
        let area = MessageArea::new();
        let first = Instant::now();
        area.show_at(Message::new(MessageKind::Info, "first"), first);
        let second = first + Duration::from_secs(3);
        area.show_at(Message::error("second"), second);

        let visible = area.visible_at(first + Duration::from_secs(6)).unwrap();
        assert_eq!(visible.text, "second");
        assert_eq!(visible.kind, MessageKind::Error);
    }

    #[test]
    fn palettes_are_distinct() {
        assert_ne!(MessageKind::Success.palette(), MessageKind::Error.palette());
        assert_eq!(MessageKind::Error.palette().text, "#721c24");
    }
}
