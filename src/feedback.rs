//! The feedback tray holds the transient messages ("Note added successfully!",
//! "Failed to delete note", ...) shown to the user after remote operations.
//!
//! Showing a message never blocks: it's pushed into the tray, handed to any
//! bound listeners (a UI adapter printing it, for instance) and dropped from
//! the tray once its dismiss interval is up.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use config;

/// Whether a message reports a success or a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Error,
}

/// One message in the tray
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub tone: Tone,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_error(&self) -> bool {
        self.tone == Tone::Error
    }
}

/// Define a trait for our listener callbacks.
pub trait FeedbackThunk: Send + Sync + 'static {
    fn call_box(&self, toast: &Toast);
}
impl<F: Fn(&Toast) + Send + Sync + 'static> FeedbackThunk for F {
    fn call_box(&self, toast: &Toast) {
        (*self)(toast);
    }
}

struct Listener {
    cb: Arc<dyn FeedbackThunk>,
    name: String,
}

pub struct FeedbackTray {
    toasts: RwLock<Vec<Toast>>,
    listeners: RwLock<Vec<Listener>>,
    dismiss_after: Duration,
}

impl FeedbackTray {
    pub fn new(dismiss_after: Duration) -> FeedbackTray {
        FeedbackTray {
            toasts: RwLock::new(Vec::new()),
            listeners: RwLock::new(Vec::new()),
            dismiss_after: dismiss_after,
        }
    }

    /// Create a tray using `feedback.dismiss_ms` from the config
    pub fn from_config() -> FeedbackTray {
        let millis: u64 = config::get_or(&["feedback", "dismiss_ms"], 5000);
        FeedbackTray::new(Duration::from_millis(millis))
    }

    /// Bind a listener that gets every toast as it's shown. Binding with a
    /// name that's already bound replaces the old listener.
    pub fn bind<F>(&self, name: &str, cb: F)
        where F: Fn(&Toast) + Send + Sync + 'static
    {
        self.unbind(name);
        let mut guard = lockw!(self.listeners);
        guard.push(Listener {
            cb: Arc::new(cb),
            name: String::from(name),
        });
    }

    pub fn unbind(&self, name: &str) -> bool {
        let mut guard = lockw!(self.listeners);
        let before = guard.len();
        guard.retain(|x| x.name != name);
        guard.len() != before
    }

    /// Show a message
    pub fn show(&self, message: &str, tone: Tone) {
        let now = Instant::now();
        let toast = Toast {
            message: String::from(message),
            tone: tone,
            expires_at: now + self.dismiss_after,
        };
        debug!("feedback::show() -- {:?}: {}", tone, message);
        // listeners may bind/unbind, so don't hold the lock while calling them
        let callbacks: Vec<Arc<dyn FeedbackThunk>> = lockr!(self.listeners).iter()
            .map(|x| x.cb.clone())
            .collect();
        for cb in callbacks {
            cb.call_box(&toast);
        }
        let mut guard = lockw!(self.toasts);
        guard.retain(|x| x.expires_at > now);
        guard.push(toast);
    }

    pub fn success(&self, message: &str) {
        self.show(message, Tone::Success);
    }

    pub fn error(&self, message: &str) {
        self.show(message, Tone::Error);
    }

    /// The messages still on screen at `now`, oldest first. Anything expired
    /// is dismissed.
    pub fn active_at(&self, now: Instant) -> Vec<Toast> {
        let mut guard = lockw!(self.toasts);
        guard.retain(|x| x.expires_at > now);
        guard.clone()
    }

    pub fn active(&self) -> Vec<Toast> {
        self.active_at(Instant::now())
    }
}
