use nexus_bridge::{config::Config, notification::NotificationPayload};
use tokio::task::JoinHandle;

/// The host state shared by every service: configuration, the notification
/// list it owns, and the boot sequence currently playing, if any.
///
/// It is wrapped in [`SharedState`] so background tasks (the boot sequence)
/// and message handlers can read and occasionally write it.
#[derive(Debug, Default)]
pub struct State {
    /// The loaded application configuration.
    pub config: Config,
    /// Notifications owned by the host, in display order.
    pub notifications: Vec<NotificationPayload>,
    /// Next id handed out to a pushed notification.
    pub next_notification_id: u64,
    /// Task running the boot sequence.
    pub boot_task: Option<JoinHandle<()>>,
}

impl State {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            next_notification_id: 1,
            ..Self::default()
        }
    }
}

/// Thread-safe, async-friendly shared reference to the host [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
