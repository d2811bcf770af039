use std::time::SystemTime;

/// Severity or category for user-visible notifications.
///
/// This enum classifies notifications by their intent and visual styling,
/// allowing the UI to display them appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationSeverity {
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates a non-critical issue that the user should be aware of.
    Warning,
    /// Indicates an error or failure that may affect functionality.
    Error,
    /// Neutral informational message.
    Info,
    /// A detected (simulated) security threat. Rendered the loudest.
    Threat,
}

/// Visual weight of a notification action button. Every style except
/// [`ActionStyle::Secondary`] dismisses the notification once clicked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActionStyle {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ActionStyle {
    pub fn dismisses(self) -> bool {
        !matches!(self, ActionStyle::Secondary)
    }
}

/// Commands a notification action can send back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Abort the running boot sequence and start it from the first step.
    RestartBootSequence,
    /// Remove the notification with the given id from the host's list.
    Acknowledge(u64),
}

/// An action button attached to a notification.
#[derive(Debug, Clone)]
pub struct ActionPayload {
    pub label: String,
    pub style: ActionStyle,
    /// Command sent back to the host when clicked, if any.
    pub command: Option<HostCommand>,
}

/// A notification record owned by the host application.
#[derive(Debug, Clone)]
pub struct NotificationPayload {
    /// Unique, host-assigned identifier.
    pub id: u64,
    /// The text content to display to the user.
    pub message: String,
    pub severity: NotificationSeverity,
    pub created_at: SystemTime,
    /// Auto-dismiss delay. `None` selects the widget's default.
    pub duration_ms: Option<u64>,
    /// Persistent notifications are never auto-dismissed.
    pub persistent: bool,
    pub actions: Vec<ActionPayload>,
}

impl NotificationPayload {
    pub fn new(id: u64, severity: NotificationSeverity, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
            severity,
            created_at: SystemTime::now(),
            duration_ms: None,
            persistent: false,
            actions: Vec::new(),
        }
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub fn action(
        mut self,
        label: impl Into<String>,
        style: ActionStyle,
        command: Option<HostCommand>,
    ) -> Self {
        self.actions.push(ActionPayload {
            label: label.into(),
            style,
            command,
        });
        self
    }
}
