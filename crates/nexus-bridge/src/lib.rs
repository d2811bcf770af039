//! Communication bridge between the frontend and the host backend.
//!
//! This crate defines the vocabulary shared by the widgets, the rendering
//! frontend and the host application that orchestrates the boot sequence:
//! - The frontend sends commands (e.g., start the boot sequence, request
//!   config, run a notification action's host command).
//! - The backend pushes events (e.g., stage changes, progress, the full
//!   notification list, boot completion).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`].

pub mod config;
pub mod notification;
pub mod stage;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the frontend of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    /// The host switched the loader to another stage.
    StageChanged {
        stage: stage::LoadingStage,
        /// Overall progress at the moment of the switch, 0 to 100.
        progress: u8,
    },
    /// Overall boot progress, displayed verbatim by the loader.
    ProgressUpdate(u8),
    /// The host considers the boot sequence finished.
    BootCompleted,
    /// The complete, ordered notification list currently owned by the host.
    NotificationsUpdate(Vec<notification::NotificationPayload>),
}

/// Commands issued by the frontend to control or query the backend.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Replace and persist the application configuration.
    UpdateConfiguration(config::Config),
    /// Start (or restart) the boot sequence.
    StartBootSequence,
    /// A notification action carrying a host command was clicked.
    NotificationCommand(notification::HostCommand),
}

/// Both ends of the two bounded queues joining the frontend and the host.
///
/// `frontend_*` halves go to the gpui side, `backend_*` halves to the host
/// thread. Full queues apply back-pressure to the sender.
pub struct BridgeChannels {
    pub frontend_rx: Receiver<MessageFromBackend>,
    pub frontend_tx: Sender<MessageToBackend>,

    pub backend_rx: Receiver<MessageToBackend>,
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates both queues, each holding at most `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        let (frontend_tx, backend_rx) = mpsc::channel(capacity);
        let (backend_tx, frontend_rx) = mpsc::channel(capacity);
        Self {
            frontend_rx,
            frontend_tx,
            backend_rx,
            backend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
