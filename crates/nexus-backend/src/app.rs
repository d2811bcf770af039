//! Host context: shared state plus the outbound half of the bridge, and the
//! loop routing frontend commands to services.

use std::sync::Arc;

use nexus_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

pub(crate) struct AppContext {
    pub state: SharedState,
    /// Events for the frontend.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Routes frontend commands to services until the frontend drops its
    /// sender.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
        log::info!("Frontend bridge closed, stopping the host");
    }

    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::UpdateConfiguration(config) => {
                services::config_service::handle_config_update(self.clone(), config).await;
            }
            MessageToBackend::StartBootSequence => {
                services::boot_service::handle_start_boot_sequence(self.clone()).await;
            }
            MessageToBackend::NotificationCommand(command) => {
                services::notification_service::handle_host_command(self.clone(), command).await;
            }
        }
    }

    /// Send a message to the frontend bridge. Messages sent after the
    /// frontend went away are dropped.
    pub async fn send(&self, message: MessageFromBackend) {
        if let Err(error) = self.tx.send(message).await {
            log::warn!("Frontend is gone, dropping {:?}", error.0);
        }
    }
}
