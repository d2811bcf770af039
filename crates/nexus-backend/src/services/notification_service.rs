use nexus_bridge::{
    MessageFromBackend,
    notification::{ActionStyle, HostCommand, NotificationPayload, NotificationSeverity},
    stage::LoadingStage,
};

use crate::app::AppContext;

/// Oldest notifications are dropped from the host list beyond this length.
const MAX_HOST_NOTIFICATIONS: usize = 32;

/// Appends a notification built from a freshly assigned id, then sends the
/// full list to the frontend. Returns the assigned id.
pub(crate) async fn push_notification(
    context: &AppContext,
    build: impl FnOnce(u64) -> NotificationPayload,
) -> u64 {
    let (id, notifications) = {
        let mut state = context.state.write().await;
        let id = state.next_notification_id;
        state.next_notification_id += 1;
        state.notifications.push(build(id));

        let overflow = state
            .notifications
            .len()
            .saturating_sub(MAX_HOST_NOTIFICATIONS);
        state.notifications.drain(..overflow);
        (id, state.notifications.clone())
    };

    context
        .send(MessageFromBackend::NotificationsUpdate(notifications))
        .await;
    id
}

/// Removes a notification from the host list and resends the list if it
/// was present.
pub(crate) async fn remove_notification(context: &AppContext, id: u64) {
    let notifications = {
        let mut state = context.state.write().await;
        let before = state.notifications.len();
        state.notifications.retain(|notification| notification.id != id);
        if state.notifications.len() == before {
            log::debug!("Notification {id} was already gone from the host list");
            return;
        }
        state.notifications.clone()
    };

    context
        .send(MessageFromBackend::NotificationsUpdate(notifications))
        .await;
}

/// Pushes the notifications that accompany entering `stage`.
pub(crate) async fn announce_stage(context: &AppContext, stage: LoadingStage) {
    match stage {
        LoadingStage::Initializing => {
            push_notification(context, |id| {
                NotificationPayload::new(id, NotificationSeverity::Info, "Secure boot initiated")
            })
            .await;
        }
        LoadingStage::BiometricScan => {
            push_notification(context, |id| {
                NotificationPayload::new(
                    id,
                    NotificationSeverity::Warning,
                    "Biometric scanner engaged, hold still",
                )
                .duration_ms(4000)
            })
            .await;
        }
        LoadingStage::AiInitialization => {
            push_notification(context, |id| {
                NotificationPayload::new(
                    id,
                    NotificationSeverity::Info,
                    "AI defense matrix warming up",
                )
            })
            .await;
            push_notification(context, |id| {
                NotificationPayload::new(
                    id,
                    NotificationSeverity::Threat,
                    "Intrusion attempt intercepted on port 443",
                )
                .persistent()
                .action(
                    "Quarantine",
                    ActionStyle::Danger,
                    Some(HostCommand::Acknowledge(id)),
                )
                .action("Details", ActionStyle::Secondary, None)
            })
            .await;
        }
        LoadingStage::QuantumSync => {
            push_notification(context, |id| {
                NotificationPayload::new(
                    id,
                    NotificationSeverity::Success,
                    "Quantum link established",
                )
                .duration_ms(3000)
            })
            .await;
        }
    }
}

/// Pushes the persistent "all systems online" notification.
pub(crate) async fn announce_completion(context: &AppContext) {
    push_notification(context, |id| {
        NotificationPayload::new(
            id,
            NotificationSeverity::Success,
            "All systems online. Nexus Cyber Shield is active.",
        )
        .persistent()
        .action("Enter dashboard", ActionStyle::Primary, Some(HostCommand::Acknowledge(id)))
        .action(
            "Replay boot",
            ActionStyle::Secondary,
            Some(HostCommand::RestartBootSequence),
        )
    })
    .await;
}

/// Handles a host command carried by a notification action (see
/// [`nexus_bridge::MessageToBackend::NotificationCommand`]).
pub async fn handle_host_command(context: super::AppContextHandle, command: HostCommand) {
    match command {
        HostCommand::Acknowledge(id) => remove_notification(&context, id).await,
        HostCommand::RestartBootSequence => {
            super::boot_service::handle_start_boot_sequence(context).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nexus_bridge::config::Config;
    use tokio::sync::{RwLock, mpsc};

    use super::*;
    use crate::state::State;

    fn context() -> (Arc<AppContext>, mpsc::Receiver<MessageFromBackend>) {
        let (tx, rx) = mpsc::channel(64);
        let state = Arc::new(RwLock::new(State::new(Config::default())));
        (Arc::new(AppContext { state, tx }), rx)
    }

    fn last_list(rx: &mut mpsc::Receiver<MessageFromBackend>) -> Vec<NotificationPayload> {
        let mut last = Vec::new();
        while let Ok(message) = rx.try_recv() {
            if let MessageFromBackend::NotificationsUpdate(list) = message {
                last = list;
            }
        }
        last
    }

    fn ids(list: &[NotificationPayload]) -> Vec<u64> {
        list.iter().map(|notification| notification.id).collect()
    }

    #[tokio::test]
    async fn pushed_notifications_get_increasing_ids() {
        let (context, mut rx) = context();

        let first = push_notification(&context, |id| {
            NotificationPayload::new(id, NotificationSeverity::Info, "first")
        })
        .await;
        let second = push_notification(&context, |id| {
            NotificationPayload::new(id, NotificationSeverity::Info, "second")
        })
        .await;

        assert!(second > first);
        assert_eq!(ids(&last_list(&mut rx)), vec![first, second]);
    }

    #[tokio::test]
    async fn acknowledging_removes_from_the_host_list() {
        let (context, mut rx) = context();
        announce_stage(&context, LoadingStage::AiInitialization).await;
        let threat = last_list(&mut rx)
            .into_iter()
            .find(|notification| notification.severity == NotificationSeverity::Threat)
            .unwrap();
        assert_eq!(
            threat.actions[0].command,
            Some(HostCommand::Acknowledge(threat.id))
        );

        handle_host_command(context.clone(), HostCommand::Acknowledge(threat.id)).await;
        let remaining = last_list(&mut rx);
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|notification| notification.id != threat.id));

        // A second acknowledgement is a no-op and sends nothing.
        handle_host_command(context.clone(), HostCommand::Acknowledge(threat.id)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn host_list_is_capped() {
        let (context, mut rx) = context();
        for _ in 0..(MAX_HOST_NOTIFICATIONS + 5) {
            push_notification(&context, |id| {
                NotificationPayload::new(id, NotificationSeverity::Info, "spam")
            })
            .await;
            let _ = rx.try_recv();
        }

        let state = context.state.read().await;
        assert_eq!(state.notifications.len(), MAX_HOST_NOTIFICATIONS);
        assert_eq!(state.notifications[0].id, 6);
    }
}
