use std::time::{Duration, Instant};

use gpui::Context;
use nexus_bridge::notification::NotificationPayload;
use nexus_widgets::{ActionError, Animated, Notification, NotificationQueue};

use crate::BackendBridge;

/// Holds the toast queue and maps wall time onto its clock.
#[derive(Debug)]
pub struct NotificationsEntity {
    pub queue: NotificationQueue,
    origin: Instant,
}

impl NotificationsEntity {
    pub fn new(cx: &mut Context<Self>) -> Self {
        cx.spawn(async move |this, cx| {
            while let Ok(wait) = this.update(cx, |this, cx| this.tick(cx)) {
                cx.background_executor().timer(wait).await;
            }
        })
        .detach();

        Self {
            queue: NotificationQueue::default(),
            origin: Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn tick(&mut self, cx: &mut Context<Self>) -> Duration {
        let now = self.elapsed_ms();
        let due = self
            .queue
            .next_deadline()
            .is_some_and(|deadline| deadline <= now);

        self.queue.advance_to(now);
        if due {
            cx.notify();
        }
        super::frame_wait(self.queue.next_deadline(), now)
    }

    /// Replaces the host list. Host commands on actions are wired to send
    /// themselves back through `bridge`.
    pub fn update_from_host(
        &mut self,
        payloads: Vec<NotificationPayload>,
        bridge: &BackendBridge,
        cx: &mut Context<Self>,
    ) {
        self.queue.advance_to(self.elapsed_ms());
        let notifications = payloads
            .into_iter()
            .map(|payload| Notification::from_payload(payload, |command| bridge.command_effect(command)))
            .collect();
        self.queue.update_from_host(notifications);
        cx.notify();
    }

    pub fn set_default_duration(&mut self, default_duration_ms: u64) {
        self.queue.set_default_duration(default_duration_ms);
    }

    pub fn dismiss(&mut self, id: u64, cx: &mut Context<Self>) {
        if self.queue.dismiss(id) {
            cx.notify();
        }
    }

    pub fn dismiss_all(&mut self, cx: &mut Context<Self>) {
        if self.queue.dismiss_all() > 0 {
            cx.notify();
        }
    }

    pub fn invoke_action(
        &mut self,
        id: u64,
        index: usize,
        cx: &mut Context<Self>,
    ) -> Result<(), ActionError> {
        let result = self.queue.invoke_action(id, index);
        cx.notify();
        result
    }
}
