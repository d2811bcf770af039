//! Toast stack over a host-owned notification list.
//!
//! The host owns the notifications and resubmits the full list whenever it
//! changes. The queue keeps only a set of dismissed ids, which filters the
//! host list, and one auto-dismiss timer per visible, non-persistent id.

use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    sync::Arc,
    time::SystemTime,
};

use nexus_bridge::notification::{ActionStyle, HostCommand, NotificationPayload, NotificationSeverity};

use crate::{
    Animated,
    timer::{TimerHandle, TimerQueue},
};

/// Callback run when an action button is clicked. Errors are handed back to
/// whoever invoked the action.
pub type ActionEffect = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

#[derive(Clone)]
pub struct NotificationAction {
    pub label: String,
    pub style: ActionStyle,
    pub effect: ActionEffect,
}

impl std::fmt::Debug for NotificationAction {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NotificationAction")
            .field("label", &self.label)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: NotificationSeverity,
    pub created_at: SystemTime,
    pub duration_ms: Option<u64>,
    pub persistent: bool,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
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

    /// Converts a bridge payload, turning every host command into an effect
    /// built by `effect_for`. Actions without a command get a no-op effect.
    pub fn from_payload(
        payload: NotificationPayload,
        mut effect_for: impl FnMut(HostCommand) -> ActionEffect,
    ) -> Self {
        let actions = payload
            .actions
            .into_iter()
            .map(|action| NotificationAction {
                label: action.label,
                style: action.style,
                effect: match action.command {
                    Some(command) => effect_for(command),
                    None => Arc::new(|| Ok(())),
                },
            })
            .collect();

        Self {
            id: payload.id,
            message: payload.message,
            severity: payload.severity,
            created_at: payload.created_at,
            duration_ms: payload.duration_ms,
            persistent: payload.persistent,
            actions,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// No visible notification with that id, or no action at that index.
    #[error("notification {id} has no action at index {index}")]
    NotFound { id: u64, index: usize },
    /// The action's effect failed. The notification stays visible.
    #[error(transparent)]
    Effect(anyhow::Error),
}

#[derive(Debug)]
pub struct NotificationQueue {
    default_duration_ms: u64,
    host: Vec<Notification>,
    dismissed: HashSet<u64>,
    /// Outstanding auto-dismiss timers, at most one per id.
    scheduled: HashMap<u64, TimerHandle>,
    timers: TimerQueue<u64>,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(5000)
    }
}

impl NotificationQueue {
    pub fn new(default_duration_ms: u64) -> Self {
        Self {
            default_duration_ms,
            host: Vec::new(),
            dismissed: HashSet::new(),
            scheduled: HashMap::new(),
            timers: TimerQueue::new(),
        }
    }

    /// Applies to auto-dismiss timers scheduled from now on.
    pub fn set_default_duration(&mut self, default_duration_ms: u64) {
        self.default_duration_ms = default_duration_ms;
    }

    /// Replaces the host list and arms auto-dismiss timers for newly visible,
    /// non-persistent notifications. Already armed ids are left alone.
    pub fn update_from_host(&mut self, notifications: Vec<Notification>) {
        self.host = notifications;

        let pending: Vec<(u64, u64)> = self
            .visible()
            .filter(|notification| !notification.persistent)
            .filter(|notification| !self.scheduled.contains_key(&notification.id))
            .map(|notification| {
                (
                    notification.id,
                    notification.duration_ms.unwrap_or(self.default_duration_ms),
                )
            })
            .collect();

        for (id, duration_ms) in pending {
            // A repeated id keeps the timer armed for its first occurrence.
            if let Entry::Vacant(slot) = self.scheduled.entry(id) {
                slot.insert(self.timers.schedule_timeout(duration_ms, id));
                log::trace!("Notification {id} auto-dismisses in {duration_ms}ms");
            }
        }
    }

    /// Host-ordered notifications that were not dismissed.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.host
            .iter()
            .filter(move |notification| !self.dismissed.contains(&notification.id))
    }

    pub fn is_dismissed(&self, id: u64) -> bool {
        self.dismissed.contains(&id)
    }

    /// Ids with an auto-dismiss timer still pending.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Hides `id` for good. Returns `false` if it was already dismissed.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if !self.dismissed.insert(id) {
            return false;
        }

        if let Some(handle) = self.scheduled.remove(&id) {
            self.timers.cancel(handle);
        }
        log::debug!("Dismissed notification {id}");
        true
    }

    /// Dismisses every visible notification and returns how many there were.
    pub fn dismiss_all(&mut self) -> usize {
        let ids: Vec<u64> = self.visible().map(|notification| notification.id).collect();
        ids.into_iter().filter(|id| self.dismiss(*id)).count()
    }

    /// Runs the effect of action `index` on notification `id`. Actions that
    /// are not [`ActionStyle::Secondary`] also dismiss the notification, but
    /// only when the effect succeeded.
    pub fn invoke_action(&mut self, id: u64, index: usize) -> Result<(), ActionError> {
        let action = self
            .visible()
            .find(|notification| notification.id == id)
            .and_then(|notification| notification.actions.get(index))
            .cloned()
            .ok_or(ActionError::NotFound { id, index })?;

        (action.effect)().map_err(ActionError::Effect)?;

        if action.style.dismisses() {
            self.dismiss(id);
        }
        Ok(())
    }
}

impl Animated for NotificationQueue {
    fn now(&self) -> u64 {
        self.timers.now()
    }

    fn advance_to(&mut self, now_ms: u64) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            let id = fired.event;
            self.scheduled.remove(&id);
            self.dismiss(id);
        }
        self.timers.advance_to(now_ms);
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn info(id: u64) -> Notification {
        Notification::new(id, NotificationSeverity::Info, format!("notification {id}"))
    }

    fn visible_ids(queue: &NotificationQueue) -> Vec<u64> {
        queue.visible().map(|notification| notification.id).collect()
    }

    fn counting_action(style: ActionStyle, counter: &Arc<AtomicUsize>) -> NotificationAction {
        let counter = counter.clone();
        NotificationAction {
            label: "Run".to_owned(),
            style,
            effect: Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        }
    }

    #[test]
    fn auto_dismisses_exactly_at_its_duration() {
        let mut queue = NotificationQueue::default();
        let mut notification = info(1);
        notification.duration_ms = Some(1000);
        queue.update_from_host(vec![notification]);

        queue.advance_to(999);
        assert_eq!(visible_ids(&queue), vec![1]);
        queue.advance_to(1000);
        assert!(visible_ids(&queue).is_empty());
        assert!(queue.is_dismissed(1));
    }

    #[test]
    fn missing_duration_uses_the_default() {
        let mut queue = NotificationQueue::default();
        queue.update_from_host(vec![info(7)]);

        queue.advance_to(4999);
        assert_eq!(visible_ids(&queue), vec![7]);
        queue.advance_to(5000);
        assert!(visible_ids(&queue).is_empty());
    }

    #[test]
    fn persistent_notifications_stay_until_dismissed() {
        let mut queue = NotificationQueue::default();
        let mut notification = info(3);
        notification.persistent = true;
        queue.update_from_host(vec![notification]);

        queue.advance_to(1_000_000);
        assert_eq!(visible_ids(&queue), vec![3]);
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn resubmitting_the_same_list_does_not_duplicate_timers() {
        let mut queue = NotificationQueue::default();
        let mut first = info(1);
        first.duration_ms = Some(1000);
        let list = vec![first, info(2)];

        queue.update_from_host(list.clone());
        queue.advance_to(500);
        queue.update_from_host(list.clone());
        queue.update_from_host(list);
        assert_eq!(queue.scheduled_count(), 2);

        // Still the original deadline, not one re-armed at t=500.
        queue.advance_to(1000);
        assert_eq!(visible_ids(&queue), vec![2]);
        assert_eq!(queue.scheduled_count(), 1);
    }

    #[test]
    fn repeated_id_in_one_list_arms_a_single_timer() {
        let mut queue = NotificationQueue::default();
        let mut early = info(4);
        early.duration_ms = Some(1000);
        let mut late = info(4);
        late.duration_ms = Some(3000);
        queue.update_from_host(vec![early, late]);

        assert_eq!(queue.scheduled_count(), 1);
        assert_eq!(queue.next_deadline(), Some(1000));

        queue.advance_to(1000);
        assert!(queue.is_dismissed(4));
        assert_eq!(queue.scheduled_count(), 0);
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn dismissal_is_idempotent_and_sticky() {
        let mut queue = NotificationQueue::default();
        queue.update_from_host(vec![info(1), info(2)]);

        assert!(queue.dismiss(1));
        assert!(!queue.dismiss(1));
        assert_eq!(visible_ids(&queue), vec![2]);

        queue.update_from_host(vec![info(1), info(2), info(3)]);
        assert_eq!(visible_ids(&queue), vec![2, 3]);
        assert_eq!(queue.scheduled_count(), 2);
    }

    #[test]
    fn dismiss_all_empties_the_visible_set() {
        let mut queue = NotificationQueue::default();
        queue.update_from_host(vec![info(1), info(2), info(3)]);

        assert_eq!(queue.dismiss_all(), 3);
        assert!(visible_ids(&queue).is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn dismissal_preserves_host_order() {
        let mut queue = NotificationQueue::default();
        queue.update_from_host(vec![info(5), info(1), info(9), info(2)]);

        queue.dismiss(1);
        assert_eq!(visible_ids(&queue), vec![5, 9, 2]);
    }

    #[test]
    fn primary_and_danger_actions_dismiss_but_secondary_does_not() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut notification = info(1);
        notification.actions = vec![
            counting_action(ActionStyle::Secondary, &counter),
            counting_action(ActionStyle::Danger, &counter),
        ];
        let mut queue = NotificationQueue::default();
        queue.update_from_host(vec![notification]);

        queue.invoke_action(1, 0).unwrap();
        assert_eq!(visible_ids(&queue), vec![1]);

        queue.invoke_action(1, 1).unwrap();
        assert!(visible_ids(&queue).is_empty());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failing_effect_is_returned_and_keeps_the_notification() {
        let mut notification = info(4);
        notification.actions = vec![NotificationAction {
            label: "Quarantine".to_owned(),
            style: ActionStyle::Primary,
            effect: Arc::new(|| Err(anyhow::anyhow!("host unreachable"))),
        }];
        let mut queue = NotificationQueue::default();
        queue.update_from_host(vec![notification]);

        let error = queue.invoke_action(4, 0).unwrap_err();
        assert!(matches!(error, ActionError::Effect(_)));
        assert_eq!(error.to_string(), "host unreachable");
        assert_eq!(visible_ids(&queue), vec![4]);
    }

    #[test]
    fn unknown_action_is_reported() {
        let mut queue = NotificationQueue::default();
        queue.update_from_host(vec![info(1)]);

        assert!(matches!(
            queue.invoke_action(1, 3),
            Err(ActionError::NotFound { id: 1, index: 3 })
        ));
        assert!(matches!(
            queue.invoke_action(8, 0),
            Err(ActionError::NotFound { id: 8, index: 0 })
        ));
    }

    #[test]
    fn payload_commands_become_effects() {
        let sent = Arc::new(AtomicUsize::new(0));
        let payload = NotificationPayload::new(11, NotificationSeverity::Threat, "Intrusion attempt")
            .persistent()
            .action("Quarantine", ActionStyle::Danger, Some(HostCommand::Acknowledge(11)))
            .action("Details", ActionStyle::Secondary, None);

        let counter = sent.clone();
        let notification = Notification::from_payload(payload, |command| {
            assert_eq!(command, HostCommand::Acknowledge(11));
            let counter = counter.clone();
            let effect: ActionEffect = Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            effect
        });

        assert!(notification.persistent);
        assert_eq!(notification.actions.len(), 2);
        (notification.actions[1].effect)().unwrap();
        assert_eq!(sent.load(Ordering::SeqCst), 0);
        (notification.actions[0].effect)().unwrap();
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }
}
