use std::time::Duration;

use gpui::Entity;

pub mod loader_entity;
pub mod notifications_entity;
pub mod settings_entity;

/// Longest a widget ticker sleeps, so prop changes show up within a frame.
pub(crate) const FRAME: Duration = Duration::from_millis(33);

/// How long a widget ticker may sleep before its next timer is due.
pub(crate) fn frame_wait(next_deadline: Option<u64>, now_ms: u64) -> Duration {
    match next_deadline {
        Some(deadline) => {
            Duration::from_millis(deadline.saturating_sub(now_ms)).clamp(Duration::from_millis(1), FRAME)
        }
        None => FRAME,
    }
}

#[derive(Debug, Clone)]
pub struct DataEntities {
    pub settings: Entity<settings_entity::SettingsEntity>,
    pub loader: Entity<loader_entity::LoaderEntity>,
    pub notifications: Entity<notifications_entity::NotificationsEntity>,
}
