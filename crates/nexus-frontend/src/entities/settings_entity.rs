use gpui::{AppContext, Entity};
use nexus_bridge::config::Config;

/// Last configuration echoed by the host.
#[derive(Debug, Clone, Default)]
pub struct SettingsEntity {
    pub config: Config,
    /// False until the first `ConfigurationResponse` arrives; the defaults
    /// shown before that may differ from the file on disk.
    pub synced: bool,
}

impl SettingsEntity {
    pub fn apply_host_config<C: AppContext>(entity: &Entity<Self>, config: Config, cx: &mut C) {
        let _ = entity.update(cx, |this, cx| {
            if this.synced && this.config == config {
                return;
            }
            this.config = config;
            this.synced = true;
            cx.notify();
        });
    }
}
