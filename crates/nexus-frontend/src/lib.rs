use std::sync::Arc;

use gpui::{AppContext, Application, Global, WindowOptions};
use gpui_component::Root;
use nexus_bridge::{
    MessageFromBackend, MessageToBackend, config::Config, notification::HostCommand,
};
use nexus_widgets::ActionEffect;
use tokio::sync::mpsc;

use crate::entities::{
    loader_entity::LoaderEntity, notifications_entity::NotificationsEntity,
    settings_entity::SettingsEntity,
};

pub mod components;
pub mod entities;
pub mod formatting;
mod views;

#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<MessageToBackend>,
}

impl BackendBridge {
    async fn send(&self, message: MessageToBackend) {
        if let Err(error) = self.to_backend.send(message).await {
            log::error!("Host is gone, dropping {:?}", error.0);
        }
    }

    pub async fn request_config(&self) {
        self.send(MessageToBackend::ConfigurationRequest).await;
    }

    pub async fn update_config(&self, config: Config) {
        self.send(MessageToBackend::UpdateConfiguration(config)).await;
    }

    pub async fn start_boot_sequence(&self) {
        self.send(MessageToBackend::StartBootSequence).await;
    }

    /// Builds a notification action effect that hands `command` to the host.
    /// It never blocks: a full channel is reported as the effect's error.
    pub fn command_effect(&self, command: HostCommand) -> ActionEffect {
        let to_backend = self.to_backend.clone();
        Arc::new(move || {
            to_backend
                .try_send(MessageToBackend::NotificationCommand(command))
                .map_err(|error| anyhow::anyhow!("failed to reach the host: {error}"))
        })
    }
}

impl Global for BackendBridge {}

pub fn run(
    mut rx: mpsc::Receiver<MessageFromBackend>,
    tx: mpsc::Sender<MessageToBackend>,
) -> anyhow::Result<()> {
    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_component::init(cx);

        let settings = cx.new(|_| SettingsEntity::default());
        let loader = cx.new(LoaderEntity::new);
        let notifications = cx.new(NotificationsEntity::new);

        let data = entities::DataEntities {
            settings,
            loader,
            notifications,
        };
        let listener_data = data.clone();

        let bridge = BackendBridge {
            to_backend: tx.clone(),
        };
        cx.set_global(bridge.clone());

        cx.spawn(async move |cx| {
            cx.open_window(WindowOptions::default(), |window, cx| {
                let listener_bridge = bridge.clone();
                cx.spawn(async move |cx| {
                    while let Some(message) = rx.recv().await {
                        log::debug!("Got a message from host: {message:?}");
                        match message {
                            MessageFromBackend::ConfigurationResponse(config) => {
                                let _ = listener_data.loader.update(cx, |model, _| {
                                    model.reconfigure(&config.loader);
                                });
                                let _ = listener_data.notifications.update(cx, |model, _| {
                                    model.set_default_duration(
                                        config.notifications.default_duration_ms,
                                    );
                                });
                                SettingsEntity::apply_host_config(&listener_data.settings, config, cx);
                            }
                            MessageFromBackend::StageChanged { stage, progress } => {
                                let _ = listener_data.loader.update(cx, |model, cx| {
                                    model.apply_stage(stage, progress, cx);
                                });
                            }
                            MessageFromBackend::ProgressUpdate(progress) => {
                                let _ = listener_data.loader.update(cx, |model, cx| {
                                    model.apply_progress(progress, cx);
                                });
                            }
                            MessageFromBackend::BootCompleted => {
                                let _ = listener_data.loader.update(cx, |model, cx| {
                                    model.finish(cx);
                                });
                            }
                            MessageFromBackend::NotificationsUpdate(notifications) => {
                                let _ = listener_data.notifications.update(cx, |model, cx| {
                                    model.update_from_host(notifications, &listener_bridge, cx);
                                });
                            }
                        }
                    }
                })
                .detach();

                cx.spawn(async move |_| {
                    bridge.request_config().await;
                    bridge.start_boot_sequence().await;
                })
                .detach();

                let view = cx.new(|cx| crate::views::FrontendUi::new(&data, window, cx));
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
