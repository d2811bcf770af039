use nexus_bridge::{MessageFromBackend, config::Config};

/// Handles an incoming configuration request (see
/// [`nexus_bridge::MessageToBackend::ConfigurationRequest`]).
pub async fn handle_config_request(context: super::AppContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };
    context
        .send(MessageFromBackend::ConfigurationResponse(config))
        .await;
}

/// Replaces the configuration, persists it and echoes it back (see
/// [`nexus_bridge::MessageToBackend::UpdateConfiguration`]). The new boot
/// sequence settings apply from the next start.
pub async fn handle_config_update(context: super::AppContextHandle, config: Config) {
    {
        let mut state = context.state.write().await;
        state.config = config.clone();
    }

    if let Err(error) = crate::config::save_config(&config).await {
        log::error!("Failed to persist the updated configuration: {error}");
    }

    context
        .send(MessageFromBackend::ConfigurationResponse(config))
        .await;
}
