use anyhow::Context;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .context("failed to build logger instance")?;

    let channels = nexus_bridge::BridgeChannels::default();
    nexus_backend::run(channels.backend_rx, channels.backend_tx)
        .context("failed to start the host")?;
    log::info!("Host started, opening the console");

    nexus_frontend::run(channels.frontend_rx, channels.frontend_tx)
}
