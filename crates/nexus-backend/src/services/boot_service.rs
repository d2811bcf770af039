use std::time::Duration;

use nexus_bridge::{MessageFromBackend, config::BootSequenceConfig};

use super::notification_service;
use crate::app::AppContext;

/// Handles a boot sequence start request (see
/// [`nexus_bridge::MessageToBackend::StartBootSequence`]). A sequence that is
/// still playing is aborted first.
pub async fn handle_start_boot_sequence(context: super::AppContextHandle) {
    let sequence = {
        let mut state = context.state.write().await;
        if let Some(task) = state.boot_task.take() {
            log::info!("Restarting the boot sequence");
            task.abort();
        }
        state.config.boot_sequence.clone()
    };

    let task_context = context.clone();
    let task = tokio::spawn(async move {
        play_boot_sequence(&task_context, &sequence).await;
    });

    context.state.write().await.boot_task = Some(task);
}

/// Walks through every configured step: announces the stage, ramps the
/// overall progress towards the step's target, and reports completion.
pub(crate) async fn play_boot_sequence(context: &AppContext, sequence: &BootSequenceConfig) {
    let mut progress = 0u8;

    for step in &sequence.steps {
        log::info!("Boot sequence entering {} for {}ms", step.stage, step.duration_ms);
        context
            .send(MessageFromBackend::StageChanged {
                stage: step.stage,
                progress,
            })
            .await;
        if sequence.announce_events {
            notification_service::announce_stage(context, step.stage).await;
        }

        let from = progress;
        let target = step.progress.min(100).max(from);
        let tick_ms = sequence.progress_interval_ms.clamp(1, step.duration_ms.max(1));
        let ticks = (step.duration_ms / tick_ms).max(1);

        for tick in 1..=ticks {
            tokio::time::sleep(Duration::from_millis(tick_ms)).await;
            let next = from + (u64::from(target - from) * tick / ticks) as u8;
            if next != progress {
                progress = next;
                context
                    .send(MessageFromBackend::ProgressUpdate(progress))
                    .await;
            }
        }
    }

    log::info!("Boot sequence finished");
    context.send(MessageFromBackend::BootCompleted).await;
    if sequence.announce_events {
        notification_service::announce_completion(context).await;
    }
}
