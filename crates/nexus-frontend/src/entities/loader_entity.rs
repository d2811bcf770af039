use std::time::{Duration, Instant};

use gpui::Context;
use nexus_bridge::{config::LoaderConfig, stage::LoadingStage};
use nexus_widgets::{Animated, StagedLoader};

/// Holds the staged loader and maps wall time onto its clock.
#[derive(Debug)]
pub struct LoaderEntity {
    pub loader: StagedLoader,
    /// Set once the host reported the boot sequence as finished.
    pub booted: bool,
    origin: Instant,
}

impl LoaderEntity {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let mut loader = StagedLoader::new(LoadingStage::Initializing, LoaderConfig::default());
        loader.set_on_complete(|| log::info!("Boot sequence acknowledged, handing over to the shell"));

        cx.spawn(async move |this, cx| {
            while let Ok(wait) = this.update(cx, |this, cx| this.tick(cx)) {
                cx.background_executor().timer(wait).await;
            }
        })
        .detach();

        Self {
            loader,
            booted: false,
            origin: Instant::now(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Fires every due loader timer and returns how long to sleep.
    fn tick(&mut self, cx: &mut Context<Self>) -> Duration {
        let now = self.elapsed_ms();
        let due = self
            .loader
            .next_deadline()
            .is_some_and(|deadline| deadline <= now);

        self.loader.advance_to(now);
        if due {
            cx.notify();
        }
        super::frame_wait(self.loader.next_deadline(), now)
    }

    pub fn apply_stage(&mut self, stage: LoadingStage, progress: u8, cx: &mut Context<Self>) {
        self.loader.advance_to(self.elapsed_ms());
        self.loader.set_stage(stage);
        self.loader.set_progress(progress);
        self.booted = false;
        cx.notify();
    }

    pub fn apply_progress(&mut self, progress: u8, cx: &mut Context<Self>) {
        self.loader.set_progress(progress);
        cx.notify();
    }

    pub fn finish(&mut self, cx: &mut Context<Self>) {
        self.loader.complete();
        self.booted = true;
        cx.notify();
    }

    pub fn reconfigure(&mut self, timings: &LoaderConfig) {
        self.loader.set_timings(timings.clone());
    }
}
