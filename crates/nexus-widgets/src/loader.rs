//! Staged boot loader: typed status lines, biometric scan meter and the
//! staggered "systems online" checklist.
//!
//! Every stage activation bumps a generation counter. Stage timers carry the
//! generation they were scheduled under and are ignored once it is stale, on
//! top of being cancelled on the switch, so a superseded stage can never
//! touch the fresh [`LoaderRuntimeState`].

use nexus_bridge::{
    config::LoaderConfig,
    stage::{LoadingStage, MessageSeverity},
};

use crate::{
    Animated,
    catalog::{self, LoadingMessage},
    timer::{TimerHandle, TimerQueue},
};

/// Per-stage runtime state, rebuilt from scratch on every stage change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderRuntimeState {
    /// Index of the line being revealed (or about to be).
    pub current_message_index: usize,
    /// Number of characters of the current line revealed so far.
    pub typed_prefix_length: usize,
    /// Biometric scan meter, 0 to 100.
    pub scan_progress_percent: u8,
    /// Set once every line of the stage has been revealed.
    pub completed: bool,
}

/// A status line as it should currently be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealedLine<'a> {
    pub text: &'a str,
    pub severity: MessageSeverity,
    /// `false` for the line still being typed.
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoaderEvent {
    RevealStart { generation: u64 },
    TypeTick { generation: u64 },
    Settle { generation: u64 },
    ScanTick { generation: u64 },
    SystemOnline,
}

type CompletionCallback = Box<dyn FnMut() + Send>;

pub struct StagedLoader {
    /// Latest timings handed in by the owner.
    timings: LoaderConfig,
    /// Timings frozen when the active stage started.
    stage_timings: LoaderConfig,
    stage: LoadingStage,
    progress: u8,
    generation: u64,
    stage_started_at: u64,
    state: LoaderRuntimeState,
    online_systems: Vec<&'static str>,
    /// The single active reveal timer: a pending start, typing or settle.
    reveal_timer: Option<TimerHandle>,
    scan_timer: Option<TimerHandle>,
    systems_timer: Option<TimerHandle>,
    timers: TimerQueue<LoaderEvent>,
    on_complete: Option<CompletionCallback>,
}

impl std::fmt::Debug for StagedLoader {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("StagedLoader")
            .field("stage", &self.stage)
            .field("progress", &self.progress)
            .field("generation", &self.generation)
            .field("state", &self.state)
            .field("online_systems", &self.online_systems)
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl StagedLoader {
    /// Mounts the loader at virtual time 0 and activates `stage`.
    pub fn new(stage: LoadingStage, timings: LoaderConfig) -> Self {
        let mut timers = TimerQueue::new();
        let systems_timer =
            Some(timers.schedule_interval(timings.systems_tick_ms, LoaderEvent::SystemOnline));

        let mut loader = Self {
            stage_timings: timings.clone(),
            timings,
            stage,
            progress: 0,
            generation: 0,
            stage_started_at: 0,
            state: LoaderRuntimeState::default(),
            online_systems: Vec::with_capacity(catalog::SYSTEMS.len()),
            reveal_timer: None,
            scan_timer: None,
            systems_timer,
            timers,
            on_complete: None,
        };
        loader.set_stage(stage);
        loader
    }

    /// Switches to `stage`, discarding everything the previous stage had in
    /// flight and starting its line sequence from the first message.
    pub fn set_stage(&mut self, stage: LoadingStage) {
        if let Some(handle) = self.reveal_timer.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.scan_timer.take() {
            self.timers.cancel(handle);
        }

        self.generation += 1;
        self.stage = stage;
        self.stage_timings = LoaderConfig {
            scan_step_percent: self.timings.scan_step_percent.max(1),
            ..self.timings.clone()
        };
        self.stage_started_at = self.timers.now();
        self.state = LoaderRuntimeState::default();
        log::debug!(
            "Loader entered stage {stage} (generation {}) at {}ms",
            self.generation,
            self.stage_started_at
        );

        if stage == LoadingStage::BiometricScan {
            self.scan_timer = Some(self.timers.schedule_interval(
                self.stage_timings.scan_tick_ms,
                LoaderEvent::ScanTick {
                    generation: self.generation,
                },
            ));
        }

        self.begin_message();
    }

    /// Stores the host-reported overall progress, clamped to 100.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    /// Replaces the timings. They take effect from the next stage activation;
    /// the stage in flight and the systems ticker keep their periods. A zero
    /// scan step is raised to 1 so the meter always fills.
    pub fn set_timings(&mut self, timings: LoaderConfig) {
        self.timings = timings;
    }

    pub fn set_on_complete(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Invokes the completion callback. Only the host calls this; the loader
    /// never decides on its own that the overall flow is finished.
    pub fn complete(&mut self) {
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }

    pub fn stage(&self) -> LoadingStage {
        self.stage
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &LoaderRuntimeState {
        &self.state
    }

    pub fn online_systems(&self) -> &[&'static str] {
        &self.online_systems
    }

    /// The line sequence of the active stage.
    pub fn messages(&self) -> &'static [LoadingMessage] {
        catalog::messages(self.stage)
    }

    /// Revealed prefix of the current line (empty once the stage is done).
    pub fn typed_text(&self) -> &'static str {
        match self.messages().get(self.state.current_message_index) {
            Some(message) => char_prefix(message.text, self.state.typed_prefix_length),
            None => "",
        }
    }

    /// Every fully typed line of the stage followed by the one in progress.
    pub fn revealed_lines(&self) -> Vec<RevealedLine<'static>> {
        let messages = self.messages();
        let done = self.state.current_message_index.min(messages.len());

        let mut lines: Vec<_> = messages[..done]
            .iter()
            .map(|message| RevealedLine {
                text: message.text,
                severity: message.severity,
                complete: true,
            })
            .collect();

        if let Some(current) = messages.get(done) {
            if self.state.typed_prefix_length > 0 {
                lines.push(RevealedLine {
                    text: self.typed_text(),
                    severity: current.severity,
                    complete: false,
                });
            }
        }

        lines
    }

    /// Schedules the start of the current line, or marks the stage complete
    /// if no line is left.
    fn begin_message(&mut self) {
        let Some(message) = self.messages().get(self.state.current_message_index) else {
            self.reveal_timer = None;
            self.state.completed = true;
            log::debug!("Loader finished every line of stage {}", self.stage);
            return;
        };

        let reveal_at = self.stage_started_at.saturating_add(message.reveal_after_ms);
        let delay = reveal_at.saturating_sub(self.timers.now());
        self.reveal_timer = Some(self.timers.schedule_timeout(
            delay,
            LoaderEvent::RevealStart {
                generation: self.generation,
            },
        ));
    }

    fn handle(&mut self, event: LoaderEvent) {
        match event {
            LoaderEvent::SystemOnline => self.bring_system_online(),
            LoaderEvent::RevealStart { generation } if generation == self.generation => {
                self.start_typing();
            }
            LoaderEvent::TypeTick { generation } if generation == self.generation => {
                self.type_next_character();
            }
            LoaderEvent::Settle { generation } if generation == self.generation => {
                self.state.current_message_index += 1;
                self.state.typed_prefix_length = 0;
                self.begin_message();
            }
            LoaderEvent::ScanTick { generation } if generation == self.generation => {
                self.advance_scan();
            }
            stale => log::trace!("Dropping stale loader event {stale:?}"),
        }
    }

    fn start_typing(&mut self) {
        self.state.typed_prefix_length = 0;
        let generation = self.generation;
        self.reveal_timer = Some(if self.current_line_length() == 0 {
            self.timers
                .schedule_timeout(self.stage_timings.settle_delay_ms, LoaderEvent::Settle { generation })
        } else {
            self.timers
                .schedule_interval(self.stage_timings.typing_interval_ms, LoaderEvent::TypeTick { generation })
        });
    }

    fn type_next_character(&mut self) {
        let length = self.current_line_length();
        self.state.typed_prefix_length = (self.state.typed_prefix_length + 1).min(length);
        if self.state.typed_prefix_length < length {
            return;
        }

        if let Some(handle) = self.reveal_timer.take() {
            self.timers.cancel(handle);
        }
        self.reveal_timer = Some(self.timers.schedule_timeout(
            self.stage_timings.settle_delay_ms,
            LoaderEvent::Settle {
                generation: self.generation,
            },
        ));
    }

    fn advance_scan(&mut self) {
        self.state.scan_progress_percent = self
            .state
            .scan_progress_percent
            .saturating_add(self.stage_timings.scan_step_percent)
            .min(100);

        if self.state.scan_progress_percent == 100 {
            if let Some(handle) = self.scan_timer.take() {
                self.timers.cancel(handle);
            }
        }
    }

    fn bring_system_online(&mut self) {
        if let Some(&system) = catalog::SYSTEMS.get(self.online_systems.len()) {
            self.online_systems.push(system);
        }

        if self.online_systems.len() == catalog::SYSTEMS.len() {
            if let Some(handle) = self.systems_timer.take() {
                self.timers.cancel(handle);
            }
        }
    }

    fn current_line_length(&self) -> usize {
        self.messages()
            .get(self.state.current_message_index)
            .map_or(0, |message| message.text.chars().count())
    }
}

impl Animated for StagedLoader {
    fn now(&self) -> u64 {
        self.timers.now()
    }

    fn advance_to(&mut self, now_ms: u64) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            self.handle(fired.event);
        }
        self.timers.advance_to(now_ms);
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }
}

/// The first `count` characters of `text`.
fn char_prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    fn loader(stage: LoadingStage) -> StagedLoader {
        StagedLoader::new(stage, LoaderConfig::default())
    }

    /// Steps the clock one unit at a time and records every index/prefix
    /// transition of the typed sequence.
    fn record_reveal(loader: &mut StagedLoader, until: u64) -> Vec<(usize, String)> {
        let mut seen: Vec<(usize, String)> = Vec::new();
        while loader.now() < until {
            loader.advance_by(1);
            let entry = (
                loader.state().current_message_index,
                loader.typed_text().to_owned(),
            );
            if seen.last() != Some(&entry) {
                seen.push(entry);
            }
        }
        seen
    }

    #[test]
    fn every_stage_reveals_its_lines_in_order_and_in_full() {
        for stage in LoadingStage::ALL {
            let mut loader = loader(stage);
            let messages = loader.messages();
            let trace = record_reveal(&mut loader, 60_000);

            let mut indices: Vec<usize> = trace.iter().map(|(index, _)| *index).collect();
            indices.dedup();
            let expected: Vec<usize> = (0..=messages.len()).collect();
            assert_eq!(indices, expected, "{stage} skipped or repeated a line");

            for (index, message) in messages.iter().enumerate() {
                let longest = trace
                    .iter()
                    .filter(|(at, _)| *at == index)
                    .map(|(_, text)| text.as_str())
                    .max_by_key(|text| text.len())
                    .unwrap();
                assert_eq!(longest, message.text);
            }

            assert!(loader.state().completed);
            assert_eq!(loader.revealed_lines().len(), messages.len());
        }
    }

    #[test]
    fn characters_appear_at_the_typing_interval() {
        let mut loader = loader(LoadingStage::Initializing);

        loader.advance_to(49);
        assert_eq!(loader.typed_text(), "");
        loader.advance_to(50);
        assert_eq!(loader.typed_text(), "B");
        loader.advance_to(150);
        assert_eq!(loader.typed_text(), "Boo");
    }

    #[test]
    fn next_line_waits_for_settle_delay() {
        let mut loader = loader(LoadingStage::Initializing);
        let first = loader.messages()[0].text;
        let typed_at = 50 * first.chars().count() as u64;

        loader.advance_to(typed_at);
        assert_eq!(loader.typed_text(), first);
        loader.advance_to(typed_at + 799);
        assert_eq!(loader.state().current_message_index, 0);
        loader.advance_to(typed_at + 800);
        assert_eq!(loader.state().current_message_index, 1);
        assert_eq!(loader.typed_text(), "");
    }

    #[test]
    fn switching_stage_cancels_the_reveal_in_flight() {
        let mut loader = loader(LoadingStage::Initializing);
        loader.advance_to(300);
        assert!(!loader.typed_text().is_empty());
        let before = loader.generation();

        loader.set_stage(LoadingStage::QuantumSync);
        assert_eq!(loader.generation(), before + 1);
        assert_eq!(loader.state(), &LoaderRuntimeState::default());

        let old_text = catalog::messages(LoadingStage::Initializing)[0].text;
        let new_text = catalog::messages(LoadingStage::QuantumSync)[0].text;
        for _ in 0..200 {
            loader.advance_by(1);
            let typed = loader.typed_text();
            assert!(new_text.starts_with(typed));
            assert!(typed.is_empty() || !old_text.starts_with(typed));
        }
        assert_eq!(loader.typed_text(), char_prefix(new_text, 4));
    }

    #[test]
    fn biometric_scan_reaches_exactly_one_hundred_after_five_seconds() {
        let mut loader = loader(LoadingStage::BiometricScan);
        let mut last = 0;
        for _ in 0..5000 {
            loader.advance_by(1);
            let progress = loader.state().scan_progress_percent;
            assert!(progress >= last);
            assert!(progress <= 100);
            last = progress;
        }
        assert_eq!(loader.state().scan_progress_percent, 100);

        loader.advance_to(20_000);
        assert_eq!(loader.state().scan_progress_percent, 100);
    }

    #[test]
    fn scan_meter_restarts_when_stage_is_set_again() {
        let mut loader = loader(LoadingStage::BiometricScan);
        loader.advance_to(1000);
        assert_eq!(loader.state().scan_progress_percent, 20);

        loader.set_stage(LoadingStage::BiometricScan);
        assert_eq!(loader.state().scan_progress_percent, 0);
        loader.advance_by(100);
        assert_eq!(loader.state().scan_progress_percent, 2);
    }

    #[test]
    fn new_timings_wait_for_the_next_stage() {
        let mut loader = loader(LoadingStage::Initializing);
        let first = loader.messages()[0].text;
        let typed_at = 50 * first.chars().count() as u64;
        loader.advance_to(typed_at);
        assert_eq!(loader.typed_text(), first);

        let generation = loader.generation();
        loader.set_timings(LoaderConfig {
            typing_interval_ms: 500,
            ..LoaderConfig::default()
        });

        // The second line still types at the old pace.
        loader.advance_to(typed_at + 800 + 50);
        assert_eq!(loader.generation(), generation);
        let second = loader.messages()[1].text;
        assert_eq!(loader.typed_text(), char_prefix(second, 1));

        loader.set_stage(LoadingStage::QuantumSync);
        let start = loader.now();
        loader.advance_to(start + 499);
        assert_eq!(loader.typed_text(), "");
        loader.advance_to(start + 500);
        assert_eq!(loader.typed_text().chars().count(), 1);
    }

    #[test]
    fn scan_step_is_configurable_and_never_stalls() {
        for (step, ticks_to_full) in [(3u8, 34u64), (0, 100)] {
            let mut loader = StagedLoader::new(
                LoadingStage::BiometricScan,
                LoaderConfig {
                    scan_step_percent: step,
                    ..LoaderConfig::default()
                },
            );

            loader.advance_to(100 * (ticks_to_full - 1));
            assert!(loader.state().scan_progress_percent < 100, "step {step}");
            loader.advance_to(100 * ticks_to_full);
            assert_eq!(loader.state().scan_progress_percent, 100, "step {step}");

            loader.advance_to(120_000);
            assert_eq!(loader.state().scan_progress_percent, 100);
            assert_eq!(loader.next_deadline(), None);
        }
    }

    #[test]
    fn scan_meter_only_runs_during_biometric_scan() {
        let mut loader = loader(LoadingStage::AiInitialization);
        loader.advance_to(5000);
        assert_eq!(loader.state().scan_progress_percent, 0);
    }

    #[test]
    fn systems_come_online_one_per_tick_and_survive_stage_changes() {
        let mut loader = loader(LoadingStage::Initializing);

        loader.advance_to(599);
        assert!(loader.online_systems().is_empty());
        loader.advance_to(600);
        assert_eq!(loader.online_systems(), &catalog::SYSTEMS[..1]);

        loader.set_stage(LoadingStage::BiometricScan);
        loader.advance_to(1800);
        assert_eq!(loader.online_systems(), &catalog::SYSTEMS[..3]);

        loader.advance_to(100_000);
        assert_eq!(loader.online_systems(), &catalog::SYSTEMS[..]);
    }

    #[test]
    fn loader_idles_once_everything_is_done() {
        let mut loader = loader(LoadingStage::Initializing);
        loader.advance_to(120_000);
        assert!(loader.state().completed);
        assert_eq!(loader.next_deadline(), None);
    }

    #[test]
    fn completion_is_only_reported_when_the_host_asks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut loader = loader(LoadingStage::QuantumSync);
        let counter = calls.clone();
        loader.set_on_complete(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        loader.advance_to(120_000);
        assert!(loader.state().completed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        loader.complete();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn progress_is_clamped_and_kept_across_stages() {
        let mut loader = loader(LoadingStage::Initializing);
        loader.set_progress(180);
        assert_eq!(loader.progress(), 100);
        loader.set_progress(42);
        loader.set_stage(LoadingStage::QuantumSync);
        assert_eq!(loader.progress(), 42);
    }

    #[test]
    fn char_prefix_respects_multibyte_characters() {
        assert_eq!(char_prefix("Ωmega", 1), "Ω");
        assert_eq!(char_prefix("Ωmega", 10), "Ωmega");
        assert_eq!(char_prefix("", 3), "");
    }
}
