use serde::{Deserialize, Serialize};

use crate::stage::LoadingStage;

/// Timings of the staged loader, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Delay between two revealed characters of a status line.
    pub typing_interval_ms: u64,
    /// Pause after a line is fully revealed, before the next one starts.
    pub settle_delay_ms: u64,
    /// Period of the biometric scan meter.
    pub scan_tick_ms: u64,
    /// Percent added to the scan meter on every tick.
    pub scan_step_percent: u8,
    /// Period of the "systems online" checklist.
    pub systems_tick_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: 50,
            settle_delay_ms: 800,
            scan_tick_ms: 100,
            scan_step_percent: 2,
            systems_tick_ms: 600,
        }
    }
}

/// Configuration of the notification toast stack.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Auto-dismiss delay for notifications that do not specify one.
    pub default_duration_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 5000,
        }
    }
}

/// A single step of the host-driven boot sequence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BootStep {
    /// Stage shown while this step runs. Unknown names become `initializing`.
    pub stage: LoadingStage,
    /// How long the host stays in this step.
    pub duration_ms: u64,
    /// Overall progress reached at the end of the step, 0 to 100.
    pub progress: u8,
}

impl BootStep {
    pub fn new(stage: LoadingStage, duration_ms: u64, progress: u8) -> Self {
        Self {
            stage,
            duration_ms,
            progress,
        }
    }
}

/// Configuration of the boot sequence the host plays back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BootSequenceConfig {
    /// Period of overall progress updates within a step.
    pub progress_interval_ms: u64,
    /// Whether the host pushes notifications on stage changes.
    pub announce_events: bool,
    pub steps: Vec<BootStep>,
}

impl Default for BootSequenceConfig {
    fn default() -> Self {
        Self {
            progress_interval_ms: 250,
            announce_events: true,
            steps: vec![
                BootStep::new(LoadingStage::Initializing, 6000, 25),
                BootStep::new(LoadingStage::BiometricScan, 6000, 50),
                BootStep::new(LoadingStage::AiInitialization, 6000, 75),
                BootStep::new(LoadingStage::QuantumSync, 6000, 100),
            ],
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub loader: LoaderConfig,
    pub notifications: NotificationsConfig,
    pub boot_sequence: BootSequenceConfig,
}
