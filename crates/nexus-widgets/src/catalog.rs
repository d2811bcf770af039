//! Fixed copy played back by the staged loader.

use nexus_bridge::stage::{LoadingStage, MessageSeverity};

/// One typed status line of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingMessage {
    pub text: &'static str,
    pub severity: MessageSeverity,
    /// Earliest reveal time, measured from the moment the stage started.
    pub reveal_after_ms: u64,
}

const fn line(text: &'static str, severity: MessageSeverity, reveal_after_ms: u64) -> LoadingMessage {
    LoadingMessage {
        text,
        severity,
        reveal_after_ms,
    }
}

const INITIALIZING: &[LoadingMessage] = &[
    line("Booting Nexus Cyber Shield kernel...", MessageSeverity::System, 0),
    line("Mounting encrypted threat signature vault", MessageSeverity::System, 500),
    line("Legacy firewall rules detected, migrating", MessageSeverity::Warning, 1000),
    line("Core services initialized", MessageSeverity::Success, 1500),
];

const BIOMETRIC_SCAN: &[LoadingMessage] = &[
    line("Initializing biometric sensors...", MessageSeverity::Scanning, 0),
    line("Mapping retinal vascular pattern", MessageSeverity::Scanning, 400),
    line("Cross-referencing neural signature", MessageSeverity::Scanning, 800),
    line("Identity confirmed: clearance level OMEGA", MessageSeverity::Success, 1200),
];

const AI_INITIALIZATION: &[LoadingMessage] = &[
    line("Loading AI defense matrix...", MessageSeverity::System, 0),
    line("Training heuristic threat models", MessageSeverity::System, 600),
    line("Anomalous packet burst observed on port 443", MessageSeverity::Warning, 1200),
    line("Predictive countermeasures armed", MessageSeverity::Success, 1800),
];

const QUANTUM_SYNC: &[LoadingMessage] = &[
    line("Establishing quantum entanglement link...", MessageSeverity::System, 0),
    line("Synchronizing qubit key distribution", MessageSeverity::Scanning, 500),
    line("Quantum channel secured", MessageSeverity::Success, 1000),
    line("Nexus Cyber Shield online", MessageSeverity::Success, 1500),
];

/// The ordered line sequence of `stage`.
pub fn messages(stage: LoadingStage) -> &'static [LoadingMessage] {
    match stage {
        LoadingStage::Initializing => INITIALIZING,
        LoadingStage::BiometricScan => BIOMETRIC_SCAN,
        LoadingStage::AiInitialization => AI_INITIALIZATION,
        LoadingStage::QuantumSync => QUANTUM_SYNC,
    }
}

/// Names appended one by one to the "systems online" checklist.
pub const SYSTEMS: [&str; 8] = [
    "Quantum Firewall",
    "Neural Threat Detection",
    "Biometric Gateway",
    "Encrypted Comms Relay",
    "AI Defense Matrix",
    "Intrusion Prevention Grid",
    "Holographic Interface",
    "Zero-Day Sentinel",
];
