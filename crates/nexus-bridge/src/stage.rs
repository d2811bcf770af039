use serde::{Deserialize, Serialize};

/// One phase of the decorative boot sequence.
///
/// Each stage selects a fixed, ordered sequence of typed status lines. Names
/// that do not match any stage resolve to [`LoadingStage::Initializing`]
/// instead of failing, both when parsing and when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LoadingStage {
    #[default]
    Initializing,
    BiometricScan,
    AiInitialization,
    QuantumSync,
}

impl LoadingStage {
    /// All stages, in the order a regular boot walks through them.
    pub const ALL: [LoadingStage; 4] = [
        LoadingStage::Initializing,
        LoadingStage::BiometricScan,
        LoadingStage::AiInitialization,
        LoadingStage::QuantumSync,
    ];

    /// Resolves a stage by its snake_case name, falling back to
    /// [`LoadingStage::Initializing`].
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "biometric_scan" => LoadingStage::BiometricScan,
            "ai_initialization" => LoadingStage::AiInitialization,
            "quantum_sync" => LoadingStage::QuantumSync,
            _ => LoadingStage::Initializing,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LoadingStage::Initializing => "initializing",
            LoadingStage::BiometricScan => "biometric_scan",
            LoadingStage::AiInitialization => "ai_initialization",
            LoadingStage::QuantumSync => "quantum_sync",
        }
    }

    /// Human-readable title shown above the typed lines.
    pub fn title(self) -> &'static str {
        match self {
            LoadingStage::Initializing => "Initializing Nexus Core",
            LoadingStage::BiometricScan => "Biometric Verification",
            LoadingStage::AiInitialization => "AI Defense Matrix",
            LoadingStage::QuantumSync => "Quantum Synchronization",
        }
    }
}

impl From<String> for LoadingStage {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl std::fmt::Display for LoadingStage {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Visual category of a typed status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageSeverity {
    System,
    Warning,
    Success,
    Scanning,
}
