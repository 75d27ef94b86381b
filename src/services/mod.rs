// Core Services

pub mod config_store;
pub mod detection;
pub mod text_processor;

pub use config_store::*;

pub use detection::{
    detect_batch,
    AiDetector,
    ComponentScore,
    DetectionSensitivity,
    FeatureVector,
    ScoreCombiner,
    SignalDefinition,
    SignalTable,
    StructuralFeatures,
    WeightProfile,
};
