// Detection Module
// AI-likelihood scoring organized into specialized submodules:
// - signal_table: immutable lexical and structural cue definitions
// - pattern_matcher: weighted lexical cue scoring
// - linguistic: sentence/word feature vector
// - structural: document organization scoring
// - classifier: weighted fusion, consensus confidence, thresholding
// - detector: the engine tying the extractors to the combiner
// - batch: concurrent scoring of many texts

pub mod batch;
pub mod classifier;
pub mod component;
pub mod detector;
pub mod linguistic;
pub mod pattern_matcher;
pub mod sensitivity;
pub mod signal_table;
pub mod structural;

pub use batch::{detect_batch, summarize};
pub use classifier::{consensus_confidence, ScoreCombiner, WeightProfile};
pub use component::{ComponentScore, NEUTRAL_SCORE};
pub use detector::AiDetector;
pub use linguistic::{extract_features, linguistic_score, FeatureVector};
pub use pattern_matcher::PatternMatcher;
pub use sensitivity::DetectionSensitivity;
pub use signal_table::{SignalDefinition, SignalKind, SignalTable, StructuralCues};
pub use structural::{StructuralAnalyzer, StructuralFeatures};
