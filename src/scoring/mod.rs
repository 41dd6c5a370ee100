// Fit scoring and best-fit search.

pub mod best_fit;
pub mod fit;

pub use best_fit::{best_fit, BestFit};
pub use fit::{label_for, score_fit, FitLabel, FitResult, ATTRIBUTE_WEIGHTS, UNUSABLE_SCORE};
