//! Ready-made survey catalogs, as builder code and as documents on disk.

pub mod onboarding;
pub mod product_feedback;

// Re-export onboarding catalog
pub use onboarding::linear_onboarding;

// Re-export product_feedback catalog
pub use product_feedback::{
    PRODUCT_FEEDBACK_YAML, product_feedback, product_feedback_document,
};
