pub mod editing;
pub mod parsing;
pub mod preview;

// Re-export key types for easier usage
pub use editing::*;
pub use parsing::rope::Span;
pub use preview::*;
