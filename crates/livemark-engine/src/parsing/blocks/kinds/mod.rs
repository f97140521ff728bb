pub mod block_quote;
pub mod callout;
pub mod code_fence;
pub mod math;

pub use block_quote::BlockQuote;
pub use callout::{CalloutHeader, CalloutSyntax};
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use math::{MathFence, MathLine};
