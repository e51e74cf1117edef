pub mod application;
pub mod block;
pub mod error;
pub mod parser;
pub mod templates;

pub use application::Application;
pub use block::{BlockKind, CodeBlock};
pub use error::{AssembleError, ErrorCategory};
