pub mod document;

pub use document::{Document, Edit, EditError, Patch};
