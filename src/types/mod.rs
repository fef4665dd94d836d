// SelectionsSaver shared type definitions
// Each submodule defines types used across the crate.

pub mod bookmark;
pub mod errors;
pub mod scope;
pub mod selection;
pub mod settings;
