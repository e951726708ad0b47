pub mod completion;
pub mod document;
pub mod section;
