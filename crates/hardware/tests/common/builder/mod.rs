//! Builders for test programs.

pub mod instruction;
