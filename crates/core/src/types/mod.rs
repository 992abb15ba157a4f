//! Core type definitions.

pub mod id;
pub mod media_name;
pub mod richtext;
pub mod search;
