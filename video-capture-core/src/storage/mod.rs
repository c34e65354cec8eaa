pub mod metadata;
pub mod output;
