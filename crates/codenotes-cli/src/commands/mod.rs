pub mod add;
pub mod check;
pub mod clear;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod goto;
pub mod list;
pub mod note;
pub mod render;
pub mod toggle;
