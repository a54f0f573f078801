//! Data models for the study resources application.

mod course;
mod resource;
mod topic;
mod user;

pub use course::*;
pub use resource::*;
pub use topic::*;
pub use user::*;
