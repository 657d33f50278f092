pub mod extraction;
pub mod job;
pub mod speech;
pub mod translation;
