//! Static data snapshots: skill vocabulary and job requirements

pub mod jobs;
pub mod snapshot;
pub mod vocabulary;
