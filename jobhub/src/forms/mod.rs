//! Local validation of outgoing payloads. Nothing here talks to the network.

pub mod job_draft;
pub mod profile;

pub use job_draft::{seconds_until, DraftMode, JobDraft};
pub use profile::{user_acronym, PasswordChange, ProfileUpdate};
