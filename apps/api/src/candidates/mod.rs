// Candidate integration: ATS database lookups, resume file download, and the
// profile pipeline that ties them to resume parsing.

pub mod download;
pub mod handlers;
pub mod profile;
pub mod repository;
