//! Volunteer marketplace: profiles, job postings and applications.
//!
//! All state lives in a [`MemoryStore`] handed to the [`MarketplaceService`],
//! which the router exposes under `/api`.

pub mod domain;
pub mod ids;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationListing, ApplicationStatus, ApplyRequest,
    CompletionOutcome, CreateJobRequest, FeedbackEcho, FeedbackRequest, JobDetail, JobListing,
    JobStatus, JobSummary, LoginRequest, LoginResponse, RegisterRequest, UserProfile, UserRole,
    VolunteerApplicationView, MOCK_TOKEN_PREFIX,
};
pub use ids::{ClockIdGenerator, IdGenerator, SequentialIdGenerator};
pub use router::marketplace_router;
pub use service::{MarketplaceError, MarketplaceService};
pub use store::{MemoryStore, Tables};
