use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, ApplyRequest, CompletionOutcome,
    CreateJobRequest, FeedbackEcho, FeedbackRequest, JobDetail, JobStatus, JobSummary,
    LoginRequest, LoginResponse, RegisterRequest, UserProfile, UserRole, VolunteerApplicationView,
    MOCK_TOKEN_PREFIX,
};
use super::ids::IdGenerator;
use super::store::MemoryStore;

/// Request-level failures; each maps to one HTTP status and error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketplaceError {
    #[error("invalid payload")]
    InvalidPayload,
    #[error("role must be volunteer or requester")]
    InvalidRole,
    #[error("full name and email are required")]
    MissingRegistrationFields,
    #[error("requesterId and title are required")]
    MissingJobFields,
    #[error("requester profile missing")]
    RequesterMissing,
    #[error("volunteer profile missing")]
    VolunteerMissing,
    #[error("account not found")]
    AccountNotFound,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("job not found")]
    JobNotFound,
    #[error("volunteer not found")]
    VolunteerNotFound,
    #[error("requester not found")]
    RequesterNotFound,
}

/// Operations behind the HTTP API. Every method takes the store lock once
/// and releases it before returning.
pub struct MarketplaceService<G> {
    store: Arc<MemoryStore>,
    ids: Arc<G>,
}

impl<G> MarketplaceService<G>
where
    G: IdGenerator + 'static,
{
    pub fn new(store: Arc<MemoryStore>, ids: Arc<G>) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Mock sign-in: any password is accepted for a known email.
    ///
    /// Emails are not unique; when several profiles share one, the earliest
    /// registered wins. Matching folds case with Unicode lowercasing.
    pub fn login(&self, request: LoginRequest) -> Result<LoginResponse, MarketplaceError> {
        let wanted = request.email.to_lowercase();
        let tables = self.store.read();
        let profile = tables
            .users
            .values()
            .filter(|profile| profile.email.to_lowercase() == wanted)
            .min_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
            .ok_or_else(|| {
                debug!("login rejected for unknown account");
                MarketplaceError::AccountNotFound
            })?;

        Ok(LoginResponse {
            token: format!("{MOCK_TOKEN_PREFIX}{}", profile.id),
            user: profile.clone(),
        })
    }

    pub fn register(&self, request: RegisterRequest) -> Result<UserProfile, MarketplaceError> {
        let role = UserRole::parse(&request.role).ok_or(MarketplaceError::InvalidRole)?;
        if request.full_name.trim().is_empty() || request.email.trim().is_empty() {
            return Err(MarketplaceError::MissingRegistrationFields);
        }

        let base_id = self.ids.user_id(role, &request.full_name);

        let mut tables = self.store.write();
        let mut id = base_id.clone();
        let mut attempt = 1;
        while tables.users.contains_key(&id) {
            attempt += 1;
            id = format!("{base_id}-{attempt}");
        }

        let profile = UserProfile {
            id,
            role,
            full_name: request.full_name,
            phone: request.phone,
            email: request.email,
            address: request.address,
            skills: request.skills,
            interests: request.interests,
            biography: request.biography,
            rating: 0.0,
            completed_jobs: 0,
            created_at: Utc::now(),
        };
        tables.users.insert(profile.id.clone(), profile.clone());
        drop(tables);

        info!(user_id = %profile.id, role = role.label(), "profile registered");
        Ok(profile)
    }

    pub fn profile(&self, id: &str) -> Result<UserProfile, MarketplaceError> {
        self.store
            .read()
            .users
            .get(id)
            .cloned()
            .ok_or(MarketplaceError::ProfileNotFound)
    }

    /// Summaries of every job, in table iteration order.
    pub fn jobs(&self) -> Vec<JobSummary> {
        self.store
            .read()
            .jobs
            .values()
            .map(JobDetail::summary)
            .collect()
    }

    pub fn job(&self, id: &str) -> Result<JobDetail, MarketplaceError> {
        self.store
            .read()
            .jobs
            .get(id)
            .cloned()
            .ok_or(MarketplaceError::JobNotFound)
    }

    /// Post a job. Requirements double as the summary tags and the contact
    /// fields are a snapshot of the requester profile.
    pub fn create_job(&self, request: CreateJobRequest) -> Result<JobDetail, MarketplaceError> {
        if request.requester_id.is_empty() || request.title.trim().is_empty() {
            return Err(MarketplaceError::MissingJobFields);
        }

        let mut tables = self.store.write();
        let requester = tables.users.get(&request.requester_id).ok_or_else(|| {
            debug!(requester_id = %request.requester_id, "job rejected for unknown requester");
            MarketplaceError::RequesterMissing
        })?;
        let contact_name = requester.full_name.clone();
        let contact_number = requester.phone.clone();

        let id = self.ids.job_id(tables.jobs.len());
        let job = JobDetail {
            summary: JobSummary {
                id: id.clone(),
                title: request.title,
                requester_id: request.requester_id,
                scheduled_on: request.scheduled_on,
                location: request.location,
                distance_km: 0.0,
                tags: request.requirements.clone(),
                status: JobStatus::Open,
            },
            description: request.description,
            meeting_point: request.meeting_point,
            requirements: request.requirements,
            latitude: request.latitude,
            longitude: request.longitude,
            contact_name,
            contact_number,
        };
        tables.jobs.insert(id, job.clone());
        drop(tables);

        info!(job_id = %job.id(), requester_id = %job.summary.requester_id, "job posted");
        Ok(job)
    }

    /// Record (or overwrite) a volunteer's application and move the job into
    /// review, whatever its current status.
    pub fn apply(
        &self,
        job_id: &str,
        request: ApplyRequest,
    ) -> Result<Application, MarketplaceError> {
        let mut tables = self.store.write();
        if !tables.jobs.contains_key(job_id) {
            return Err(MarketplaceError::JobNotFound);
        }
        if !tables.users.contains_key(&request.volunteer_id) {
            return Err(MarketplaceError::VolunteerMissing);
        }

        let now = Utc::now();
        let application = Application {
            id: ApplicationId::for_pair(job_id, &request.volunteer_id),
            job_id: job_id.to_string(),
            volunteer_id: request.volunteer_id,
            message: request.message,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables
            .applications
            .insert(application.id.clone(), application.clone());

        if let Some(job) = tables.jobs.get_mut(job_id) {
            job.summary.status = JobStatus::InReview;
        }
        drop(tables);

        info!(
            application_id = %application.id.0,
            job_id,
            "application recorded"
        );
        Ok(application)
    }

    /// Close out a job and credit the volunteer.
    pub fn complete(
        &self,
        job_id: &str,
        request: FeedbackRequest,
    ) -> Result<CompletionOutcome, MarketplaceError> {
        let mut tables = self.store.write();
        if !tables.jobs.contains_key(job_id) {
            return Err(MarketplaceError::JobNotFound);
        }
        let profile = tables
            .users
            .get_mut(&request.volunteer_id)
            .ok_or(MarketplaceError::VolunteerMissing)?;
        profile.record_completion(request.rating);
        let profile = profile.clone();

        let job = tables
            .jobs
            .get_mut(job_id)
            .ok_or(MarketplaceError::JobNotFound)?;
        job.summary.status = JobStatus::Completed;
        let job = job.clone();
        drop(tables);

        info!(
            job_id,
            volunteer_id = %profile.id,
            completed_jobs = profile.completed_jobs,
            rating = profile.rating,
            "job completed"
        );
        Ok(CompletionOutcome {
            job,
            profile,
            feedback: FeedbackEcho {
                rating: request.rating,
                comment: request.comment,
            },
        })
    }

    /// Applications submitted by a volunteer, each joined with its job.
    pub fn volunteer_applications(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<VolunteerApplicationView>, MarketplaceError> {
        let tables = self.store.read();
        if !tables.users.contains_key(volunteer_id) {
            return Err(MarketplaceError::VolunteerNotFound);
        }

        Ok(tables
            .applications
            .values()
            .filter(|application| application.volunteer_id == volunteer_id)
            .filter_map(|application| {
                tables
                    .jobs
                    .get(&application.job_id)
                    .map(|job| VolunteerApplicationView {
                        application: application.clone(),
                        job: job.summary(),
                    })
            })
            .collect())
    }

    pub fn requester_jobs(&self, requester_id: &str) -> Result<Vec<JobSummary>, MarketplaceError> {
        let tables = self.store.read();
        if !tables.users.contains_key(requester_id) {
            return Err(MarketplaceError::RequesterNotFound);
        }

        Ok(tables
            .jobs
            .values()
            .filter(|job| job.summary.requester_id == requester_id)
            .map(JobDetail::summary)
            .collect())
    }
}
