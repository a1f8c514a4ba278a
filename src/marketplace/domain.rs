use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Prefix of the placeholder session token handed out by `login`.
pub const MOCK_TOKEN_PREFIX: &str = "mock-token-";

/// Account type; fixed when the profile is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Volunteer,
    Requester,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Volunteer => "volunteer",
            UserRole::Requester => "requester",
        }
    }

    /// Exact match on the wire value; registration rejects anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "volunteer" => Some(Self::Volunteer),
            "requester" => Some(Self::Requester),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub role: UserRole,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub biography: String,
    pub rating: f64,
    pub completed_jobs: u32,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Count a finished job and fold a positive rating into the running mean.
    ///
    /// Non-positive ratings still count the job but leave the average as is.
    pub fn record_completion(&mut self, rating: f64) {
        self.completed_jobs += 1;
        if rating > 0.0 {
            let count = f64::from(self.completed_jobs);
            self.rating = (self.rating * (count - 1.0) + rating) / count;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InReview,
    Completed,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::InReview => "in_review",
            JobStatus::Completed => "completed",
        }
    }
}

/// List-view projection of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub requester_id: String,
    pub scheduled_on: String,
    pub location: String,
    pub distance_km: f64,
    pub tags: Vec<String>,
    pub status: JobStatus,
}

/// Full job record as stored.
///
/// `contact_name` and `contact_number` are copied from the requester when the
/// job is posted and are not refreshed when that profile changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    #[serde(flatten)]
    pub summary: JobSummary,
    pub description: String,
    pub meeting_point: String,
    pub requirements: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub contact_name: String,
    pub contact_number: String,
}

impl JobDetail {
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn status(&self) -> JobStatus {
        self.summary.status
    }

    pub fn summary(&self) -> JobSummary {
        self.summary.clone()
    }
}

/// Composite key of an application: `<job id>-<volunteer id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn for_pair(job_id: &str, volunteer_id: &str) -> Self {
        Self(format!("{job_id}-{volunteer_id}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: String,
    pub volunteer_id: String,
    pub message: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Treats an explicit JSON `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Registration payload. `role` stays a raw string so an unknown value gets a
/// dedicated validation message instead of a generic payload error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub biography: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub requester_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scheduled_on: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub meeting_point: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub requirements: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub volunteer_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub volunteer_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
}

/// Feedback echoed back to the requester after completing a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEcho {
    pub rating: f64,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub job: JobDetail,
    pub profile: UserProfile,
    pub feedback: FeedbackEcho,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub jobs: Vec<JobSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerApplicationView {
    pub application: Application,
    pub job: JobSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListing {
    pub items: Vec<VolunteerApplicationView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn volunteer(rating: f64, completed_jobs: u32) -> UserProfile {
        UserProfile {
            id: "volunteer-x".to_string(),
            role: UserRole::Volunteer,
            full_name: "Test Volunteer".to_string(),
            phone: String::new(),
            email: "test@example.com".to_string(),
            address: String::new(),
            skills: Vec::new(),
            interests: Vec::new(),
            biography: String::new(),
            rating,
            completed_jobs,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn positive_rating_updates_running_mean() {
        let mut profile = volunteer(4.0, 1);
        profile.record_completion(5.0);
        assert_eq!(profile.completed_jobs, 2);
        assert_eq!(profile.rating, 4.5);
    }

    #[test]
    fn non_positive_rating_only_counts_the_job() {
        let mut profile = volunteer(4.9, 42);
        let before = profile.rating.to_bits();

        profile.record_completion(0.0);
        profile.record_completion(-3.0);

        assert_eq!(profile.completed_jobs, 44);
        assert_eq!(profile.rating.to_bits(), before);
    }

    #[test]
    fn first_rating_replaces_zero_average() {
        let mut profile = volunteer(0.0, 0);
        profile.record_completion(3.5);
        assert_eq!(profile.rating, 3.5);
    }

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!(UserRole::parse("volunteer"), Some(UserRole::Volunteer));
        assert_eq!(UserRole::parse("requester"), Some(UserRole::Requester));
        assert_eq!(UserRole::parse("Volunteer"), None);
        assert_eq!(UserRole::parse("admin"), None);
    }

    #[test]
    fn job_detail_serializes_flat_camel_case() {
        let detail = JobDetail {
            summary: JobSummary {
                id: "job-1".to_string(),
                title: "Ramp check".to_string(),
                requester_id: "requester-1".to_string(),
                scheduled_on: "2025-02-13".to_string(),
                location: "Bangkok".to_string(),
                distance_km: 6.0,
                tags: vec!["Accessibility".to_string()],
                status: JobStatus::InReview,
            },
            description: "desc".to_string(),
            meeting_point: "gate".to_string(),
            requirements: vec!["Accessibility".to_string()],
            latitude: 13.765,
            longitude: 100.537,
            contact_name: "Mali".to_string(),
            contact_number: "082".to_string(),
        };

        let value = serde_json::to_value(&detail).expect("serializes");
        assert_eq!(value["id"], json!("job-1"));
        assert_eq!(value["requesterId"], json!("requester-1"));
        assert_eq!(value["distanceKm"], json!(6.0));
        assert_eq!(value["status"], json!("in_review"));
        assert_eq!(value["meetingPoint"], json!("gate"));
        assert_eq!(value["contactNumber"], json!("082"));
        assert!(value.get("summary").is_none());
    }

    #[test]
    fn requests_fill_missing_fields_with_defaults() {
        let request: FeedbackRequest =
            serde_json::from_value(json!({ "volunteerId": "volunteer-1" })).expect("parses");
        assert_eq!(request.volunteer_id, "volunteer-1");
        assert_eq!(request.rating, 0.0);
        assert!(request.comment.is_empty());
    }

    #[test]
    fn requests_treat_null_as_missing() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "role": "volunteer",
            "fullName": "Ploy Dee",
            "email": "ploy@example.com",
            "phone": null,
            "skills": null,
        }))
        .expect("parses");
        assert!(request.phone.is_empty());
        assert!(request.skills.is_empty());

        let request: CreateJobRequest = serde_json::from_value(json!({
            "requesterId": "requester-1",
            "title": "Help",
            "requirements": null,
            "latitude": null,
        }))
        .expect("parses");
        assert!(request.requirements.is_empty());
        assert_eq!(request.latitude, 0.0);
    }

    #[test]
    fn application_id_joins_job_and_volunteer() {
        let id = ApplicationId::for_pair("job-1001", "volunteer-1");
        assert_eq!(id.0, "job-1001-volunteer-1");
        assert_eq!(serde_json::to_value(&id).expect("serializes"), json!("job-1001-volunteer-1"));
    }
}
