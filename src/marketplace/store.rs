use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Months, Utc};

use super::domain::{
    Application, ApplicationId, JobDetail, JobStatus, JobSummary, UserProfile, UserRole,
};

/// The three tables owned by the store. Rows are only ever inserted or
/// mutated in place; nothing is removed.
#[derive(Debug, Default)]
pub struct Tables {
    pub users: HashMap<String, UserProfile>,
    pub jobs: HashMap<String, JobDetail>,
    pub applications: HashMap<ApplicationId, Application>,
}

/// Process-local state behind a single reader/writer lock.
///
/// Callers take `read()` for lookups and scans and `write()` for inserts and
/// field updates, and drop the guard before the request completes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Store pre-populated with the demo volunteer, requester and two jobs.
    pub fn seeded() -> Self {
        Self::from_tables(seed_tables(Utc::now()))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn months_before(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(crate) fn seed_tables(now: DateTime<Utc>) -> Tables {
    let mut tables = Tables::default();

    let volunteer = UserProfile {
        id: "volunteer-1".to_string(),
        role: UserRole::Volunteer,
        full_name: "Anya Volunteer".to_string(),
        phone: "081-111-1111".to_string(),
        email: "anya.volunteer@example.com".to_string(),
        address: "Bangkok, Thailand".to_string(),
        skills: strings(&["Wheelchair assistance", "Thai/English"]),
        interests: strings(&["Hospital visits", "Transportation"]),
        biography: "Former physical therapist now volunteering weekends.".to_string(),
        rating: 4.9,
        completed_jobs: 42,
        created_at: months_before(now, 3),
    };

    let requester = UserProfile {
        id: "requester-1".to_string(),
        role: UserRole::Requester,
        full_name: "Mali Nimman".to_string(),
        phone: "082-222-2222".to_string(),
        email: "mali.nimman@example.com".to_string(),
        address: "Chiang Mai, Thailand".to_string(),
        skills: Vec::new(),
        interests: Vec::new(),
        biography: "Coordinating support for my father while he recovers.".to_string(),
        rating: 4.7,
        completed_jobs: 13,
        created_at: months_before(now, 1) - Duration::days(10),
    };

    let hospital_visit = JobDetail {
        summary: JobSummary {
            id: "job-1001".to_string(),
            title: "Wheelchair assistance at hospital".to_string(),
            requester_id: requester.id.clone(),
            scheduled_on: "2025-02-11".to_string(),
            location: "Siriraj Hospital, Bangkok".to_string(),
            distance_km: 3.2,
            tags: strings(&["Hospital", "Wheelchair"]),
            status: JobStatus::Open,
        },
        description:
            "Meet at the lobby and assist with navigating to the cardiology department."
                .to_string(),
        meeting_point: "Entrance B, Siriraj Hospital".to_string(),
        requirements: strings(&[
            "Comfortable pushing a wheelchair",
            "Able to communicate with nurses",
        ]),
        latitude: 13.7563,
        longitude: 100.5018,
        contact_name: requester.full_name.clone(),
        contact_number: requester.phone.clone(),
    };

    let ramp_inspection = JobDetail {
        summary: JobSummary {
            id: "job-1002".to_string(),
            title: "Home wheelchair ramp inspection".to_string(),
            requester_id: requester.id.clone(),
            scheduled_on: "2025-02-13".to_string(),
            location: "Ratchathewi, Bangkok".to_string(),
            distance_km: 6.0,
            tags: strings(&["Home visit", "Accessibility"]),
            status: JobStatus::Open,
        },
        description: "Check the ramp installed last month and provide recommendations."
            .to_string(),
        meeting_point: "House 72/4, Ratchathewi".to_string(),
        requirements: strings(&["Experience with accessibility equipment"]),
        latitude: 13.7650,
        longitude: 100.5370,
        contact_name: requester.full_name.clone(),
        contact_number: requester.phone.clone(),
    };

    tables.users.insert(volunteer.id.clone(), volunteer);
    tables.users.insert(requester.id.clone(), requester);
    tables
        .jobs
        .insert(hospital_visit.id().to_string(), hospital_visit);
    tables
        .jobs
        .insert(ramp_inspection.id().to_string(), ramp_inspection);

    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_holds_demo_rows() {
        let store = MemoryStore::seeded();
        let tables = store.read();

        assert_eq!(tables.users.len(), 2);
        assert_eq!(tables.jobs.len(), 2);
        assert!(tables.applications.is_empty());

        let job = tables.jobs.get("job-1001").expect("seed job present");
        assert_eq!(job.status(), JobStatus::Open);
        assert_eq!(job.contact_name, "Mali Nimman");
        assert!(tables.users.contains_key(&job.summary.requester_id));
    }

    #[test]
    fn seeded_accounts_predate_now() {
        let now = Utc::now();
        let tables = seed_tables(now);
        for profile in tables.users.values() {
            assert!(profile.created_at < now, "{} should predate now", profile.id);
        }
    }

    #[test]
    fn writes_are_visible_to_later_reads() {
        let store = MemoryStore::new();
        assert!(store.read().jobs.is_empty());

        let seeded = seed_tables(Utc::now());
        let job = seeded.jobs.get("job-1002").cloned().expect("seed job present");
        store.write().jobs.insert(job.id().to_string(), job);

        assert!(store.read().jobs.contains_key("job-1002"));
    }
}
