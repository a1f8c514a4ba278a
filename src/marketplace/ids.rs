use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;

use super::domain::UserRole;

/// Strategy for minting profile and job identifiers.
pub trait IdGenerator: Send + Sync {
    fn user_id(&self, role: UserRole, full_name: &str) -> String;

    /// Job ids follow the size of the job table; rows are never removed, so
    /// the sequence never repeats.
    fn job_id(&self, existing_jobs: usize) -> String {
        format!("job-{}", existing_jobs + 1001)
    }
}

fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or_default()
}

/// `<role>-<first name><HHMMSS>` using the local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockIdGenerator;

impl IdGenerator for ClockIdGenerator {
    fn user_id(&self, role: UserRole, full_name: &str) -> String {
        format!(
            "{}-{}{}",
            role.label(),
            first_name(full_name),
            Local::now().format("%H%M%S")
        )
    }
}

/// Deterministic `<role>-<first name>-<n>` ids.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn user_id(&self, role: UserRole, full_name: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{n}", role.label(), first_name(full_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ids_combine_role_first_name_and_time() {
        let id = ClockIdGenerator.user_id(UserRole::Volunteer, "  Somchai Jaidee ");
        let suffix = id
            .strip_prefix("volunteer-Somchai")
            .expect("role and first name prefix");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn sequential_ids_never_repeat() {
        let ids = SequentialIdGenerator::default();
        let first = ids.user_id(UserRole::Requester, "Mali Nimman");
        let second = ids.user_id(UserRole::Requester, "Mali Nimman");
        assert_eq!(first, "requester-Mali-1");
        assert_eq!(second, "requester-Mali-2");
    }

    #[test]
    fn job_ids_offset_table_size() {
        assert_eq!(ClockIdGenerator.job_id(0), "job-1001");
        assert_eq!(SequentialIdGenerator::default().job_id(2), "job-1003");
    }
}
