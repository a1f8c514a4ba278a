use crate::infra::{build_service, LiveService};
use clap::Args;
use volunteer_hub::error::AppError;
use volunteer_hub::marketplace::{
    ApplyRequest, CreateJobRequest, FeedbackRequest, JobSummary, LoginRequest, MarketplaceError,
    UserProfile,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Email used for the volunteer login step
    #[arg(long, default_value = "anya.volunteer@example.com")]
    pub(crate) volunteer_email: String,
    /// Email used for the requester login step
    #[arg(long, default_value = "mali.nimman@example.com")]
    pub(crate) requester_email: String,
    /// Rating given when the posted job is completed (0 keeps the average)
    #[arg(long, default_value_t = 5.0)]
    pub(crate) rating: f64,
    /// Stop after the application step
    #[arg(long)]
    pub(crate) skip_completion: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            volunteer_email: "anya.volunteer@example.com".to_string(),
            requester_email: "mali.nimman@example.com".to_string(),
            rating: 5.0,
            skip_completion: false,
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = build_service(true);
    for line in demo_transcript(&service, &args) {
        println!("{line}");
    }
    Ok(())
}

/// Drive the seeded marketplace through one job lifecycle and describe each
/// step. Failures are reported inline rather than aborting the walkthrough.
pub(crate) fn demo_transcript(service: &LiveService, args: &DemoArgs) -> Vec<String> {
    let mut lines = vec!["Volunteer hub demo".to_string()];

    let volunteer = match login(service, &args.volunteer_email, &mut lines) {
        Some(profile) => profile,
        None => return lines,
    };
    let requester = match login(service, &args.requester_email, &mut lines) {
        Some(profile) => profile,
        None => return lines,
    };

    lines.push("\nOpen jobs".to_string());
    let mut jobs = service.jobs();
    jobs.sort_by(|a, b| a.id.cmp(&b.id));
    lines.extend(jobs.iter().map(describe_job));

    let posted = match service.create_job(CreateJobRequest {
        requester_id: requester.id.clone(),
        title: "Accompany to eye clinic".to_string(),
        scheduled_on: "2025-02-20".to_string(),
        location: "Rutnin Eye Hospital, Bangkok".to_string(),
        meeting_point: "Main lobby".to_string(),
        description: "Help with check-in and reading the prescription instructions.".to_string(),
        requirements: vec!["Patient".to_string(), "Thai/English".to_string()],
        latitude: 13.7383,
        longitude: 100.5605,
    }) {
        Ok(job) => job,
        Err(err) => {
            lines.push(step_failed("post job", &err));
            return lines;
        }
    };
    lines.push(format!(
        "\n{} posted {} (contact {} {})",
        requester.full_name,
        posted.id(),
        posted.contact_name,
        posted.contact_number
    ));

    match service.apply(
        posted.id(),
        ApplyRequest {
            volunteer_id: volunteer.id.clone(),
            message: "I can meet you at the lobby.".to_string(),
        },
    ) {
        Ok(application) => lines.push(format!(
            "{} applied: {} is {:?}",
            volunteer.full_name, application.id.0, application.status
        )),
        Err(err) => {
            lines.push(step_failed("apply", &err));
            return lines;
        }
    }

    if !args.skip_completion {
        match service.complete(
            posted.id(),
            FeedbackRequest {
                volunteer_id: volunteer.id.clone(),
                rating: args.rating,
                comment: "Thank you for the help.".to_string(),
            },
        ) {
            Ok(outcome) => lines.push(format!(
                "{} completed; {} now has {} jobs at {:.2} average",
                outcome.job.id(),
                outcome.profile.full_name,
                outcome.profile.completed_jobs,
                outcome.profile.rating
            )),
            Err(err) => lines.push(step_failed("complete", &err)),
        }
    }

    lines.push(format!("\nApplications for {}", volunteer.full_name));
    match service.volunteer_applications(&volunteer.id) {
        Ok(items) => lines.extend(items.iter().map(|item| {
            format!(
                "- {} -> {}",
                item.application.id.0,
                describe_job(&item.job).trim_start_matches("- ")
            )
        })),
        Err(err) => lines.push(step_failed("list applications", &err)),
    }

    lines
}

fn login(service: &LiveService, email: &str, lines: &mut Vec<String>) -> Option<UserProfile> {
    match service.login(LoginRequest {
        email: email.to_string(),
        password: String::new(),
    }) {
        Ok(response) => {
            lines.push(format!(
                "Signed in {} ({}) with token {}",
                response.user.full_name,
                response.user.role.label(),
                response.token
            ));
            Some(response.user)
        }
        Err(err) => {
            lines.push(step_failed(&format!("login {email}"), &err));
            None
        }
    }
}

fn describe_job(job: &JobSummary) -> String {
    format!(
        "- {} | {} | {} | {:.1} km | {}",
        job.id,
        job.title,
        job.scheduled_on,
        job.distance_km,
        job.status.label()
    )
}

fn step_failed(step: &str, err: &MarketplaceError) -> String {
    format!("! {step} failed: {err}")
}
