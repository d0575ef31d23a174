use crate::infra::{load_document, JobDocuments};
use chrono::{Local, NaiveDate};
use clap::Args;
use placement_match::config::AppConfig;
use placement_match::error::AppError;
use placement_match::workflows::placement::{
    JobMatchView, JobPosting, MatchScorer, StudentProfile,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Student profile document (JSON)
    #[arg(long)]
    pub(crate) student: PathBuf,
    /// Job posting document (JSON object or array); repeat for several files
    #[arg(long = "job", required = true)]
    pub(crate) jobs: Vec<PathBuf>,
    /// Answers to the jobs' custom requirements, in order (e.g. `true,false`)
    #[arg(long, value_delimiter = ',')]
    pub(crate) responses: Vec<bool>,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the match results as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        student,
        jobs,
        responses,
        today,
        json,
    } = args;

    let config = AppConfig::load()?;
    let scorer = MatchScorer::new(config.matching);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let profile: StudentProfile = load_document(&student)?;
    let mut postings: Vec<JobPosting> = Vec::new();
    for path in &jobs {
        let documents: JobDocuments = load_document(path)?;
        postings.extend(documents.into_vec());
    }

    let views = score_jobs(&scorer, &profile, &postings, &responses, today);

    if json {
        let rendered = serde_json::to_string_pretty(&views).map_err(AppError::Encode)?;
        println!("{rendered}");
    } else {
        println!("Match report for student {} ({})", profile.id, today);
        for view in &views {
            render_view(view);
        }
    }

    Ok(())
}

pub(crate) fn score_jobs(
    scorer: &MatchScorer,
    profile: &StudentProfile,
    postings: &[JobPosting],
    responses: &[bool],
    today: NaiveDate,
) -> Vec<JobMatchView> {
    postings
        .iter()
        .map(|job| {
            let result = scorer.calculate_match_on(profile, job, responses, today);
            JobMatchView::new(job, result)
        })
        .collect()
}

fn render_view(view: &JobMatchView) {
    let result = &view.result;
    let breakdown = &result.breakdown;
    println!("\n{} - {} @ {}", view.job_id, view.title, view.company);
    println!(
        "- Overall {}% | can apply: {}",
        result.overall_percentage,
        if result.can_apply { "yes" } else { "no" }
    );
    println!(
        "- Skills {}% ({}/{} matched) | eligibility {}% ({}/{} criteria) | requirements {}% ({}/{})",
        breakdown.skills.percentage,
        breakdown.skills.matched,
        breakdown.skills.required,
        breakdown.eligibility.percentage,
        breakdown.eligibility.passed,
        breakdown.eligibility.total,
        breakdown.requirements.percentage,
        breakdown.requirements.met,
        breakdown.requirements.total
    );
    for line in &result.summary {
        println!("  - {line}");
    }
}
