use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use internfilter::config::{ENV_LOG, ENV_SNAPSHOT};
use internfilter::{
    Config, Facet, FilterState, Internship, STIPEND_NO_FILTER, STIPEND_SLIDER_MAX,
    STIPEND_SLIDER_STEP, Session, Threshold, Toggle, on_stipend_slider,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "internfilter")]
#[command(about = "Browse internship listings with stackable filters")]
struct Cli {
    /// Listing snapshot (JSON feed payload)
    #[arg(long, global = true, env = ENV_SNAPSHOT)]
    snapshot: Option<PathBuf>,

    /// Local snapshot to use when the main one cannot be loaded
    #[arg(long, global = true)]
    fallback: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List internships matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show internship details
    Show {
        /// Internship ID
        id: i64,
    },

    /// Show the profile and location choices in the current listings
    Facets {
        /// Only show choices containing this text
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Work from home only
    #[arg(long)]
    remote: bool,

    /// Part-time only
    #[arg(long)]
    part_time: bool,

    /// With a pre-placement job offer
    #[arg(long)]
    job_offer: bool,

    /// Employers that respond quickly
    #[arg(long)]
    fast_response: bool,

    /// Postings looking for early applicants
    #[arg(long)]
    early_applicant: bool,

    /// Postings for women
    #[arg(long)]
    for_women: bool,

    /// Minimum monthly stipend (0 = any)
    #[arg(long, default_value_t = STIPEND_NO_FILTER)]
    min_stipend: u32,

    /// Starting from (or after), YYYY-MM-DD
    #[arg(long, default_value = "")]
    start_from: String,

    /// Maximum duration in months
    #[arg(long, default_value = "")]
    max_duration: String,

    /// Search title, company and profile
    #[arg(short, long, default_value = "")]
    keyword: String,

    /// Profile to include (repeatable)
    #[arg(short, long = "profile")]
    profiles: Vec<String>,

    /// Location to include (repeatable)
    #[arg(short, long = "location")]
    locations: Vec<String>,
}

impl FilterArgs {
    fn to_state(&self, session: &Session) -> FilterState {
        if !on_stipend_slider(self.min_stipend) {
            eprintln!(
                "Note: --min-stipend {} is off the 0-{} slider (steps of {}); using it as given.",
                self.min_stipend, STIPEND_SLIDER_MAX, STIPEND_SLIDER_STEP
            );
        }

        let toggles = [
            (Toggle::Remote, self.remote),
            (Toggle::PartTime, self.part_time),
            (Toggle::JobOffer, self.job_offer),
            (Toggle::FastResponse, self.fast_response),
            (Toggle::EarlyApplicant, self.early_applicant),
            (Toggle::ForWomen, self.for_women),
        ];

        let mut state = toggles
            .into_iter()
            .fold(FilterState::default(), |state, (toggle, on)| state.with_toggle(toggle, on))
            .with_threshold(Threshold::MinStipend(self.min_stipend))
            .with_threshold(Threshold::start_from_text(&self.start_from))
            .with_threshold(Threshold::max_duration_text(&self.max_duration))
            .with_keyword(self.keyword.as_str());

        let tags = self
            .profiles
            .iter()
            .map(|p| (Facet::Profiles, p))
            .chain(self.locations.iter().map(|l| (Facet::Locations, l)));

        for (facet, value) in tags {
            match state.clone().with_tag(facet, value, session.facets()) {
                Some(next) => state = next,
                None => print_tag_hint(session, facet, value),
            }
        }

        state
    }
}

fn print_tag_hint(session: &Session, facet: Facet, value: &str) {
    let suggestions = session.facets().suggest(facet, value);
    if suggestions.is_empty() {
        eprintln!("Ignoring '{}': not one of the listed {} (or repeated).", value, facet.name());
    } else {
        eprintln!(
            "Ignoring '{}': not one of the listed {}. Did you mean: {}?",
            value,
            facet.name(),
            suggestions.join(", ")
        );
    }
}

fn init_logging() {
    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = Config::resolve(cli.snapshot, cli.fallback);
    let provider = config.provider();

    let records = provider
        .fetch()
        .with_context(|| format!("Failed to load internships from {}", provider.describe()))?;
    let mut session = Session::with_records(records);

    match cli.command {
        Commands::List { filters } => {
            let state = filters.to_state(&session);
            session.replace_filters(state);
            print_list(&session);
        }

        Commands::Show { id } => match session.raw_records().iter().find(|r| r.id == id) {
            Some(job) => print_details(job),
            None => println!("Internship #{} not found.", id),
        },

        Commands::Facets { query } => {
            for facet in [Facet::Profiles, Facet::Locations] {
                let values = session.facets().suggest(facet, &query);
                println!("{} ({}):", facet.name().to_uppercase(), values.len());
                for value in values {
                    println!("  {}", value);
                }
            }
        }
    }

    Ok(())
}

fn print_list(session: &Session) {
    let visible = session.visible_records();
    let total = session.raw_records().len();

    if visible.is_empty() {
        println!("No internships match the current filters ({} listed).", total);
        return;
    }

    let today = Local::now().date_naive();
    println!(
        "{:<10} {:<24} {:<20} {:<22} {:<10} {:<16} {:<12}",
        "ID", "PROFILE", "COMPANY", "LOCATIONS", "DURATION", "STIPEND", "POSTED"
    );
    println!("{}", "-".repeat(120));
    for job in &visible {
        println!(
            "{:<10} {:<24} {:<20} {:<22} {:<10} {:<16} {:<12}",
            job.id,
            truncate(&job.profile_name, 22),
            truncate(&job.company_name, 18),
            truncate(&job.displayed_locations().join(", "), 20),
            truncate(&job.duration, 10),
            truncate(&job.displayed_stipend(), 16),
            job.posted_relative(today),
        );
    }
    println!("\n{} of {} internships", visible.len(), total);
}

fn print_details(job: &Internship) {
    let wrap = |text: String| {
        let options = textwrap::Options::new(80).subsequent_indent("    ");
        println!("{}", textwrap::fill(&text, options));
    };

    println!("Internship #{}", job.id);
    wrap(format!("Title: {}", job.title));
    println!("Company: {}", job.company_name);
    println!("Profile: {}", job.profile_name);
    wrap(format!("Locations: {}", job.displayed_locations().join(", ")));
    if !job.start_date.is_empty() {
        println!("Starts: {}", job.start_date);
    }
    if !job.duration.is_empty() {
        println!("Duration: {}", job.duration);
    }
    println!("Stipend: {}", job.displayed_stipend());
    if job.part_time {
        println!("Part-time: yes");
    }
    if job.is_ppo {
        println!("Job offer: yes");
    }
    if let Some(deadline) = &job.application_deadline {
        println!("Apply by: {}", deadline);
    }
    println!("Posted: {}", job.posted_relative(Local::now().date_naive()));
    if !job.labels_app_in_card.is_empty() {
        wrap(format!("Labels: {}", job.labels_app_in_card.join(", ")));
    }
    if let Some(url) = &job.url {
        println!("URL: {}", url);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
