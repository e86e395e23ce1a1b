mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use learnify_core::model::{CourseId, Dashboard, GameId, ModuleId};
use services::config::{ENV_API_BASE_URL, ENV_API_TOKEN, ENV_REVIEW_THRESHOLD};
use services::dashboard::{pick_greeting, pick_heading};
use services::payload::{DashboardPayload, GameSubmissionPayload};
use services::{
    CatalogueEntry, CatalogueService, ClientConfig, Clock, DashboardOverview, DashboardService,
    DoubtService, HttpLearnifyApi,
};

use crate::render::{render_catalogue, render_doubts, render_overview};

#[derive(Debug, Error)]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("unknown subcommand: {0}")]
    UnknownCommand(String),
    #[error("{command} requires {flag} <value>")]
    MissingFlag {
        command: &'static str,
        flag: &'static str,
    },
    #[error("{flag} must be a whole number, got {raw:?}")]
    NotANumber { flag: &'static str, raw: String },
}

fn required<'a>(
    value: Option<&'a str>,
    command: &'static str,
    flag: &'static str,
) -> Result<&'a str, ArgsError> {
    value.ok_or(ArgsError::MissingFlag { command, flag })
}

fn number(value: &str, flag: &'static str) -> Result<u32, ArgsError> {
    value.trim().parse().map_err(|_| ArgsError::NotANumber {
        flag,
        raw: value.to_owned(),
    })
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app dashboard [--base-url <url>] [--token <token>] [--threshold <n>] [--json]");
    eprintln!("  app report --file <dashboard.json> [--threshold <n>] [--json]");
    eprintln!("  app submit --module <id> --game <id> --title <name> --score <n> --total <n>");
    eprintln!("  app courses [--json]");
    eprintln!("  app complete --course <id>");
    eprintln!("  app ask --question <text>");
    eprintln!("  app doubts [--json]");
    eprintln!();
    eprintln!("Every command except report also takes --base-url and --token.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url http://localhost:5000/api");
    eprintln!("  --threshold 75");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {ENV_API_BASE_URL}, {ENV_API_TOKEN}, {ENV_REVIEW_THRESHOLD}, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Dashboard,
    Report,
    Submit,
    Courses,
    Complete,
    Ask,
    Doubts,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "dashboard" => Some(Self::Dashboard),
            "report" => Some(Self::Report),
            "submit" => Some(Self::Submit),
            "courses" => Some(Self::Courses),
            "complete" => Some(Self::Complete),
            "ask" => Some(Self::Ask),
            "doubts" => Some(Self::Doubts),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    base_url: Option<String>,
    token: Option<String>,
    threshold: Option<String>,
    file: Option<PathBuf>,
    module: Option<String>,
    game: Option<String>,
    title: Option<String>,
    score: Option<String>,
    total: Option<String>,
    course: Option<String>,
    question: Option<String>,
    json: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => parsed.base_url = Some(require_value(args, "--base-url")?),
                "--token" => parsed.token = Some(require_value(args, "--token")?),
                "--threshold" => parsed.threshold = Some(require_value(args, "--threshold")?),
                "--file" => parsed.file = Some(require_value(args, "--file")?.into()),
                "--module" => parsed.module = Some(require_value(args, "--module")?),
                "--game" => parsed.game = Some(require_value(args, "--game")?),
                "--title" => parsed.title = Some(require_value(args, "--title")?),
                "--score" => parsed.score = Some(require_value(args, "--score")?),
                "--total" => parsed.total = Some(require_value(args, "--total")?),
                "--course" => parsed.course = Some(require_value(args, "--course")?),
                "--question" => parsed.question = Some(require_value(args, "--question")?),
                "--json" => parsed.json = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }

    /// Flags win over environment variables.
    fn config(&self) -> anyhow::Result<ClientConfig> {
        let config = ClientConfig::from_lookup(|key| {
            let flag = match key {
                ENV_API_BASE_URL => self.base_url.clone(),
                ENV_API_TOKEN => self.token.clone(),
                ENV_REVIEW_THRESHOLD => self.threshold.clone(),
                _ => None,
            };
            flag.or_else(|| std::env::var(key).ok())
        })
        .context("invalid client configuration")?;
        Ok(config)
    }

    /// The game submission described by `submit`'s flags.
    fn submission(&self) -> anyhow::Result<(ModuleId, GameId, String, GameSubmissionPayload)> {
        let module = required(self.module.as_deref(), "submit", "--module")?;
        let game = required(self.game.as_deref(), "submit", "--game")?;
        let title = required(self.title.as_deref(), "submit", "--title")?;
        let score = number(required(self.score.as_deref(), "submit", "--score")?, "--score")?;
        let total = number(required(self.total.as_deref(), "submit", "--total")?, "--total")?;
        Ok((
            ModuleId::new(module).context("invalid --module")?,
            GameId::new(game).context("invalid --game")?,
            title.to_owned(),
            GameSubmissionPayload::new(score, total),
        ))
    }
}

struct Clients {
    config: ClientConfig,
    api: Arc<HttpLearnifyApi>,
}

impl Clients {
    fn connect(args: &Args) -> anyhow::Result<Self> {
        let config = args.config()?;
        let api = Arc::new(HttpLearnifyApi::new(
            config.settings.clone(),
            config.session.clone(),
        ));
        info!(base_url = %config.settings.api_base_url(), "using learnify api");
        Ok(Self { config, api })
    }

    fn dashboard(&self) -> DashboardService {
        DashboardService::from_settings(self.api.clone(), Clock::system(), &self.config.settings)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("app=info,services=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_overview(overview: &DashboardOverview, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(overview)?);
    } else {
        print!("{}", render_overview(overview));
    }
    Ok(())
}

async fn run_dashboard(args: &Args) -> anyhow::Result<()> {
    let service = Clients::connect(args)?.dashboard();
    let dashboard = service
        .load_dashboard()
        .await
        .context("failed to load dashboard")?;
    let overview = service.overview(&dashboard, &mut rand::rng());
    print_overview(&overview, args.json)
}

fn run_report(args: &Args) -> anyhow::Result<()> {
    let config = args.config()?;
    let path = args.file.as_ref().ok_or(ArgsError::MissingFlag {
        command: "report",
        flag: "--file",
    })?;

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let payload: DashboardPayload = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a dashboard snapshot", path.display()))?;
    let dashboard = Dashboard::try_from(payload).context("invalid dashboard snapshot")?;
    info!(courses = dashboard.courses.len(), "snapshot loaded");

    let mut rng = rand::rng();
    let greeting = pick_greeting(&dashboard.learner.name, &mut rng);
    let heading = pick_heading(&mut rng);
    let overview = DashboardOverview::build(
        &dashboard,
        config.settings.review_threshold(),
        greeting,
        heading,
    );
    print_overview(&overview, args.json)
}

async fn run_submit(args: &Args) -> anyhow::Result<()> {
    let (module_id, game_id, title, submission) = args.submission()?;
    let service = Clients::connect(args)?.dashboard();
    let result = service
        .submit_game(&module_id, game_id, &title, &submission)
        .await
        .context("failed to submit game")?;
    println!(
        "🎮 {}: {} / {} saved",
        result.game_title, result.score, result.total
    );
    Ok(())
}

async fn run_courses(args: &Args) -> anyhow::Result<()> {
    let clients = Clients::connect(args)?;
    let catalogue = CatalogueService::new(clients.api.clone(), Clock::system());
    let (courses, dashboard) = tokio::try_join!(
        async { catalogue.list_courses().await.context("failed to load courses") },
        async {
            clients
                .dashboard()
                .load_dashboard()
                .await
                .context("failed to load dashboard")
        },
    )?;

    let entries = CatalogueEntry::with_progress(courses, &dashboard);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render_catalogue(&entries));
    }
    Ok(())
}

async fn run_complete(args: &Args) -> anyhow::Result<()> {
    let raw = required(args.course.as_deref(), "complete", "--course")?;
    let course_id = CourseId::new(raw).context("invalid --course")?;
    let clients = Clients::connect(args)?;
    CatalogueService::new(clients.api, Clock::system())
        .mark_complete(&course_id)
        .await
        .context("failed to mark course complete")?;
    println!("✅ {course_id} marked complete");
    Ok(())
}

async fn run_ask(args: &Args) -> anyhow::Result<()> {
    let question = required(args.question.as_deref(), "ask", "--question")?;
    let clients = Clients::connect(args)?;
    let doubt = DoubtService::new(clients.api)
        .ask(question)
        .await
        .context("failed to get answer")?;
    println!("🤖 {}", doubt.answer);
    Ok(())
}

async fn run_doubts(args: &Args) -> anyhow::Result<()> {
    let clients = Clients::connect(args)?;
    let doubts = DoubtService::new(clients.api)
        .history()
        .await
        .context("failed to load doubts")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&doubts)?);
    } else {
        print!("{}", render_doubts(&doubts));
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let mut argv = std::env::args().skip(1);

    let cmd = match argv.next() {
        None => {
            print_usage();
            return Ok(());
        }
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(&first).ok_or_else(|| {
            print_usage();
            ArgsError::UnknownCommand(first)
        })?,
    };

    let args = Args::parse(&mut argv).inspect_err(|_| print_usage())?;

    match cmd {
        Command::Dashboard => run_dashboard(&args).await,
        Command::Report => run_report(&args),
        Command::Submit => run_submit(&args).await,
        Command::Courses => run_courses(&args).await,
        Command::Complete => run_complete(&args).await,
        Command::Ask => run_ask(&args).await,
        Command::Doubts => run_doubts(&args).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
