use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;
use cli_style::{
    get_prompt, get_styles, print_empty_list, print_error, print_goodbye, print_help, print_info,
    print_job_card, print_key_value, print_list_footer, print_options, print_section_footer,
    print_section_header, print_success, print_warning, print_welcome, CommandHelp, TableBuilder,
};

use jobscroll::board::{
    FetchOutcome, FilterOptions, FilterType, JobBoard, ScrollSubscription, UnfilteredPagePolicy,
    VisibilityTrigger, VocabularyScope,
};
use jobscroll::config::{AppConfig, CliConfig, FileConfig};
use jobscroll::render::{self, JobCardView, OptionsView};
use jobscroll::source::{JobSourceClient, DEFAULT_ENDPOINT};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "jobscroll", version = env!("APP_VERSION"), styles = get_styles())]
struct CliArgs {
    /// Path to a TOML config file. Values found there override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// URL job pages are requested from.
    #[clap(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Records requested per page.
    #[clap(long, default_value_t = 12)]
    pub page_limit: usize,

    /// Offset step between consecutive pages.
    #[clap(long, default_value_t = 10)]
    pub page_stride: usize,

    /// Timeout of a single page request, in seconds.
    #[clap(long, default_value_t = 30)]
    pub timeout_sec: u64,

    /// Quiet period before a company search takes effect, in milliseconds.
    #[clap(long, default_value_t = 500)]
    pub search_debounce_ms: u64,

    /// What a new page does to the job list while no filter is active.
    #[clap(long, value_enum, default_value_t = UnfilteredPagePolicy::Replace)]
    pub unfiltered_pages: UnfilteredPagePolicy,

    /// Which pages the filter options are collected from.
    #[clap(long, value_enum, default_value_t = VocabularyScope::LatestPage)]
    pub vocabulary: VocabularyScope,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            endpoint: self.endpoint.clone(),
            timeout_sec: self.timeout_sec,
            page_limit: self.page_limit,
            page_stride: self.page_stride,
            search_debounce_ms: self.search_debounce_ms,
            unfiltered_pages: self.unfiltered_pages,
            vocabulary: self.vocabulary,
        }
    }
}

#[derive(Parser)]
#[command(styles = get_styles(), name = "", disable_help_subcommand = true)]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Load the next page of jobs.
    More,

    /// List the jobs currently shown.
    List,

    /// Show the full card of a listed job.
    Show {
        /// Position in the list, starting at 1.
        index: usize,
    },

    /// Keep only jobs matching a value. Replaces any filter of the same type.
    Filter {
        #[arg(value_enum)]
        filter_type: FilterType,
        #[arg(required = true)]
        value: Vec<String>,
    },

    /// Remove the filter of the given type, or every filter.
    Unfilter {
        #[arg(value_enum)]
        filter_type: Option<FilterType>,
    },

    /// Search by company name. Without text the search is cleared.
    Search { text: Vec<String> },

    /// Show the values each filter can take.
    Options,

    /// Show paging and filter state.
    Status,

    /// Show this list of commands.
    Help,

    /// Close this program.
    Exit,
}

const COMMANDS_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "more",
        args: "",
        description: "Load the next page of jobs",
    },
    CommandHelp {
        name: "list",
        args: "",
        description: "List the jobs currently shown",
    },
    CommandHelp {
        name: "show",
        args: "<n>",
        description: "Show the full card of job n",
    },
    CommandHelp {
        name: "filter",
        args: "<min-exp|location|role|min-pay> <value>",
        description: "Keep only jobs matching value",
    },
    CommandHelp {
        name: "unfilter",
        args: "[<type>]",
        description: "Remove one filter, or all of them",
    },
    CommandHelp {
        name: "search",
        args: "[<text>]",
        description: "Search by company name",
    },
    CommandHelp {
        name: "options",
        args: "",
        description: "Show the values each filter can take",
    },
    CommandHelp {
        name: "status",
        args: "",
        description: "Show paging and filter state",
    },
    CommandHelp {
        name: "help",
        args: "",
        description: "Show this list of commands",
    },
    CommandHelp {
        name: "exit",
        args: "",
        description: "Close this program",
    },
];

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

/// Interactive browsing state: the board plus its load-more binding.
struct Session<'a> {
    runtime: &'a Runtime,
    config: &'a AppConfig,
    board: JobBoard,
    trigger: VisibilityTrigger,
    subscription: ScrollSubscription,
}

impl Session<'_> {
    fn execute_command(&mut self, line: &str) -> CommandExecutionResult {
        let line = line.trim();
        if line.is_empty() {
            return CommandExecutionResult::Ok;
        }

        let args =
            shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
        let cli =
            InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

        let command = match cli {
            Ok(cli) => cli.command,
            Err(e) => {
                if e.print().is_err() {
                    println!("{}", e);
                }
                return CommandExecutionResult::Ok;
            }
        };

        match command {
            InnerCommand::More => {
                self.load_more();
                self.print_jobs();
            }
            InnerCommand::List => self.print_jobs(),
            InnerCommand::Show { index } => {
                let visible = self.board.visible_jobs();
                match index.checked_sub(1).and_then(|i| visible.get(i)) {
                    Some(job) => print_job_card(index, &JobCardView::new(job, true)),
                    None => {
                        return CommandExecutionResult::Error(format!(
                            "No job #{}, {} job(s) listed",
                            index,
                            visible.len()
                        ))
                    }
                }
            }
            InnerCommand::Filter { filter_type, value } => {
                let options = self.board.filter_options();
                let value = resolve_option(&options, filter_type, &value.join(" "));
                if let Err(err) = self.board.set_filter(filter_type, &value) {
                    return CommandExecutionResult::Error(err.to_string());
                }
                print_success(&format!("Filtering by {} = {}", filter_type, value));
                self.print_jobs();
            }
            InnerCommand::Unfilter { filter_type } => {
                match filter_type {
                    Some(filter_type) => {
                        if self.board.clear_filter(filter_type) {
                            print_success(&format!("Removed the {} filter", filter_type));
                        } else {
                            print_warning(&format!("No {} filter was set", filter_type));
                        }
                    }
                    None => {
                        self.board.clear_filters();
                        print_success("Removed every filter");
                    }
                }
                self.print_jobs();
            }
            InnerCommand::Search { text } => {
                let text = text.join(" ");
                if text.trim().is_empty() {
                    print_info("Clearing the company search");
                } else {
                    print_info(&format!(
                        "Searching companies for {:?}, applies in {} ms",
                        text, self.config.search_debounce_ms
                    ));
                }
                self.board.set_company_search(text);
            }
            InnerCommand::Options => {
                print_options(&OptionsView::new(&self.board.filter_options()));
            }
            InnerCommand::Status => self.print_status(),
            InnerCommand::Help => print_help(COMMANDS_HELP),
            InnerCommand::Exit => return CommandExecutionResult::Exit,
        }
        CommandExecutionResult::Ok
    }

    /// Fire the load-more signal and wait for the page it triggers.
    fn load_more(&mut self) {
        while let Some(stale) = self.subscription.try_next_outcome() {
            debug!("Discarding outcome of an earlier load: {:?}", stale);
        }
        if self.trigger.fire() == 0 {
            print_error("Job list is not bound to a source");
            return;
        }

        let spinner = loading_spinner();
        let wait = Duration::from_secs(self.config.timeout_sec) + Duration::from_secs(5);
        let subscription = &mut self.subscription;
        let outcome = self
            .runtime
            .block_on(tokio::time::timeout(wait, subscription.next_outcome()));
        spinner.finish_and_clear();

        match outcome {
            Ok(Some(FetchOutcome::Appended { count })) => {
                print_success(&format!("Loaded {} job(s)", count))
            }
            Ok(Some(FetchOutcome::Exhausted)) => print_warning("No more jobs to load."),
            Ok(Some(FetchOutcome::Failed)) => {
                print_error("Could not load jobs, run 'more' to try again")
            }
            Ok(Some(FetchOutcome::Skipped)) => {
                if self.board.is_exhausted() {
                    print_warning("No more jobs to load.");
                } else {
                    print_info("A page is already loading");
                }
            }
            Ok(None) => print_error("Load-more listener stopped"),
            Err(_) => print_warning("Still loading, check back with 'list'"),
        }
    }

    fn print_jobs(&self) {
        let snapshot = self.board.snapshot();
        if snapshot.visible.is_empty() {
            print_empty_list("No jobs to show");
        } else {
            let mut table =
                TableBuilder::new(&["#", "Company", "Role", "Location", "Experience", "Salary"]);
            for (i, job) in snapshot.visible.iter().enumerate() {
                let card = JobCardView::new(job, false);
                table.add_row(vec![
                    (i + 1).to_string(),
                    card.company,
                    card.role,
                    card.location,
                    card.min_experience,
                    render::salary_range(job),
                ]);
            }
            table.print();
        }
        if let Some(line) = render::status_line(&snapshot) {
            print_list_footer(line);
        }
    }

    fn print_status(&self) {
        let snapshot = self.board.snapshot();

        print_section_header("Status");
        print_key_value("Source", &self.config.endpoint);
        print_key_value("Pages loaded", &snapshot.cursor.to_string());
        print_key_value("Paging", &snapshot.state.to_string());
        print_key_value("Jobs fetched", &snapshot.accumulated.to_string());
        if let Some(total) = snapshot.total_count {
            print_key_value("Jobs available", &total.to_string());
        }
        print_key_value("Jobs shown", &snapshot.visible.len().to_string());

        let filters: Vec<String> = snapshot.filters.iter().map(|p| p.to_string()).collect();
        if filters.is_empty() {
            print_key_value("Filters", "none");
        } else {
            print_key_value("Filters", &filters.join(", "));
        }

        let search = if snapshot.settled_search.is_empty() {
            "none".to_string()
        } else {
            format!("{:?}", snapshot.settled_search)
        };
        print_key_value("Company search", &search);
        if snapshot.pending_search != snapshot.settled_search {
            print_key_value("Pending search", &format!("{:?}", snapshot.pending_search));
        }
        print_section_footer();
    }
}

/// Map `value` onto the stored spelling of a matching option, ignoring case,
/// so that title-cased input matches the raw values the filter compares.
fn resolve_option(options: &FilterOptions, filter_type: FilterType, value: &str) -> String {
    let candidates = match filter_type {
        FilterType::Location => &options.locations,
        FilterType::Role => &options.roles,
        FilterType::MinExperience | FilterType::MinSalary => return value.to_string(),
    };
    candidates
        .iter()
        .find(|c| c.eq_ignore_ascii_case(value))
        .cloned()
        .unwrap_or_else(|| value.to_string())
}

fn loading_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[derive(rustyline_derive::Hinter)]
struct JobscrollHelper {
    commands_names: Vec<String>,
    filter_names: Vec<String>,
}

impl JobscrollHelper {
    pub fn new() -> Self {
        let commands_names = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();
        let filter_names = FilterType::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();

        JobscrollHelper {
            commands_names,
            filter_names,
        }
    }
}

fn starting_with(candidates: &[String], prefix: &str) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| c.starts_with(prefix))
        .cloned()
        .collect()
}

impl Completer for JobscrollHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let line = &line[..pos];
        match line.split_once(' ') {
            None => Ok((0, starting_with(&self.commands_names, line))),
            Some((command, rest))
                if matches!(command, "filter" | "unfilter") && !rest.contains(' ') =>
            {
                Ok((command.len() + 1, starting_with(&self.filter_names, rest)))
            }
            Some(_) => Ok((pos, Vec::with_capacity(0))),
        }
    }
}

impl Highlighter for JobscrollHelper {}
impl Validator for JobscrollHelper {}
impl Helper for JobscrollHelper {}

fn init_logging() -> Result<()> {
    // Log lines go to stderr so they do not interleave with the job list.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_logging()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;
    info!("Using job source at {}", config.endpoint);

    let runtime = Runtime::new().context("Failed to start the async runtime")?;
    let _runtime_guard = runtime.enter();

    let source = JobSourceClient::new(config.source_config())
        .context("Failed to create the job source client")?;
    let board = JobBoard::new(Arc::new(source), config.board_config());
    let trigger = VisibilityTrigger::new();
    let subscription = trigger.subscribe(board.clone());
    let mut session = Session {
        runtime: &runtime,
        config: &config,
        board,
        trigger,
        subscription,
    };

    print_welcome(&config.endpoint);

    // The list end is in view right away, so the first page loads on start.
    session.load_more();
    session.print_jobs();

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut rl = Editor::<JobscrollHelper, FileHistory>::with_config(rl_config)?;
    rl.set_helper(Some(JobscrollHelper::new()));

    let prompt = get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match session.execute_command(&line) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("Error: {:?}", e));
                break;
            }
        }
    }

    print_goodbye();
    Ok(())
}
