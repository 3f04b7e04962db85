//! soterm CLI
//!
//! Search Stack Overflow from the command line. The default mode prints
//! the top answer for the first matching question; `--interactive`
//! opens the TUI browser instead.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};

use soterm::config::{self, Config};
use soterm::stackexchange::{ASK_URL, Client};
use soterm::tui;
use soterm::types::{Error, QuestionDetail, QuestionSummary};

#[derive(Parser)]
#[command(name = "soterm")]
#[command(about = "Search Stack Overflow and browse answers without leaving the terminal")]
#[command(version)]
struct Cli {
    /// Browse the search results interactively
    #[arg(short, long)]
    interactive: bool,

    /// Display the N-th search result (counting from 1) instead of the first
    #[arg(short, long, value_name = "N")]
    res: Option<usize>,

    /// Restrict the search to these tags (comma separated)
    #[arg(short, long, value_name = "TAGS")]
    tag: Option<String>,

    /// Show a user's profile; omit the id to use the saved default
    #[arg(short, long, value_name = "ID", num_args = 0..=1)]
    user: Option<Option<u64>>,

    /// Open the new-question page in your browser
    #[arg(short, long)]
    new: bool,

    /// Save a Stack Exchange API key for future requests
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Delete the saved configuration file
    #[arg(short = 'd', long = "del")]
    delete: bool,

    /// Search query
    #[arg(value_name = "QUERY")]
    query: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    if cli.new {
        println!("Opening the new question page in your browser...");
        tui::run::open_in_browser(ASK_URL);
        return Ok(());
    }

    let config_path = config::default_config_path()?;
    if cli.delete {
        config::delete(&config_path)?;
        println!("Configuration file deleted.");
        return Ok(());
    }

    let mut cfg = config::load(&config_path)?;
    if let Some(key) = cli.api_key {
        cfg.api_key = Some(key);
        config::save(&config_path, &cfg)?;
        println!("API key saved...");
        return Ok(());
    }
    if let Some(user) = cli.user {
        return cmd_user(&config_path, &mut cfg, user);
    }

    let query = cli.query.join(" ");
    if query.trim().is_empty() {
        return Err(Error::Usage("no search query given".into()));
    }
    let tags = parse_tags(cli.tag.as_deref())?;

    let client = Client::new(cfg.api_key.clone())?;

    if cli.interactive {
        return cmd_interactive(&client, &query, &tags);
    }

    let index = match cli.res {
        Some(0) => {
            println!(
                "Count starts from 1. Use `soterm -r 2 <query>` for the second result."
            );
            return Ok(());
        }
        Some(n) => n,
        None => 1,
    };
    cmd_show_result(&client, &query, &tags, index)
}

// ============================================================================
// ARGUMENT HELPERS
// ============================================================================

/// Split a comma-separated tag list, rejecting an empty one.
fn parse_tags(tag: Option<&str>) -> Result<Vec<String>, Error> {
    match tag {
        None => Ok(Vec::new()),
        Some(raw) => {
            let tags: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            if tags.is_empty() {
                Err(Error::Usage("--tag needs at least one tag".into()))
            } else {
                Ok(tags)
            }
        }
    }
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run a blocking fetch behind a spinner, clearing it afterwards.
fn with_spinner<T>(msg: &str, fetch: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    let sp = spinner(msg);
    let result = fetch();
    sp.finish_and_clear();
    result
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

/// Interactive mode: fetch the result set, then hand off to the TUI.
fn cmd_interactive(client: &Client, query: &str, tags: &[String]) -> Result<(), Error> {
    let summaries = with_spinner("Searching Stack Overflow...", || {
        client.search(query, tags)
    })?;
    if summaries.is_empty() {
        return Err(Error::NoResults);
    }
    tui::run::run(client, summaries)
}

/// One-shot mode: print the N-th result's question and top answer.
fn cmd_show_result(
    client: &Client,
    query: &str,
    tags: &[String],
    index: usize,
) -> Result<(), Error> {
    let summaries = with_spinner("Searching Stack Overflow...", || {
        client.search(query, tags)
    })?;
    let summary = summaries.get(index - 1).ok_or(Error::NoResults)?;
    let detail = with_spinner("Fetching the question...", || client.question(summary))?;
    print_result(summary, &detail);
    Ok(())
}

fn print_result(summary: &QuestionSummary, detail: &QuestionDetail) {
    println!();
    println!("{}", format!("Question: {}", detail.title).green().bold());
    println!("{}", detail.description);
    println!("\t{}", detail.stats.as_str().dark_green());
    println!();
    println!("{}", "Answer:".green().bold());
    println!("-------\n{}\n-------", detail.answers[0]);
    println!("{}", "Question URL:".bold());
    println!("{}", summary.link.as_str().underlined());
}

/// Show a user's profile. Without an explicit id, fall back to the saved
/// default, prompting for one on first use.
fn cmd_user(
    config_path: &Path,
    cfg: &mut Config,
    user: Option<u64>,
) -> Result<(), Error> {
    let id = match user {
        Some(id) => id,
        None => match cfg.user_id {
            Some(id) => id,
            None => prompt_and_save_user_id(config_path, cfg)?,
        },
    };
    let client = Client::new(cfg.api_key.clone())?;
    let profile = with_spinner("Fetching the user profile...", || client.user(id))?;

    println!();
    println!(" User: {}", profile.display_name.as_str().bold());
    println!();
    println!("\tReputation: {}", profile.reputation);
    println!("{}", "\tBadges:".yellow());
    println!("\t\t   Gold: {}", profile.gold_badges);
    println!("\t\t Silver: {}", profile.silver_badges);
    println!("\t\t Bronze: {}", profile.bronze_badges);
    println!("\t\t  Total: {}", profile.badge_total());
    Ok(())
}

fn prompt_and_save_user_id(
    config_path: &Path,
    cfg: &mut Config,
) -> Result<u64, Error> {
    println!("No default user set.");
    print!("Enter your Stack Overflow user id: ");
    std::io::stdout().flush().map_err(Error::Terminal)?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(Error::Terminal)?;
    let id: u64 = line.trim().parse().map_err(|_| {
        Error::Usage(
            "the user id must be an integer. See https://meta.stackexchange.com/a/111130"
                .into(),
        )
    })?;

    cfg.user_id = Some(id);
    config::save(config_path, cfg)?;
    println!("User id saved...");
    Ok(id)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn query_words_join_into_one_string() {
        let cli = Cli::parse_from(["soterm", "for", "loop", "in", "rust"]);
        assert_eq!(cli.query.join(" "), "for loop in rust");
        assert!(!cli.interactive);
    }

    #[test]
    fn interactive_flag_parses_with_query() {
        let cli = Cli::parse_from(["soterm", "-i", "borrow", "checker"]);
        assert!(cli.interactive);
        assert_eq!(cli.query, vec!["borrow", "checker"]);
    }

    #[test]
    fn user_flag_takes_an_optional_id() {
        let cli = Cli::parse_from(["soterm", "--user", "22656"]);
        assert_eq!(cli.user, Some(Some(22656)));
        let cli = Cli::parse_from(["soterm", "--user"]);
        assert_eq!(cli.user, Some(None));
        let cli = Cli::parse_from(["soterm", "query"]);
        assert_eq!(cli.user, None);
    }

    #[test]
    fn tags_split_on_commas_and_trim() {
        let tags = parse_tags(Some("javascript, node.js")).unwrap();
        assert_eq!(tags, vec!["javascript", "node.js"]);
    }

    #[test]
    fn empty_tag_list_is_a_usage_error() {
        match parse_tags(Some(" , ")) {
            Err(Error::Usage(_)) => {}
            other => panic!("expected Usage error, got {:?}", other),
        }
    }

    #[test]
    fn no_tag_flag_means_no_tags() {
        assert!(parse_tags(None).unwrap().is_empty());
    }
}
