// src/cli.rs
use std::env;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Report, WrapErr};

use crate::config::consts::{DEFAULT_BOARD_DATA, DEFAULT_EVENTS_DATA, DEFAULT_POSTS_DATA};
use crate::config::options::{FailurePolicy, FetchMode, FetchOptions};
use crate::core::{dates, net::HttpTransport, sanitize::plain_text};
use crate::data::{Cohort, Event};
use crate::error::FetchError;
use crate::progress::Progress;
use crate::render::{self, SplitEvents};
use crate::{file, scrape, store};

#[derive(Parser, Debug)]
#[command(name = "clubfeed", version, about = "Refresh and inspect the club's event feed")]
pub struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch events upstream and rewrite the events file
    Fetch(FetchArgs),
    /// List upcoming and past events from an events file
    Events(EventsArgs),
    /// Write an iCalendar file for one event
    Ics(IcsArgs),
    /// List blog posts
    Posts {
        #[arg(long, default_value = DEFAULT_POSTS_DATA)]
        data: PathBuf,
    },
    /// List board members by cohort
    Board {
        #[arg(long, default_value = DEFAULT_BOARD_DATA)]
        data: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Api,
    Scrape,
}

impl From<ModeArg> for FetchMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Api => FetchMode::Api,
            ModeArg::Scrape => FetchMode::Scrape,
        }
    }
}

#[derive(Args, Debug)]
struct FetchArgs {
    #[arg(long, value_enum, default_value_t = ModeArg::Api)]
    mode: ModeArg,

    /// Target file (default docs/data/events.json)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print the document instead of writing the target
    #[arg(long)]
    stdout: bool,

    /// Exit non-zero when a scrape fails (API failures always do; so does the CI env var)
    #[arg(long)]
    ci: bool,

    /// Club slug on the upstream platform
    #[arg(long)]
    club: Option<String>,

    #[arg(long)]
    api_base: Option<String>,

    /// Events per API page
    #[arg(long)]
    limit: Option<u32>,

    #[arg(long)]
    max_pages: Option<u32>,

    /// Where to write the raw text of a failed scrape
    #[arg(long)]
    dump: Option<PathBuf>,
}

impl FetchArgs {
    fn to_options(&self) -> FetchOptions {
        let mut opts = FetchOptions::from_env();
        opts.mode = self.mode.into();
        if let Some(out) = &self.out { opts.target = out.clone(); }
        if let Some(club) = &self.club { opts.club_slug = club.clone(); }
        if let Some(base) = &self.api_base { opts.api_base = base.clone(); }
        if let Some(limit) = self.limit { opts.page_limit = limit; }
        if let Some(max) = self.max_pages { opts.max_pages = max; }
        if let Some(dump) = &self.dump { opts.dump_path = dump.clone(); }
        opts
    }
}

#[derive(Args, Debug)]
struct EventsArgs {
    #[arg(long, default_value = DEFAULT_EVENTS_DATA)]
    data: PathBuf,

    /// Case-insensitive filter over title, description and location
    #[arg(short, long)]
    search: Option<String>,

    #[arg(long, conflicts_with = "past")]
    upcoming: bool,

    #[arg(long)]
    past: bool,
}

#[derive(Args, Debug)]
struct IcsArgs {
    #[arg(long, default_value = DEFAULT_EVENTS_DATA)]
    data: PathBuf,

    /// First event whose title contains this (case-insensitive)
    #[arg(long, conflicts_with = "index")]
    title: Option<String>,

    /// Position in the events file, 0-based
    #[arg(long)]
    index: Option<usize>,

    /// Output path (default: derived from the title)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Progress lines on stderr.
struct StderrProgress;

impl Progress for StderrProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, page: u32, events: usize) {
        eprintln!("  page {page}: {events} events");
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.log_file.as_deref())
        .wrap_err("Could not set up logging")?;

    match cli.command {
        Command::Fetch(args) => fetch(&args),
        Command::Events(args) => events(&args),
        Command::Ics(args) => ics(&args),
        Command::Posts { data } => posts(&data),
        Command::Board { data } => board(&data),
    }
}

fn fetch(args: &FetchArgs) -> color_eyre::Result<()> {
    let opts = args.to_options();
    let policy = FailurePolicy::for_mode(opts.mode, args.ci, env::var("CI").ok().as_deref());
    let transport = HttpTransport::new(opts.timeout)?;
    let mut progress = StderrProgress;

    let result = if args.stdout {
        scrape::collect_events(&transport, &opts, Some(&mut progress)).and_then(|events| {
            print!("{}", file::events_json(&events)?);
            Ok(())
        })
    } else {
        scrape::refresh(&transport, &opts, Some(&mut progress)).map(|report| {
            println!("Saved {} events to {}", report.count, report.path.display());
        })
    };

    match result {
        Ok(()) => Ok(()),
        Err(e @ FetchError::MissingApiKey(_)) => Err(Report::new(e)),
        Err(e) if policy.is_fatal(&e) => Err(Report::new(e).wrap_err("Failed to update events")),
        Err(e) => {
            loge!("Failed to update events: {e}. {} left unchanged.", opts.target.display());
            Ok(())
        }
    }
}

fn events(args: &EventsArgs) -> color_eyre::Result<()> {
    let list = match store::load_events(&args.data) {
        Ok(list) => list,
        Err(e) => {
            logd!("{e}");
            println!("Could not load events. Check back soon.");
            return Ok(());
        }
    };

    let split = render::split_events(&list, dates::today());
    let split: SplitEvents = match &args.search {
        Some(term) => split.filter(term),
        None => split,
    };
    let searching = args.search.is_some();

    if !args.past {
        let empty = if searching {
            "No matching upcoming events."
        } else {
            "No upcoming events right now. Follow us on Instagram for updates."
        };
        print_section("Upcoming events", &split.upcoming, empty);
    }
    if !args.upcoming {
        let empty = if searching { "No matching past events." } else { "No past events listed yet." };
        print_section("Past events", &split.past, empty);
    }
    Ok(())
}

fn print_section(heading: &str, events: &[Event], empty_msg: &str) {
    println!("{heading}");
    if events.is_empty() {
        println!("  {empty_msg}");
        println!();
        return;
    }
    for ev in events {
        let title = if ev.title.is_empty() { "Event" } else { ev.title.as_str() };
        println!("  {title}");
        let meta = render::meta_line(ev);
        if !meta.is_empty() { println!("    {meta}"); }
        let desc = plain_text(&ev.description);
        if !desc.is_empty() { println!("    {desc}"); }
        if !ev.url.is_empty() { println!("    {}", ev.url); }
    }
    println!();
}

fn ics(args: &IcsArgs) -> color_eyre::Result<()> {
    let list = store::load_events(&args.data).map_err(|e| eyre!("{e}"))?;

    let event = match (&args.title, args.index) {
        (Some(term), _) => {
            let needle = term.to_lowercase();
            list.iter().find(|e| e.title.to_lowercase().contains(&needle))
                .ok_or_else(|| eyre!("No event title contains \"{term}\""))?
        }
        (None, Some(i)) => list.get(i)
            .ok_or_else(|| eyre!("Index {i} out of range ({} events)", list.len()))?,
        (None, None) => return Err(eyre!("Pick an event with --title or --index")),
    };

    let body = render::generate_ics(event, Utc::now())
        .ok_or_else(|| eyre!("Event has no title or no usable date"))?;
    let path = args.out.clone()
        .unwrap_or_else(|| PathBuf::from(render::ics_filename(&event.title)));
    file::write_atomic(&path, body.as_bytes())
        .wrap_err_with(|| format!("Could not write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn posts(data: &Path) -> color_eyre::Result<()> {
    let posts = match store::load_posts(data) {
        Ok(p) => p,
        Err(e) => {
            logd!("{e}");
            println!("Could not load posts. Check back soon.");
            return Ok(());
        }
    };
    if posts.is_empty() {
        println!("No posts yet. Check back soon.");
        return Ok(());
    }
    for post in &posts {
        let title = if post.title.is_empty() { "Post" } else { post.title.as_str() };
        println!("{title}");
        let date = render::format_post_date(&post.date);
        if !date.is_empty() { println!("  {date}"); }
        let excerpt = render::post_excerpt(post);
        if !excerpt.is_empty() { println!("  {excerpt}"); }
        if !post.url.is_empty() { println!("  {}", post.url); }
    }
    Ok(())
}

fn board(data: &Path) -> color_eyre::Result<()> {
    let board = match store::load_board(data) {
        Ok(b) => b,
        Err(e) => {
            logd!("{e}");
            println!("Could not load this board.");
            return Ok(());
        }
    };
    for cohort in Cohort::ALL {
        let members = board.cohort(cohort);
        if members.is_empty() { continue; }
        println!("{}", cohort.title());
        for m in members {
            println!("  {} ({}) · {}", m.name, m.initials, m.role);
            if let Some(url) = &m.linkedin { println!("    {url}"); }
        }
        println!();
    }
    Ok(())
}
