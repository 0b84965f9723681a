//! docrank CLI - persona-driven section ranking tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docrank::profile::{PersonaProfiler, ProfileRules};
use docrank::segment::Segmenter;
use docrank::{
    render, Docrank, EnglishAnalyzer, EventSink, JsonFormat, LogSink, PipelineEvent, RankOutput,
    RankRequest,
};

#[derive(Parser)]
#[command(name = "docrank")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rank document sections for a persona and a job to be done", long_about = None)]
struct Cli {
    /// Input request JSON
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output JSON file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Directory containing the listed documents
    #[arg(long, value_name = "DIR", default_value = ".", env = "DOCRANK_DOCUMENTS_DIR")]
    documents_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the documents of a request and write the output JSON
    Run {
        /// Input request JSON
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output JSON file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Directory containing the listed documents
        #[arg(long, value_name = "DIR", default_value = ".", env = "DOCRANK_DOCUMENTS_DIR")]
        documents_dir: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Disable parallel processing
        #[arg(long)]
        sequential: bool,

        /// Fail on unreadable documents instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Show the sections detected in a document
    Sections {
        /// PDF or text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the full section content
        #[arg(long)]
        full: bool,
    },

    /// Show the profile derived from a persona and task
    Profile {
        /// Persona role, e.g. "Travel Planner"
        #[arg(long)]
        role: String,

        /// Job to be done
        #[arg(long)]
        task: String,
    },

    /// Write a sample request
    Sample {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Options for the `run` command.
struct RunArgs<'a> {
    input: &'a Path,
    output: &'a Path,
    documents_dir: &'a Path,
    compact: bool,
    sequential: bool,
    strict: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            input,
            output,
            documents_dir,
            compact,
            sequential,
            strict,
        }) => cmd_run(RunArgs {
            input: &input,
            output: &output,
            documents_dir: &documents_dir,
            compact,
            sequential,
            strict,
        }),
        Some(Commands::Sections { input, full }) => cmd_sections(&input, full),
        Some(Commands::Profile { role, task }) => cmd_profile(&role, &task),
        Some(Commands::Sample { output }) => cmd_sample(output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.input, cli.output) {
            (Some(input), Some(output)) => cmd_run(RunArgs {
                input: &input,
                output: &output,
                documents_dir: &cli.documents_dir,
                compact: false,
                sequential: false,
                strict: false,
            }),
            _ => {
                println!("{}", "Usage: docrank <INPUT> <OUTPUT>".yellow());
                println!("       docrank --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Drives the spinner from pipeline events and forwards them to the log.
struct SpinnerSink {
    spinner: ProgressBar,
    skipped: Vec<String>,
}

impl EventSink for SpinnerSink {
    fn emit(&mut self, event: PipelineEvent) {
        match &event {
            PipelineEvent::DocumentRead { document, .. } => {
                self.spinner.set_message(format!("Read {}", document));
            }
            PipelineEvent::DocumentSkipped { document, .. } => {
                self.skipped.push(document.clone());
            }
            PipelineEvent::ProfileBuilt { .. } => {
                self.spinner.set_message("Scoring sections...");
            }
            PipelineEvent::RankingFinished { .. } => {
                self.spinner.set_message("Assembling output...");
            }
            _ => {}
        }
        LogSink.emit(event);
    }
}

fn cmd_run(args: RunArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    let request = RankRequest::from_file(args.input)?;

    log::debug!(
        "Resolving documents of {} against {}",
        args.input.display(),
        args.documents_dir.display()
    );
    let mut builder = Docrank::new().documents_dir(args.documents_dir);
    if !args.strict {
        builder = builder.lenient();
    }
    if args.sequential {
        builder = builder.sequential();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Reading documents...");

    let mut sink = SpinnerSink {
        spinner,
        skipped: Vec::new(),
    };
    let output = builder.process(&request, &mut sink);
    sink.spinner.finish_and_clear();
    let output = output?;

    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(args.output, render::to_json(&output, format)?)?;

    for document in &sink.skipped {
        println!("{} {}", "Skipped".yellow(), document);
    }
    print_summary(&output, started.elapsed());
    println!("{} {}", "Saved to".green(), args.output.display());

    Ok(())
}

fn print_summary(output: &RankOutput, elapsed: Duration) {
    println!("\n{}", "Processing complete".green().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {}",
        "Documents processed".bold(),
        output.metadata.input_documents.len()
    );
    println!(
        "{}: {}",
        "Sections extracted".bold(),
        output.extracted_sections.len()
    );
    println!(
        "{}: {}",
        "Subsections analyzed".bold(),
        output.subsection_analysis.len()
    );
    println!("{}: {:.2}s", "Processing time".bold(), elapsed.as_secs_f64());
}

fn cmd_sections(input: &Path, full: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pages = docrank::read_pages(input)?;
    let segmenter = Segmenter::new();

    println!("{} {}", "Sections in".cyan().bold(), input.display());
    println!("{}", "─".repeat(40).dimmed());

    let mut total = 0;
    for page in &pages {
        let sections = segmenter.segment_page(page);
        if sections.is_empty() {
            continue;
        }
        println!("{} {}", "Page".bold(), page.page_number);
        for section in &sections {
            println!("  {} {}", "├─".dimmed(), section.title.green());
            if full {
                for line in section.content.lines() {
                    println!("  {}   {}", "│".dimmed(), line);
                }
            }
        }
        total += sections.len();
    }

    println!("\n{} {} sections on {} pages", "Done!".green().bold(), total, pages.len());
    Ok(())
}

fn cmd_profile(role: &str, task: &str) -> Result<(), Box<dyn std::error::Error>> {
    let rules = ProfileRules::default();
    let analyzer = EnglishAnalyzer::new();
    let profile = PersonaProfiler::new(&rules, &analyzer).build(role, task)?;

    let join = |items: &std::collections::BTreeSet<String>| {
        items.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    println!("{}", "Persona Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Role".bold(), profile.role);
    println!("{}: {}", "Task".bold(), profile.task);
    println!("{}: {}", "Keywords".bold(), join(&profile.keywords));
    println!("{}: {}", "Primary focus".bold(), join(&profile.primary_focus));
    println!("{}: {}", "Secondary focus".bold(), join(&profile.secondary_focus));

    Ok(())
}

fn cmd_sample(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = render::to_json(&RankRequest::sample(), JsonFormat::Pretty)?;

    if let Some(path) = output {
        write_sample(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn write_sample(path: &Path, json: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    log::debug!("Writing sample request to {}", path.display());
    fs::write(path, json)
}

fn cmd_version() {
    println!("{} {}", "docrank".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Persona-driven document section ranking");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_written_and_readable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("request.json");
        cmd_sample(Some(&path)).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.starts_with("{\n    \""));
        let request = RankRequest::from_file(&path).unwrap();
        assert_eq!(request, RankRequest::sample());
    }

    #[test]
    fn test_cli_parses_run_command() {
        let args = ["docrank", "run", "in.json", "out.json", "--strict"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Run { strict, .. }) => assert!(strict),
            _ => panic!("expected run command"),
        }
    }
}
