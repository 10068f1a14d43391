use clap::{Parser, Subcommand};
use ignorefile::logger::initialize_logger;
use ignorefile::matcher::{parse_ignore_file, IgnoreMatcher};
use ignorefile::IgnoreError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    cmd: SubCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    Check(CheckArgs),
    Walk(WalkArgs),
}

#[derive(Parser, Debug, Clone)]
struct CheckArgs {
    #[arg(required = true)]
    paths: Vec<String>,
    #[arg(short = 'f', long, default_value = ".gitignore")]
    ignore_file: PathBuf,
    #[arg(
        short = 'b',
        long,
        help = "Anchor directory override; defaults to the ignore file's parent"
    )]
    base_dir: Option<PathBuf>,
    #[arg(short = 'v', long, help = "Show the deciding rule for each path")]
    verbose: bool,
}

#[derive(Parser, Debug, Clone)]
struct WalkArgs {
    #[arg(default_value = ".")]
    root: PathBuf,
    #[arg(short = 'f', long, default_value = ".gitignore")]
    ignore_file: PathBuf,
    #[arg(
        short = 'b',
        long,
        help = "Anchor directory override; defaults to the ignore file's parent"
    )]
    base_dir: Option<PathBuf>,
    #[arg(long, help = "Print ignored paths instead of surviving files")]
    ignored: bool,
}

fn main() {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let result = match cli_args.cmd {
        SubCommands::Check(args) => run_check(args),
        SubCommands::Walk(args) => run_walk(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_check(args: CheckArgs) -> Result<(), IgnoreError> {
    let matcher = parse_ignore_file(&args.ignore_file, args.base_dir.as_deref())?;
    info!(
        "Loaded {} rules from {}",
        matcher.rules().len(),
        args.ignore_file.display()
    );

    for path in &args.paths {
        match matcher.matched_rule_str(path) {
            Some(rule) => {
                if args.verbose {
                    let source = rule
                        .source
                        .as_ref()
                        .map(|s| format!("{}:{}", s.file.display(), s.line))
                        .unwrap_or_else(|| String::from(":"));
                    println!("{}:{}\t{}", source, rule, path);
                } else if !rule.negation {
                    println!("{}", path);
                }
            }
            None => {
                if args.verbose {
                    println!("::\t{}", path);
                }
            }
        }
    }
    Ok(())
}

fn run_walk(args: WalkArgs) -> Result<(), IgnoreError> {
    let matcher = parse_ignore_file(&args.ignore_file, args.base_dir.as_deref())?;
    info!(
        "Walking {} with {} rules",
        args.root.display(),
        matcher.rules().len()
    );

    if args.ignored {
        print_ignored(&matcher, &args.root);
    } else {
        print_survivors(&matcher, &args.root);
    }
    Ok(())
}

fn print_survivors(matcher: &IgnoreMatcher, root: &Path) {
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !matcher.is_ignored(entry.path()));
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    println!("{}", entry.path().display());
                }
            }
            Err(e) => warn!("Error walking directory: {}", e),
        }
    }
}

fn print_ignored(matcher: &IgnoreMatcher, root: &Path) {
    let mut walker = WalkDir::new(root).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error walking directory: {}", e);
                continue;
            }
        };
        if entry.depth() > 0 && matcher.is_ignored(entry.path()) {
            println!("{}", entry.path().display());
            // Everything under an ignored directory is ignored with it.
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
        }
    }
}
