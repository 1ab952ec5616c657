// crates/todo_finder/src/main.rs

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use todo_finder::config::{AppConfig, DEFAULT_OUTPUT};

fn cli() -> Command {
    Command::new("todo_finder")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds @todo/TODO/@fixme/FIXME annotations and writes them as JSON")
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Directory (or single file) to scan"),
        )
        .arg(
            Arg::new("blame")
                .long("blame")
                .action(ArgAction::SetTrue)
                .help("Read files through git blame to record author and timestamp"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .num_args(1)
                .default_value(DEFAULT_OUTPUT)
                .value_parser(value_parser!(PathBuf))
                .help("Where to write the JSON report"),
        )
        .arg(
            Arg::new("ext")
                .short('e')
                .long("ext")
                .action(ArgAction::Append)
                .help("Only scan files with this extension (repeatable)"),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .action(ArgAction::Append)
                .help("Skip directories with this name (repeatable)"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .num_args(1)
                .value_parser(value_parser!(u64).range(1..))
                .help("Number of worker threads (default: one per core)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .unwrap_or_default()
        .cloned()
        .collect()
}

fn config_from(matches: &ArgMatches) -> AppConfig {
    let defaults = AppConfig::default();
    AppConfig {
        root: matches.get_one::<PathBuf>("root").cloned().unwrap_or(defaults.root),
        blame: matches.get_flag("blame"),
        output: matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or(defaults.output),
        extensions: strings(matches, "ext"),
        excludes: strings(matches, "exclude"),
        jobs: matches.get_one::<u64>("jobs").map(|&n| n as usize),
        verbose: matches.get_flag("verbose"),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let config = config_from(&cli().get_matches());
    init_logging(config.verbose);
    log::debug!("Configuration: {:?}", config);

    let report = todo_finder::run(&config)?;
    for file in &report.files {
        println!("{}", file);
    }
    println!("Wrote {} TODOs to {}", report.total(), report.output.display());
    Ok(())
}
