use caseboard_authoring::{expand_solutions, rehash_levels};
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Command::new("caseboard-authoring")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Offline solution processing for caseboard levels")
        .subcommand_required(true)
        .subcommand(
            Command::new("expand")
                .about("Expand authored solutions to their simultaneity closure, in place")
                .arg(
                    Arg::new("solutions")
                        .long("solutions")
                        .default_value("data/admin-solutions.json")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Path to the admin solutions file"),
                ),
        )
        .subcommand(
            Command::new("rehash")
                .about("Inject canonical solution digests into level files")
                .arg(
                    Arg::new("levels")
                        .long("levels")
                        .default_value("data/levels")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Directory holding levelN.json files"),
                )
                .arg(
                    Arg::new("solutions")
                        .long("solutions")
                        .default_value("data/admin-solutions.json")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Path to the admin solutions file"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("expand", args)) => {
            let solutions = args.get_one::<PathBuf>("solutions").unwrap();
            let expanded = expand_solutions(solutions)?;
            for growth in &expanded {
                println!(
                    "Level {}: expanded edges from {} to {}",
                    growth.level, growth.before, growth.after
                );
            }
            println!("Done. {} level(s) expanded.", expanded.len());
        }
        Some(("rehash", args)) => {
            let levels = args.get_one::<PathBuf>("levels").unwrap();
            let solutions = args.get_one::<PathBuf>("solutions").unwrap();
            let report = rehash_levels(levels, solutions)?;
            for id in &report.updated {
                println!("Updated level {id}");
            }
            for id in &report.skipped {
                println!("Skipped level {id} (no authored solution)");
            }
            println!(
                "Done. {} updated, {} unchanged, {} skipped.",
                report.updated.len(),
                report.unchanged.len(),
                report.skipped.len()
            );
        }
        _ => unreachable!("subcommand required"),
    }

    Ok(())
}
