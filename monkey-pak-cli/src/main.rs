use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use monkey_pak_core::hasher::name_hash;

mod unpack;

#[derive(Debug, Parser)]
#[command(version, about = "Extract PackInfo/PackData archives from Pumped & Primed and Million Monkeys", long_about = None)]
struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract every entry of an archive and update its hash dictionary
    Extract(ExtractCommand),
    /// Print the entries of an archive without extracting
    List(ListCommand),
    /// Print the name hash of each argument
    Hash(HashCommand),
}

#[derive(Debug, Args)]
struct ArchiveArgs {
    /// Archive variant: dskimg (a), pdata1 (b) or pdata3 (c)
    variant: String,
    /// PackInfo index file [default: depends on variant]
    #[arg(long)]
    index: Option<PathBuf>,
    /// PackData payload file [default: depends on variant]
    #[arg(long)]
    payload: Option<PathBuf>,
    /// Hash dictionary file [default: <dictionary-dir>/hashmap_<variant>.csv]
    #[arg(long)]
    dictionary: Option<PathBuf>,
    /// Directory holding the hash dictionaries [default: assets/hashmap next to the executable]
    #[arg(long)]
    dictionary_dir: Option<PathBuf>,
    /// Newline separated candidate names to test against unknown hashes
    #[arg(short, long)]
    wordlist: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ExtractCommand {
    #[command(flatten)]
    archive: ArchiveArgs,
    /// Output directory [default: OUT_<variant>]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ListCommand {
    #[command(flatten)]
    archive: ArchiveArgs,
    /// Print entries as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct HashCommand {
    names: Vec<String>,
}

fn init_logger(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .format_timestamp(None)
        .init();
}

fn hash(cmd: &HashCommand) {
    for name in &cmd.names {
        println!("{:08x}  {}", name_hash(name), name);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.quiet);

    match &cli.command {
        Command::Extract(cmd) => unpack::extract(cmd),
        Command::List(cmd) => unpack::list(cmd),
        Command::Hash(cmd) => {
            hash(cmd);
            Ok(())
        }
    }
}
