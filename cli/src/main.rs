//! unepub CLI - EPUB partitioning tool

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use unepub::{ElementType, JsonFormat, Unepub, UnepubResult};

#[derive(Parser)]
#[command(name = "unepub")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Partition EPUB books into typed elements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition an EPUB and print the elements as JSON
    Json {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Partition an EPUB and print the element texts
    Text {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show package metadata and element statistics
    Info {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List the sections elements were assigned to, in reading order
    Sections {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct InputArgs {
    /// Input EPUB file
    #[arg(value_name = "FILE", required_unless_present = "stdin")]
    input: Option<PathBuf>,

    /// Read the EPUB from standard input
    #[arg(long, conflicts_with = "input")]
    stdin: bool,

    /// Filename recorded in element metadata
    #[arg(long, value_name = "NAME", env = "UNEPUB_METADATA_FILENAME")]
    metadata_filename: Option<String>,

    /// Modification date recorded in element metadata (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_name = "TIMESTAMP")]
    last_modified: Option<String>,

    /// Emit elements without metadata
    #[arg(long)]
    no_metadata: bool,
}

impl InputArgs {
    fn builder(&self) -> Unepub {
        let mut unepub = Unepub::new();
        if let Some(ref filename) = self.metadata_filename {
            unepub = unepub.with_metadata_filename(filename.clone());
        }
        if let Some(ref timestamp) = self.last_modified {
            unepub = unepub.with_last_modified(timestamp.clone());
        }
        if self.no_metadata {
            unepub = unepub.without_metadata();
        }
        unepub
    }

    fn partition(&self) -> Result<UnepubResult, Box<dyn std::error::Error>> {
        let unepub = self.builder();
        let result = match self.input {
            Some(ref path) if !self.stdin => unepub.partition(path)?,
            _ => {
                let mut data = Vec::new();
                std::io::stdin().lock().read_to_end(&mut data)?;
                log::debug!("read {} bytes from stdin", data.len());
                unepub.partition_bytes(&data)?
            }
        };
        Ok(result)
    }

    fn label(&self) -> String {
        match self.input {
            Some(ref path) if !self.stdin => path.display().to_string(),
            _ => "<stdin>".to_string(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact),
        Commands::Text { input, output } => cmd_text(&input, output.as_deref()),
        Commands::Info { input } => cmd_info(&input),
        Commands::Sections { input } => cmd_sections(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_json(
    input: &InputArgs,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = input.partition()?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_output(&result.to_json(format)?, output)
}

fn cmd_text(input: &InputArgs, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let result = input.partition()?;
    write_output(&result.to_text(), output)
}

fn cmd_info(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = input.partition()?;
    let package = &result.package;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.label());
    if let Some(ref version) = package.version {
        println!("{}: EPUB {}", "Format".bold(), version);
    }
    if let Some(ref title) = package.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if !package.creators.is_empty() {
        println!("{}: {}", "Creators".bold(), package.creators.join(", "));
    }
    if let Some(ref language) = package.language {
        println!("{}: {}", "Language".bold(), language);
    }
    if let Some(ref identifier) = package.identifier {
        println!("{}: {}", "Identifier".bold(), identifier);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = result.stats();
    println!("{}: {}", "Elements".bold(), stats.element_count);
    for element_type in [
        ElementType::Title,
        ElementType::NarrativeText,
        ElementType::ListItem,
        ElementType::Table,
        ElementType::Text,
    ] {
        let count = stats.count_of(element_type);
        if count > 0 {
            println!("  {} {}: {}", "├─".dimmed(), element_type, count);
        }
    }
    println!("{}: {}", "Sections".bold(), stats.sections.len());
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_sections(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = input.partition()?;
    let sections = result.sections();

    if sections.is_empty() {
        println!("{}", "No sections found".yellow());
        return Ok(());
    }

    for (i, section) in sections.iter().enumerate() {
        println!("{:>3}. {}", i + 1, section);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unepub".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("EPUB partitioning tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unepub".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_json_command() {
        let cli = Cli::try_parse_from([
            "unepub",
            "json",
            "book.epub",
            "--compact",
            "--metadata-filename",
            "test",
            "--last-modified",
            "2020-07-05T09:24:28",
        ])
        .unwrap();

        let Commands::Json { input, compact, .. } = cli.command else {
            panic!("expected json command");
        };
        assert!(compact);
        assert_eq!(input.input.as_deref(), Some(Path::new("book.epub")));
        let options = input.builder();
        assert_eq!(options.options().metadata_filename.as_deref(), Some("test"));
        assert_eq!(
            options.options().metadata_last_modified.as_deref(),
            Some("2020-07-05T09:24:28")
        );
    }

    #[test]
    fn test_no_metadata_flag() {
        let cli = Cli::try_parse_from(["unepub", "text", "book.epub", "--no-metadata"]).unwrap();
        let Commands::Text { input, .. } = cli.command else {
            panic!("expected text command");
        };
        assert!(!input.builder().options().include_metadata);
    }

    #[test]
    fn test_input_required_without_stdin() {
        assert!(Cli::try_parse_from(["unepub", "sections"]).is_err());
        assert!(Cli::try_parse_from(["unepub", "sections", "--stdin"]).is_ok());
        assert!(Cli::try_parse_from(["unepub", "sections", "book.epub", "--stdin"]).is_err());
    }
}
