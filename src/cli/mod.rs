use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "import-graph",
    version,
    about = "File Dependency Tree Extractor",
    long_about = "Extract the transitive file-dependency tree rooted at a JS/TS/Svelte source file. \
Resolution covers configured aliases, project-absolute prefixes, relative paths and extension/index \
fallback, with exclusion filtering. External packages are omitted unless --include-external is set."
)]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
    /// Increase verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Tree,
    List,
    Json,
    Content,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build and render the dependency tree rooted at a source file
    Analyze {
        /// The file to analyze (absolute or relative)
        file: String,
        /// Project root override (default: auto-detected from the file)
        #[arg(long)]
        root: Option<String>,
        /// Path to a TOML configuration file (default: import-graph.toml next to the root)
        #[arg(long)]
        config: Option<String>,
        /// Maximum traversal depth (default: unlimited)
        #[arg(short, long)]
        depth: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
        /// Materialize external (third-party) dependencies as unexpanded leaves
        #[arg(long, default_value_t = false)]
        include_external: bool,
        /// Additional exclude pattern (repeatable; appended to the effective list)
        #[arg(long = "exclude", value_name = "PATTERN")]
        exclude: Vec<String>,
        /// Alias mapping KEY=TARGET (repeatable; overrides defaults per key)
        #[arg(long = "alias", value_name = "KEY=TARGET")]
        alias: Vec<String>,
        /// Recognized extension (repeatable; replaces the default priority list)
        #[arg(long = "ext", value_name = "EXT")]
        ext: Vec<String>,
        /// Content-length budget in characters (hard read ceiling is 4x)
        #[arg(long)]
        max_content_length: Option<usize>,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Emit step-by-step resolution tracing on stderr (behavior unchanged)
        #[arg(long, default_value_t = false)]
        debug: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
