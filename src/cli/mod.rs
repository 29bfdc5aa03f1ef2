use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "package-relations-explorer",
    version,
    about = "npm package relationship graph explorer",
    long_about = "Build a relationship graph from npm registry package records and run queries over it. Dependency edges are directed dependent -> dependency; keyword and maintainer edges are symmetric. Traversal is cycle-safe and all outputs are deterministic for a given input file."
)]
pub struct Cli {
    /// Suppress non-essential status output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
    /// Increase output detail (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EdgeKindArg {
    Dependencies,
    Keywords,
    Maintainers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutKindArg {
    Layered,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the package graph from a registry records JSON file
    Build {
        /// Path to the package records JSON (array of registry records)
        #[arg(long)]
        data: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Save the built graph to a JSON file path
        #[arg(long)]
        save: Option<String>,
    },
    /// Run queries over the package graph
    Query {
        #[command(subcommand)]
        query: QueryCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum QueryCommands {
    /// List a package's dependencies
    Deps {
        /// Package name to analyze
        #[arg(long)]
        package: String,
        /// Include the full transitive closure instead of direct dependencies
        #[arg(long, default_value_t = false)]
        all: bool,
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Skip the first N results
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Show at most N results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Count a package's dependencies
    DepCount {
        /// Package name to analyze
        #[arg(long)]
        package: String,
        /// Count direct dependencies only instead of the transitive closure
        #[arg(long, default_value_t = false)]
        direct: bool,
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Enumerate relationship edges around a package
    Edges {
        /// Package name to analyze
        #[arg(long)]
        package: String,
        /// Edge kind: dependencies, keywords or maintainers
        #[arg(long, value_enum, default_value = "dependencies")]
        edges: EdgeKindArg,
        /// Hop bound for keyword edges (ignored by other kinds)
        #[arg(long, default_value_t = 1)]
        max_depth: usize,
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Skip the first N results
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Show at most N results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List top-N packages by transitive dependency count
    TopDependencies {
        /// Top N results
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Rank keywords by how many packages carry them
    TopKeywords {
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Skip the first N results
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Show at most N results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show registry metadata for a package
    Metadata {
        /// Package name to look up
        #[arg(long)]
        package: String,
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List packages sharing a maintainer with the given package
    SharedMaintainers {
        /// Package name to analyze
        #[arg(long)]
        package: String,
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Skip the first N results
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Show at most N results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search package names by regular expression
    Search {
        /// Regular expression to match against package names
        #[arg(long)]
        pattern: String,
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Skip the first N results
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Show at most N results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Emit positioned figure data for a package's relationships
    Figure {
        /// Package name to analyze
        #[arg(long)]
        package: String,
        /// Edge kind: dependencies, keywords or maintainers
        #[arg(long, value_enum, default_value = "dependencies")]
        edges: EdgeKindArg,
        /// Layout algorithm for node positions
        #[arg(long, value_enum, default_value = "layered")]
        layout: LayoutKindArg,
        /// Hop bound for keyword edges (ignored by other kinds)
        #[arg(long, default_value_t = 1)]
        max_depth: usize,
        /// Path to the package records JSON
        #[arg(long)]
        data: Option<String>,
        /// Optional path to a prebuilt graph JSON (skips rebuild)
        #[arg(long)]
        graph: Option<String>,
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
