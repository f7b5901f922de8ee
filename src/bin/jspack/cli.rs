//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use jspack::resolver::{Exclusions, Request};

/// jspack - resolve source packages and concatenate them in dependency order
#[derive(Parser)]
#[command(name = "jspack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Package directory or manifest to load (repeatable, first is the root)
    #[arg(short = 'p', long = "path", value_name = "PATH", global = true)]
    pub paths: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub paths: Vec<PathBuf>,
    pub color: bool,
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            paths: self.paths.clone(),
            color: !self.no_color,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the requested files into one output
    Build(BuildArgs),

    /// Print the dependency-ordered file list for a request
    Resolve(ResolveArgs),

    /// Report requirements that no file provides
    Validate(ValidateArgs),

    /// List the files of every loaded package
    List(ListArgs),
}

/// What to include in a resolution.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// File to include (`package/name` or bare name)
    #[arg(long = "file", value_name = "FILE")]
    pub files: Vec<String>,

    /// Component whose provider to include
    #[arg(long = "component", value_name = "COMPONENT")]
    pub components: Vec<String>,

    /// Package whose files to include
    #[arg(long = "package", value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

impl SelectionArgs {
    pub fn request(&self) -> Request {
        Request {
            files: self.files.clone(),
            components: self.components.clone(),
            packages: self.packages.clone(),
        }
    }
}

/// What to leave out of a resolution.
#[derive(Args, Debug, Clone)]
pub struct ExclusionArgs {
    /// Drop a component and everything it requires before resolving
    #[arg(id = "exclude_components", long = "exclude-component", value_name = "COMPONENT")]
    pub components: Vec<String>,

    /// Drop a single file from the result
    #[arg(id = "exclude_files", long = "exclude-file", value_name = "FILE")]
    pub files: Vec<String>,

    /// Drop a file and everything it requires from the result
    #[arg(long = "exclude-deps", value_name = "FILE")]
    pub files_and_deps: Vec<String>,
}

impl ExclusionArgs {
    pub fn exclusions(&self) -> Exclusions {
        Exclusions {
            components: self.components.clone(),
            files: self.files.clone(),
            files_and_deps: self.files_and_deps.clone(),
        }
    }
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub exclusion: ExclusionArgs,

    /// Strip `<TAG>...</TAG>` comment blocks (repeatable)
    #[arg(long = "block", value_name = "TAG")]
    pub blocks: Vec<String>,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub exclusion: ExclusionArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only list the files of this package
    pub package: Option<String>,
}
