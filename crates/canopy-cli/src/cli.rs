use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "canopy",
    about = "Canopy — stage and commit edits against a remote repository subtree",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Alternate configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a bearer token for remote access
    Login(LoginArgs),
    /// Show the remote subtree
    Tree(TreeArgs),
    /// Stage edits and submit them as one atomic commit
    Apply(ApplyArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// The bearer token value
    #[arg(long)]
    pub token: String,
    /// Token lifetime in seconds, when the remote reported one
    #[arg(long)]
    pub expires_in: Option<i64>,
}

#[derive(Args)]
pub struct TreeArgs {}

#[derive(Args)]
pub struct ApplyArgs {
    /// Stage a folder creation, as PARENT:NAME (or NAME at the root)
    #[arg(long = "mkdir", value_name = "PARENT:NAME")]
    pub mkdir: Vec<String>,

    /// Stage a local file upload, as LOCAL:PARENT (or LOCAL for the root)
    #[arg(long = "upload", value_name = "LOCAL:PARENT")]
    pub upload: Vec<String>,

    /// Stage a deletion of a remote path
    #[arg(long = "delete", value_name = "PATH")]
    pub delete: Vec<String>,

    /// Print the plan without submitting
    #[arg(long)]
    pub dry_run: bool,

    /// Submit without re-running for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}
