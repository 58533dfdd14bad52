use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xsproof", version, about = "Browser-backed XSS execution validation with screenshot proof capture")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate one (url, payload) tuple in a real browser
    Validate(ValidateArgs),
    /// Revisit a URL to check for stored payload execution
    Stored(StoredArgs),
    /// Re-validate a saved finding collection into a proof report
    Report(ReportArgs),
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Target URL with the payload already embedded
    pub url: String,

    /// The payload text, used for proof correlation hashes
    #[arg(short, long)]
    pub payload: String,

    /// Injection context label: html, attribute, javascript, ...
    #[arg(long, default_value = "html")]
    pub context: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct StoredArgs {
    /// URL expected to serve the previously injected payload
    pub url: String,

    /// Correlation id; generated when omitted
    #[arg(long)]
    pub session_id: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// JSON file with saved finding records
    #[arg(short, long)]
    pub input: String,

    /// Where to write the proof report (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}
