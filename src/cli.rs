use crate::config::{DEFAULT_API_URL, DEFAULT_LOOKBACK, DEFAULT_OUTPUT_DIR};
use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commitlog")]
#[command(about = "Write a report of your recent GitHub commits across all accessible repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub access token")]
    pub token: Option<String>,

    #[arg(long, env = "EMAILID", help = "Contact e-mail; used as the author filter unless --author is given")]
    pub email: Option<String>,

    #[arg(long, env = "GITHUB_USERNAME", help = "GitHub login to filter commits by")]
    pub author: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, help = "Base URL of the GitHub REST API")]
    pub api_url: String,

    #[arg(long, default_value = DEFAULT_LOOKBACK, help = "How far back to look (e.g. 7days, 2weeks, 36h)")]
    pub since: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, help = "Directory the dated report is written to")]
    pub output_dir: PathBuf,

    #[arg(long, help = "Disable the progress bar", default_value_t = false)]
    pub no_progress: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::report::exec(&self.run)
    }
}
