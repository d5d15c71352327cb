use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ghstats")]
#[command(about = "GitHub profile analytics: languages, activity, impact and comparisons")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub personal access token")]
    pub token: String,

    #[arg(
        long,
        env = "GITHUB_API_URL",
        default_value = crate::config::DEFAULT_API_URL,
        help = "Base URL of the GitHub REST API"
    )]
    pub api_url: String,

    #[arg(long, env = "GHSTATS_CACHE_TTL", help = "How long fetched data stays cached, e.g. 5m or 90s")]
    pub cache_ttl: Option<String>,

    #[arg(long, default_value_t = 1, help = "Pages of public events to fetch (100 events each)")]
    pub event_pages: u32,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full profile report
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(help = "GitHub username")]
        username: String,
    },
    /// Contribution heatmap from recent public events
    Heat {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Bucket by month instead of by day")]
        monthly: bool,

        #[arg(help = "GitHub username")]
        username: String,
    },
    /// Month-by-month commits, pull requests and issues
    Activity {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, default_value = "1y", help = "Time period: 6m, 1y, 2y or all")]
        period: String,

        #[arg(help = "GitHub username")]
        username: String,
    },
    /// Compare two users side by side
    Compare {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(help = "First GitHub username")]
        first: String,

        #[arg(help = "Second GitHub username")]
        second: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { json, ndjson, username } => {
                crate::profile::exec(self.common, username, json, ndjson).await
            }
            Commands::Heat { json, ndjson, monthly, username } => {
                crate::heat::exec(self.common, username, json, ndjson, monthly).await
            }
            Commands::Activity { json, ndjson, period, username } => {
                crate::activity::exec(self.common, username, period, json, ndjson).await
            }
            Commands::Compare { json, ndjson, first, second } => {
                crate::compare::exec(self.common, first, second, json, ndjson).await
            }
        }
    }
}
