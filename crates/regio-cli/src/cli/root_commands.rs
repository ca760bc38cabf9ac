use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List provinces (fetched on first use, then served from the local store).
    Provinces,
    /// List the cities of one province.
    Cities(CitiesArgs),
    /// List the counties of one city, with their weather ids.
    Counties(CountiesArgs),
    /// Drill down interactively: number to select, `b` to go back, `q` to quit.
    Browse,
}

#[derive(Clone, Debug, Args)]
pub struct CitiesArgs {
    /// Province name or remote code.
    #[arg(long)]
    pub province: String,
}

#[derive(Clone, Debug, Args)]
pub struct CountiesArgs {
    /// Province name or remote code.
    #[arg(long)]
    pub province: String,
    /// City name or remote code.
    #[arg(long)]
    pub city: String,
}
