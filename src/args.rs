use clap::Parser;

/// GitHub API demonstration CLI that searches repositories, then fetches a
/// sample commit log and contents listing for the top result, with built-in
/// rate-limit handling.
#[derive(Parser)]
#[clap(
    author,
    version,
    about,
    long_about = "Fetches paginated search results, commits and directory contents from the GitHub REST API, aggregates them and writes the combined result set to a JSON file."
)]
pub struct Args {
    /// Repository search query, in GitHub search syntax.
    #[clap(short, long, default_value = "stars:>1000")]
    pub query: String,

    /// Field the search results are sorted by.
    #[clap(long, default_value = "stars")]
    pub sort: String,

    /// Sort order for search results (asc or desc).
    #[clap(long, default_value = "desc")]
    pub order: String,

    /// Number of records requested per page.
    #[clap(long, value_name = "NUM", default_value = "100")]
    pub per_page: u32,

    /// Maximum number of search page records to collect.
    #[clap(long, value_name = "NUM", default_value = "5")]
    pub max_repos: usize,

    /// Maximum number of commits to collect for the sample repository.
    #[clap(long, value_name = "NUM", default_value = "10")]
    pub max_commits: usize,

    /// Output file path for the aggregated results in JSON format.
    #[clap(short, long, default_value = "github_api_results.json")]
    pub output: String,

    /// GitHub API token; falls back to the GITHUB_TOKEN environment variable.
    #[clap(short, long)]
    pub token: Option<String>,
}
