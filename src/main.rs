use clap::Parser;
use dotenv::dotenv;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::env;
use std::error::Error;
use tracing::{error, info};

use github_api_client::{Args, Commit, ContentEntry, GitHubClient, SearchPage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize the tracing logger
    tracing_subscriber::fmt::init();

    dotenv().ok();

    let args = Args::parse();

    // Get GitHub API token from arguments or environment
    let token = match &args.token {
        Some(t) if !t.trim().is_empty() => t.clone(),
        _ => match env::var("GITHUB_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token,
            _ => {
                error!("GitHub token not provided or found in environment");
                return Err("GitHub token is required".into());
            }
        },
    };

    let client = GitHubClient::new(&token)?;

    // Create a spinner so long rate-limit waits stay visible.
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    pb.set_message(format!("Searching repositories: {}", args.query));
    info!(
        "Searching for {} pages of repositories matching '{}'",
        args.max_repos, args.query
    );
    let repos = client
        .search_repositories(
            &args.query,
            &args.sort,
            &args.order,
            args.per_page,
            Some(args.max_repos),
        )
        .await?;
    display_repositories(&repos);

    // Take the first repository found as the sample for the other endpoints.
    let sample = match repos.first().and_then(|page| page.items.first()) {
        Some(repo) => repo,
        None => {
            error!("No repositories found for query '{}'", args.query);
            return Err("no repositories found".into());
        }
    };
    let owner = sample.owner.login.clone();
    let name = sample.name.clone();

    pb.set_message(format!("Fetching commits and contents for {}/{}", owner, name));
    info!("Getting {} commits for {}/{}", args.max_commits, owner, name);
    info!("Getting repository contents for {}/{}", owner, name);

    // The two collects share only the read-only session, so they can run
    // concurrently; pages within each stay sequential.
    let (commits, contents) = tokio::try_join!(
        client.get_repository_commits(&owner, &name, args.per_page, Some(args.max_commits)),
        client.get_repository_contents(&owner, &name, ""),
    )?;
    display_commits(&commits);
    display_contents(&contents);

    let results = json!({
        "repositories": repos,
        "sample_commits": commits,
        "contents": contents,
    });
    tokio::fs::write(&args.output, serde_json::to_string_pretty(&results)?).await?;

    pb.finish_with_message("Done");
    info!("Results saved to {}", args.output);
    Ok(())
}

/// Log a summary table of the repositories retrieved.
fn display_repositories(pages: &[SearchPage]) {
    let mut rows = String::new();
    for page in pages {
        for item in &page.items {
            rows.push_str(&format!(
                "\n{:<40} {:>8}  {}",
                item.full_name,
                item.stargazers_count,
                truncate(item.description.as_deref().unwrap_or(""), 30)
            ));
        }
    }
    info!("Sample repositories found:{}", rows);
}

/// Log a summary table of the commits retrieved.
fn display_commits(commits: &[Commit]) {
    if commits.is_empty() {
        error!("No commits found");
        return;
    }
    let mut rows = String::new();
    for commit in commits {
        rows.push_str(&format!(
            "\n{:.10} {:<20} {:<30} {}",
            commit.sha,
            truncate(&commit.commit.author.name, 20),
            truncate(&commit.commit.message, 30),
            commit.commit.author.date
        ));
    }
    info!("Sample commits found:{}", rows);
}

/// Log a summary table of the contents retrieved.
fn display_contents(contents: &[ContentEntry]) {
    if contents.is_empty() {
        error!("No repository contents found");
        return;
    }
    let mut rows = String::new();
    for entry in contents {
        rows.push_str(&format!(
            "\n{:<30} {:<8} {:>10}  {}",
            truncate(&entry.name, 30),
            entry.entry_type,
            entry.size,
            entry.path
        ));
    }
    info!("Sample contents found:{}", rows);
}

/// First `max` characters of `text` on a single line.
fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect::<String>().replace('\n', " ")
}
