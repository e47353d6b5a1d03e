use clap::{Parser, Subcommand, ValueEnum};
use reqwest::redirect::Policy;
use serde_json::json;
use uuid::Uuid;

use plot_resolver::identifier::{classify, Classification, IntId};
use plot_resolver::{build_canonical_path, RoutingAttributes};

#[derive(Parser)]
#[command(name = "plot-resolver-cli")]
#[command(about = "Inspect identifiers and canonical listing URLs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a raw identifier is classified
    Classify { raw: String },
    /// Build the canonical path for listing attributes, offline
    Path {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        int_id: Option<u64>,
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Ask a running resolver where an identifier redirects
    Resolve {
        raw: String,
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
        #[arg(short, long, value_enum, default_value_t = Endpoint::Alias)]
        endpoint: Endpoint,
    },
}

/// Redirect endpoint family to query.
#[derive(Clone, Copy, ValueEnum)]
enum Endpoint {
    /// `/r/i/{int_id}`
    Int,
    /// `/r/u/{uuid}`
    Uuid,
    /// `/plots/{id}`
    Alias,
}

impl Endpoint {
    fn prefix(self) -> &'static str {
        match self {
            Endpoint::Int => "r/i",
            Endpoint::Uuid => "r/u",
            Endpoint::Alias => "plots",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { raw } => {
            let value = match classify(&raw) {
                Classification::Uuid(id) => json!({ "kind": "uuid", "value": id }),
                Classification::IntId(id) => json!({ "kind": "int_id", "value": id }),
                Classification::Invalid => json!({ "kind": "invalid" }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Path { id, int_id, district, location } => {
            let attributes = RoutingAttributes {
                id,
                int_id: int_id.and_then(IntId::new),
                district,
                location,
            };
            println!("{}", build_canonical_path(&attributes));
        }
        Commands::Resolve { raw, url, endpoint } => {
            let client = reqwest::Client::builder().redirect(Policy::none()).build()?;
            let res = client
                .get(format!("{}/{}/{}", url.trim_end_matches('/'), endpoint.prefix(), raw))
                .send()
                .await?;

            let location = res
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string();
            println!("{} {}", res.status().as_u16(), location);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_values() {
        let cli = Cli::try_parse_from(["plot-resolver-cli", "resolve", "123", "--endpoint", "int"]).unwrap();
        match cli.command {
            Commands::Resolve { endpoint, .. } => assert_eq!(endpoint.prefix(), "r/i"),
            _ => panic!("expected resolve"),
        }

        let cli = Cli::try_parse_from(["plot-resolver-cli", "resolve", "123"]).unwrap();
        match cli.command {
            Commands::Resolve { endpoint, .. } => assert_eq!(endpoint.prefix(), "plots"),
            _ => panic!("expected resolve"),
        }

        assert!(Cli::try_parse_from(["plot-resolver-cli", "resolve", "123", "-e", "legacy"]).is_err());
    }
}
