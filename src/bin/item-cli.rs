use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "item-cli")]
#[command(about = "Command-line client for the Item Service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Check readiness (fails while shutting down)
    Ready,
    /// Show application and runtime metadata
    Info,
    /// List items
    List {
        #[arg(long, default_value_t = 0)]
        skip: i64,
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Show one item
    Get { id: u64 },
    /// Create an item
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an item
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Health => client.get(format!("{base}/health")),
        Commands::Ready => client.get(format!("{base}/health/ready")),
        Commands::Info => client.get(format!("{base}/info")),
        Commands::List { skip, limit } => client
            .get(format!("{base}/items"))
            .query(&[("skip", skip), ("limit", limit)]),
        Commands::Get { id } => client.get(format!("{base}/items/{id}")),
        Commands::Create {
            name,
            price,
            quantity,
            description,
        } => client.post(format!("{base}/items")).json(&json!({
            "name": name,
            "description": description,
            "price": price,
            "quantity": quantity,
        })),
        Commands::Delete { id } => client.delete(format!("{base}/items/{id}")),
    };

    let res = request.send().await?;
    let ok = print_response(res).await?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the body of `res`. Returns whether the status was a success.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(false);
    }

    if status == reqwest::StatusCode::NO_CONTENT {
        println!("{}", status);
        return Ok(true);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(true)
}
