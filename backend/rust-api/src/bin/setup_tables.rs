// Creates the finance tables, policies and stored functions.
// Usage: cargo run --bin setup_tables -- [--database-url <url>] [--print]

use clap::Parser;
use finpilot_api::database::{self, schema};

#[derive(Parser)]
#[command(about = "Install the FinPilot finance schema")]
struct Args {
    /// Defaults to DATABASE_URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Print the statements instead of executing them.
    #[arg(long)]
    print: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if args.print {
        for statement in schema::statements() {
            println!("{};\n", statement);
        }
        return Ok(());
    }

    let mut config = finpilot_api::Config::from_env()?;
    if let Some(url) = args.database_url {
        config.database_url = url;
    }
    let pool = database::connect(&config).await?;
    schema::install(&pool).await?;

    println!("Finance tables created successfully");
    Ok(())
}
