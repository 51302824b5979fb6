use atomicdrop_core::SecretSeed;
use clap::{Parser, Subcommand};
use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};

#[derive(Parser)]
#[command(name = "atomicdrop-cli", about = "Admin CLI for atomicdrop server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Database URL, default sqlite://atomicdrop.db
    #[arg(long, value_parser, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// End the current epoch and commit a fresh secret seed
    RotateEpoch,
    /// View last N bet log entries
    ViewLogs {
        #[arg(default_value_t = 20)]
        n: i64,
    },
    /// Export the bet log to a CSV path
    ExportCsv { path: String },
}

async fn get_pool(url: Option<String>) -> anyhow::Result<SqlitePool> {
    let url = url.unwrap_or_else(|| "sqlite://atomicdrop.db".into());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let pool = get_pool(cli.database_url).await?;

    match cli.command {
        Commands::RotateEpoch => {
            let old = sqlx::query("SELECT secret_seed, commitment FROM epoch WHERE id = 1")
                .fetch_optional(&pool)
                .await?;
            let next = SecretSeed::generate()?;
            let commitment = next.commitment();
            match old {
                Some(row) => {
                    sqlx::query(
                        "UPDATE epoch SET secret_seed = ?, commitment = ?, counter = 0 WHERE id = 1",
                    )
                    .bind(next.reveal_hex())
                    .bind(&commitment)
                    .execute(&pool)
                    .await?;
                    println!(
                        "Revealed old seed: {} (commitment {})",
                        row.get::<String, _>("secret_seed"),
                        row.get::<String, _>("commitment")
                    );
                }
                None => {
                    sqlx::query(
                        "INSERT INTO epoch (id, secret_seed, commitment, counter) VALUES (1, ?, ?, 0)",
                    )
                    .bind(next.reveal_hex())
                    .bind(&commitment)
                    .execute(&pool)
                    .await?;
                }
            }
            println!("Committed new epoch. Commitment: {}", commitment);
        }
        Commands::ViewLogs { n } => {
            let rows = sqlx::query(
                "SELECT id, ts, client_seed, counter, commitment, steps, risk, stake, slot, multiplier, win_amount \
                 FROM bets ORDER BY id DESC LIMIT ?",
            )
            .bind(n)
            .fetch_all(&pool)
            .await?;
            for r in rows {
                let id: i64 = r.get("id");
                let ts: String = r.get("ts");
                let client_seed: String = r.get("client_seed");
                let counter: i64 = r.get("counter");
                let commitment: String = r.get("commitment");
                let steps: i64 = r.get("steps");
                let risk: String = r.get("risk");
                let stake: f64 = r.get("stake");
                let slot: i64 = r.get("slot");
                let multiplier: f64 = r.get("multiplier");
                let win_amount: f64 = r.get("win_amount");
                println!(
                    "#{:>6} {} seed={} counter={} commit={} steps={} risk={} stake={} slot={} x{} win={}",
                    id, ts, client_seed, counter, commitment, steps, risk, stake, slot, multiplier,
                    win_amount
                );
            }
        }
        Commands::ExportCsv { path } => {
            let mut wtr = csv::Writer::from_path(&path)?;
            let rows = sqlx::query(
                "SELECT id, ts, client_seed, counter, commitment, steps, risk, stake, slot, multiplier, win_amount, path_json \
                 FROM bets ORDER BY id ASC",
            )
            .fetch_all(&pool)
            .await?;
            let total = rows.len();
            for r in &rows {
                wtr.write_record(&[
                    r.get::<i64, _>("id").to_string(),
                    r.get::<String, _>("ts"),
                    r.get::<String, _>("client_seed"),
                    r.get::<i64, _>("counter").to_string(),
                    r.get::<String, _>("commitment"),
                    r.get::<i64, _>("steps").to_string(),
                    r.get::<String, _>("risk"),
                    r.get::<f64, _>("stake").to_string(),
                    r.get::<i64, _>("slot").to_string(),
                    r.get::<f64, _>("multiplier").to_string(),
                    r.get::<f64, _>("win_amount").to_string(),
                    r.get::<String, _>("path_json"),
                ])?;
            }
            wtr.flush()?;
            println!("Exported {} rows to {}", total, path);
        }
    }

    Ok(())
}
