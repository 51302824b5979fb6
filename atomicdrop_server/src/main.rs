use axum::http::StatusCode;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::TypedHeader;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use atomicdrop_core::{resolve_bet, verify, Error as EngineError, RiskTier, SecretSeed};
use atomicdrop_shared::{
    BetRequest, BetResponse, CommitmentResponse, RotateEpochResponse, VerifyRequest,
    VerifyResponse,
};

#[derive(Clone)]
struct AppState {
    db: SqlitePool,
    api_key: String,
}

// DB schema is defined in migrations (see migrations/ folder). The epoch table
// holds exactly one row: the active secret, its commitment, and the next
// counter. Bets are appended to the log with everything a verifier needs once
// the seed is revealed.

#[derive(Debug, sqlx::FromRow)]
struct EpochRow {
    secret_seed: String,
    commitment: String,
    counter: i64,
}

async fn load_epoch<'e, E>(executor: E) -> anyhow::Result<Option<EpochRow>>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let row = sqlx::query_as::<_, EpochRow>(
        "SELECT secret_seed, commitment, counter FROM epoch WHERE id = 1",
    )
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

async fn init_db(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(db).await?;
    match load_epoch(db).await? {
        Some(epoch) => {
            // Repair a stale commitment so every published value stays
            // consistent with the stored secret.
            let secret = SecretSeed::from_hex(&epoch.secret_seed)?;
            let commitment = secret.commitment();
            if commitment != epoch.commitment {
                sqlx::query("UPDATE epoch SET commitment = ? WHERE id = 1")
                    .bind(&commitment)
                    .execute(db)
                    .await?;
            }
        }
        None => {
            let secret = SecretSeed::generate()?;
            let commitment = secret.commitment();
            sqlx::query(
                "INSERT INTO epoch (id, secret_seed, commitment, counter) VALUES (1, ?, ?, 0)",
            )
            .bind(secret.reveal_hex())
            .bind(&commitment)
            .execute(db)
            .await?;
            info!("committed first epoch: {commitment}");
        }
    }
    Ok(())
}

async fn route_commitment(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CommitmentResponse>, StatusCode> {
    let epoch = load_epoch(&state.db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    Ok(Json(CommitmentResponse {
        commitment: epoch.commitment,
    }))
}

async fn route_bet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BetRequest>,
) -> Result<Json<BetResponse>, StatusCode> {
    // Counter allocation and the bet log write happen in one transaction so
    // concurrent bets can never consume the same counter value.
    let mut tx = state
        .db
        .begin()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let epoch = load_epoch(&mut *tx)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    let secret =
        SecretSeed::from_hex(&epoch.secret_seed).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let counter = epoch.counter as u64;
    let outcome = resolve_bet(&secret, &req.client_seed, counter, req.steps, req.risk, req.stake)
        .map_err(|e| match e {
            EngineError::InvalidConfiguration { .. } | EngineError::InvalidStake => {
                StatusCode::BAD_REQUEST
            }
            EngineError::SeedNotReady => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        })?;

    let path: Vec<u8> = outcome.path.iter().map(|d| d.as_bit()).collect();
    let path_json =
        serde_json::to_string(&path).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let ts = chrono::Utc::now().to_rfc3339();
    let risk = req.risk.unwrap_or_default();
    sqlx::query(
        "INSERT INTO bets (ts, client_seed, counter, commitment, steps, risk, stake, slot, multiplier, win_amount, path_json) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(ts)
    .bind(&req.client_seed)
    .bind(counter as i64)
    .bind(&epoch.commitment)
    .bind(req.steps as i64)
    .bind(risk.as_str())
    .bind(req.stake)
    .bind(outcome.slot as i64)
    .bind(outcome.multiplier)
    .bind(outcome.win_amount)
    .bind(path_json)
    .execute(&mut *tx)
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    sqlx::query("UPDATE epoch SET counter = counter + 1 WHERE id = 1")
        .execute(&mut *tx)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    tx.commit()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(BetResponse {
        commitment: epoch.commitment,
        counter,
        path,
        slot: outcome.slot,
        multiplier: outcome.multiplier,
        win_amount: outcome.win_amount,
    }))
}

async fn route_verify(Json(req): Json<VerifyRequest>) -> Result<Json<VerifyResponse>, StatusCode> {
    let revealed = SecretSeed::from_hex(&req.revealed_seed).map_err(|_| StatusCode::BAD_REQUEST)?;
    let valid = verify(
        &revealed,
        &req.commitment,
        &req.client_seed,
        req.counter,
        req.steps,
        &req.claimed_path,
    );
    Ok(Json(VerifyResponse { valid }))
}

async fn route_admin_rotate_epoch(
    State(state): State<Arc<AppState>>,
    TypedHeader(axum_extra::headers::Authorization(bearer)): TypedHeader<
        axum_extra::headers::Authorization<axum_extra::headers::authorization::Bearer>,
    >,
) -> Result<Json<RotateEpochResponse>, StatusCode> {
    if bearer.token() != state.api_key {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let next = SecretSeed::generate().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let next_commitment = next.commitment();

    let mut tx = state
        .db
        .begin()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let old = load_epoch(&mut *tx)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    sqlx::query("UPDATE epoch SET secret_seed = ?, commitment = ?, counter = 0 WHERE id = 1")
        .bind(next.reveal_hex())
        .bind(&next_commitment)
        .execute(&mut *tx)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    tx.commit()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    info!("rotated epoch: revealed {} committed {next_commitment}", old.commitment);
    Ok(Json(RotateEpochResponse {
        revealed_seed: old.secret_seed,
        revealed_commitment: old.commitment,
        commitment: next_commitment,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let db = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(
            &std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://atomicdrop.db".to_string()),
        )
        .await?;
    init_db(&db).await?;

    let state = Arc::new(AppState {
        db,
        api_key: std::env::var("API_KEY").unwrap_or_else(|_| "dev-key".into()),
    });

    let app = Router::new()
        .route("/commitment", get(route_commitment))
        .route("/bet", post(route_bet))
        .route("/verify", post(route_verify))
        .route("/admin/rotate-epoch", post(route_admin_rotate_epoch))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = std::env::var("BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
