use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use common::database::{health_check, init_pool};
use planetary_api::{
    AppState, create_router,
    jwt::JwtService,
    mail, schema,
    settings::{Settings, StorageBackend},
};
use sqlx::PgPool;

const USAGE: &str = "usage: planetary-api [serve | db-create | db-drop | db-seed]";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let command = std::env::args().nth(1).unwrap_or_else(|| "serve".to_string());
    let settings = Settings::new()?;

    match command.as_str() {
        "serve" => serve(settings).await,
        "db-create" => {
            let pool = connect(&settings).await?;
            schema::create_tables(&pool).await?;
            Ok(())
        }
        "db-drop" => {
            let pool = connect(&settings).await?;
            schema::drop_tables(&pool).await?;
            Ok(())
        }
        "db-seed" => {
            let state = postgres_state(&settings).await?;
            schema::seed(
                state.planet_repository.as_ref(),
                state.user_repository.as_ref(),
            )
            .await
        }
        other => anyhow::bail!("unknown command '{}'\n{}", other, USAGE),
    }
}

async fn connect(settings: &Settings) -> Result<PgPool> {
    if settings.storage != StorageBackend::Postgres {
        anyhow::bail!("database commands need the postgres storage backend");
    }

    let pool = init_pool(&settings.database).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    Ok(pool)
}

async fn postgres_state(settings: &Settings) -> Result<AppState> {
    let pool = connect(settings).await?;
    let jwt_service = JwtService::new(settings.jwt.clone())?;
    let mailer = mail::from_config(&settings.mail)?;

    Ok(AppState::postgres(pool, jwt_service, mailer))
}

async fn serve(settings: Settings) -> Result<()> {
    info!("Starting planetary API");

    let app_state = match settings.storage {
        StorageBackend::Postgres => postgres_state(&settings).await?,
        StorageBackend::Memory => {
            info!("Using in-memory storage, data will not survive a restart");
            let jwt_service = JwtService::new(settings.jwt.clone())?;
            let mailer = mail::from_config(&settings.mail)?;
            AppState::in_memory(jwt_service, mailer)
        }
    };

    let app = create_router(app_state);

    let address = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Planetary API listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Planetary API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
