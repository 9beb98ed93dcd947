//! Estately server entry point.
//!
//! Usage:
//! - `estately` — serve the API
//! - `estately mint-key <email> <role>` — print a product-key proof offline,
//!   using the configured `PRODUCT_KEY_SECRET`. This is how the first admin
//!   proof is bootstrapped before any admin account exists.

use estately::{
    config::AppConfig, create_routes, default_route_policy, AppState, PasswordHasher,
    PgAccountDirectory, ProductKeyService, Role,
};

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env()?;
    config.validate()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("mint-key") {
        return mint_key(&config, &args[1..]);
    }

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    PgAccountDirectory::migrate(&pool).await?;

    let directory = Arc::new(PgAccountDirectory::new(pool));
    let state = AppState::new(&config, directory, default_route_policy());

    let app = create_routes(state).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Estately listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn mint_key(config: &AppConfig, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let [email, role] = args else {
        return Err("usage: estately mint-key <email> <role>".into());
    };
    let role: Role = role.parse()?;

    let passwords = PasswordHasher::new(config);
    let keys = ProductKeyService::new(config.product_key_secret.clone(), passwords);

    println!("{}", keys.derive(email, role)?);
    Ok(())
}
