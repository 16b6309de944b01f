use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use roster::database::init_database;
use roster::services::session::AuthEvent;
use roster::{AppState, Config, PgRosterStore, SessionState, handlers};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Roster API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (reads .env when present)
    let config = Config::from_env()?;

    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if config.is_development() { "debug" } else { "info" },
    ))
    .init();

    log::info!("Starting roster API (environment: {})", config.environment);
    log::info!(
        "Display order fallbacks: dancers={:?}, teams={:?}",
        config.dancer_order_fallback,
        config.team_order_fallback
    );

    let pool = init_database(&config.database_url, config.database_max_connections).await?;
    let store = PgRosterStore::new(pool);

    let session = SessionState::new();
    let _auth_log = session.subscribe(|event| match event {
        AuthEvent::SignedIn(user) => log::info!("User {} signed in", user.id),
        AuthEvent::TokenRefreshed(user) => log::info!("User {} refreshed token", user.id),
        AuthEvent::SignedOut(id) => log::info!("User {} signed out", id),
    });

    let app_state = web::Data::new(AppState::new(store, &config));
    let session_data = web::Data::new(session);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    let allowed_origin = config.client_base_url.clone();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(session_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&allowed_origin)
                    .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                    .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
                    .max_age(3600),
            )
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
            ))
            .service(hello)
            .service(health)
            .configure(handlers::configure::<PgRosterStore>)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
