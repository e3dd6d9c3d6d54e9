use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::process;

use task_api::auth::AuthMiddleware;
use task_api::config::{Config, DEFAULT_JWT_SECRET};
use task_api::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.is_production() && config.jwt.secret == DEFAULT_JWT_SECRET {
        log::error!("refusing to start in production with the default JWT_SECRET");
        process::exit(1);
    }

    let pool = match db::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("failed to connect to database: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = db::run_migrations(&pool).await {
        log::error!("migration failed: {}", e);
        process::exit(1);
    }
    log::info!("database connected and migrated");

    let pool = web::Data::new(pool);
    let jwt = web::Data::new(config.jwt.clone());

    log::info!("starting server at {}", config.server.server_url());
    HttpServer::new(move || {
        let auth = AuthMiddleware::new(&jwt.secret);
        App::new()
            .app_data(pool.clone())
            .app_data(jwt.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| routes::config(cfg, auth))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
