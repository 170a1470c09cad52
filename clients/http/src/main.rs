use actix_cors::Cors;
use actix_web::{
    middleware::{self, Condition, NormalizePath},
    web::{self, Data},
    App, HttpServer,
};
use clap::Parser;
use database::database::{database::Database, options::DatabaseOptions};
use person_registry_http::routes::{self, endpoint_not_found};
use std::io;

/// 📀 Person Registry, a JSON HTTP interface for creating, reading, replacing and deleting people
#[derive(Parser, Debug)]
struct Cli {
    /// Port the http server will run on
    #[clap(short, long, default_value = "3000")]
    port: u16,

    /// Address the http server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Logs every http request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let request_manager = Database::new(DatabaseOptions::default()).run();
    let server_request_manager = request_manager.clone();

    log::info!("Server running on {}:{}", args.address, args.port);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(server_request_manager.clone()))
            .configure(routes::configure)
            .default_service(web::to(endpoint_not_found))
            .wrap(Cors::permissive())
            .wrap(NormalizePath::trim())
            .wrap(Condition::new(args.log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await?;

    // actix has already handled the Ctrl-C, all that is left is stopping the database thread
    match request_manager.send_shutdown_request() {
        Ok(shutdown_response) => log::info!("Shutting down server: {}", shutdown_response),
        Err(e) => log::error!("Database did not shut down cleanly: {}", e),
    }

    Ok(())
}
