use actix_web::{web, App, HttpServer};
use log::info;

use chess_board_app::config::AppConfig;
use chess_board_app::models::AppState;
use chess_board_app::routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let bind_addr = config.bind_addr.clone();
    let static_dir = config.static_dir.clone();

    info!("Starting chess board server at http://{}", bind_addr);
    info!(
        "Clock {}s per side, opponent delay {:?}",
        config.start_seconds, config.opponent_delay
    );

    let app_state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(app_state.clone())
            .configure(move |cfg| configure_routes(cfg, &static_dir))
    })
    .bind(bind_addr)?
    .run()
    .await
}
