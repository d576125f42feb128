use actix_web::{middleware, web, App, HttpServer};
use log::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use grid_garden::{
    api::{openapi::ApiDoc, routes::configure, state::AppState},
    config::Config,
    logic::editor::EditorSession,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let session = EditorSession::load(config.store.open(), config.default_dims);
    let state = AppState::new(session, config.long_press);

    let bind_addr = config.bind_addr.clone();
    info!("🌱 Grid Garden editor started at http://{bind_addr}");
    info!("   GET  /api/garden");
    info!(
        "   POST /api/pointer/{{down,move,up,leave}} (long-press after {:?})",
        state.timers.threshold()
    );
    info!("   📖 Swagger UI → http://{bind_addr}/swagger-ui/");
    info!("   📌 OpenAPI spec → http://{bind_addr}/api-docs/openapi.json");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let message = format!("JSON deserialization error: {err}");
                actix_web::error::InternalError::from_response(
                    err,
                    actix_web::HttpResponse::BadRequest()
                        .json(serde_json::json!({ "error": message })),
                )
                .into()
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
