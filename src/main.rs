mod config;

mod app;
mod auth;
mod ctx;
mod db;
mod errors;
mod extract;
mod notes;
mod shared;
mod state;
mod users;

use tokio::net::TcpListener;

pub use config::config;
pub use db::{init_db, DB};
pub use errors::{Error, Result};

#[tokio::main]
async fn main() -> errors::Result<()> {
    let config = config();

    shared::tracing::setup_tracing(false);

    let conn = init_db().await?;

    let app = app::create_app(conn).await?;
    let app = shared::tracing::add_tracing_layer(app);

    let port = config.port;
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await.unwrap();

    tracing::info!("listening on http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();

    Ok(())
}
