//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use contact_editor::{build_router, config::AppState};

#[tokio::main]
async fn main() {
    // RUST_LOG manda; sem ele, "info".
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");
    let addr = app_state.settings.bind_addr.clone();

    // Varre sessões ociosas a cada minuto, além da limpeza feita em cada abertura.
    let _sweeper = app_state.sessions.spawn_sweeper(std::time::Duration::from_secs(60));

    let app = build_router(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
