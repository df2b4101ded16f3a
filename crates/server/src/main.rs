use quizpool_engine::QuestionBank;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quizpool_server::config::Config;
use quizpool_server::routes;
use quizpool_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let bank = QuestionBank::from_path(&config.questions_path)?;
    info!(
        path = %config.questions_path.display(),
        categories = bank.categories().len(),
        questions = bank.len(),
        "question catalog loaded"
    );

    let state = AppState::new(bank);
    let app = routes::router(state);

    let listener = TcpListener::bind(config.addr()).await?;
    info!("backend server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
