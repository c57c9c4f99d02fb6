use arete::presentation::cli::{logging, CliApp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = CliApp::new();

    // Initialize logging; config.yaml may raise the level later
    let log_control = logging::init(app.verbose());

    app.with_log_control(log_control).run().await
}
