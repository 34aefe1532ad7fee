use clap::Parser;

mod cli;
mod logger;

use cli::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();
    logger::setup_logger(app.verbose);
    cli::copy::run(app).await
}
