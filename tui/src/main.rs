use clap::Parser;
use teletype_tui::Cli;
use teletype_tui::run_main;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_main(cli).await
}
