use clap::Parser;
use colored::Colorize;

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    let cli = casebench::Cli::parse();
    if let Err(err) = casebench::entry(&cli) {
        eprintln!(
            "❌ {}: {}",
            "ERROR".red().bold(),
            format!("{:#}", err).red()
        );
        std::process::exit(1);
    }
    Ok(())
}
