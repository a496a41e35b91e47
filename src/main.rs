// src/main.rs

use shaderbuild::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("shaderbuild error: {err:?}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` if any shader failed to compile.
async fn run_main() -> anyhow::Result<bool> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let summary = run(args).await?;
    Ok(!summary.has_failures())
}
