// src/main.rs

use vic_case::errors::CaseError;
use vic_case::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("vic-case error: {err:?}");
            std::process::exit(err.exit_code());
        }
    }
}

async fn run_main() -> Result<i32, CaseError> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
