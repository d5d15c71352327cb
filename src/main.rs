use env_logger::Env;
use ghstats::cli::Cli;
use ghstats::GhStatsError;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            match err.chain().find_map(|cause| cause.downcast_ref::<GhStatsError>()) {
                Some(known) => eprintln!("Error: {}", known.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
