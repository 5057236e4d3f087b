use plan_wallets::{PlanWalletsConfig, exit_code, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    tracing::info!("Checking plan wallets...");

    let dsn = std::env::var("SENTRY_DSN")
        .ok()
        .and_then(|s| s.parse().ok());
    let _sentry = sentry::init(sentry::ClientOptions {
        dsn,
        release: sentry::release_name!(),
        ..Default::default()
    });

    exit_code(PlanWalletsConfig::from_env().and_then(|config| run(&config)))
}
