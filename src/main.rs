use herald::{
    catalog::{self, runner},
    config::Config,
    context::HarnessContext,
    startup,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let scenarios = catalog::selected(config.only);
    info!("Running {} scenarios against {}", scenarios.len(), config.base_url);

    let result = match HarnessContext::from_config(&config).await {
        Ok(mut ctx) => runner::run(&mut ctx, &scenarios).await,
        Err(e) => Err(e),
    };

    match &result {
        Ok(report) => println!("{}", report),
        Err(e) => error!("Run aborted: {}", e),
    }

    std::process::exit(runner::exit_code(&result));
}
