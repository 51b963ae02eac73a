use hoops_coach_lambda_rust::api::CoachApi;
use hoops_coach_lambda_rust::config::Settings;
use hoops_coach_lambda_rust::handler::handler;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    // Config is resolved once; a bad environment stops the cold start
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(environment = settings.environment.as_str(), "Starting coach lambda");

    let api = CoachApi::new(&settings);
    let api = &api;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<_>| async move { handler(api, event).await })).await
}
