use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::config::AppConfig;

mod processor;

use processor::StatusChecker;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let app_config = AppConfig::from_env()?;

    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let checker = StatusChecker::new(client, &app_config);

    run(service_fn(
        move |event: LambdaEvent<aws_lambda_events::event::cloudwatch_events::CloudWatchEvent>| {
            let checker = checker.clone();
            async move { checker.process_event(event.payload).await }
        },
    ))
    .await
}
