use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use shared::config::AppConfig;
use shared::models::user::User;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::errors::user_service_errors::UserServiceError;
use shared::services::user_service::UserService;

/// The parts of Cognito's post-confirmation trigger payload we read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostConfirmationEvent {
    user_name: String,
    request: Request,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    user_attributes: UserAttributes,
}

#[derive(Deserialize)]
struct UserAttributes {
    email: String,
    given_name: Option<String>,
    family_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let app_config = AppConfig::from_env()?;

    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    let user_repo = DynamoDbUserRepository::new(client, &app_config.users_table);
    let user_service = Arc::new(UserService::new(Arc::new(user_repo)));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let user_service = user_service.clone();
        async move { user_signup_handler(&user_service, event.payload).await }
    }))
    .await
}

/// Creates the account record and hands the event back, as Cognito requires.
async fn user_signup_handler(user_service: &UserService, payload: Value) -> Result<Value, Error> {
    let event: PostConfirmationEvent = serde_json::from_value(payload.clone())?;
    let attributes = event.request.user_attributes;

    info!("Creating user: {}", event.user_name);

    let user = User::new(
        event.user_name.clone(),
        attributes.email,
        attributes.given_name.unwrap_or_default(),
        attributes.family_name.unwrap_or_default(),
        chrono::Utc::now(),
    );

    match user_service.create_user(&user).await {
        Ok(()) => info!("User created successfully: {}", event.user_name),
        // Cognito retries the trigger on timeouts
        Err(UserServiceError::UserAlreadyExists) => {
            warn!("User {} already exists, leaving it untouched", event.user_name)
        }
        Err(e) => {
            return Err(Error::from(format!(
                "Failed to create user {}: {}",
                event.user_name, e
            )))
        }
    }

    Ok(payload)
}
