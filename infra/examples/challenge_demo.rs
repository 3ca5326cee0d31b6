//! Walks the challenge flow end to end against in-memory adapters.
//!
//! Run with: cargo run --example challenge_demo -p mc_infra

use std::sync::Arc;

use mc_core::repositories::audit::NoOpAuditSink;
use mc_core::services::challenge::{ChallengeFlow, PlainTextRenderer, Signal};
use mc_core::services::otp::{OtpConfig, OtpCredentialManager};
use mc_core::domain::entities::user_ref::UserRef;
use mc_infra::credential::{CachedCredentialStore, InMemoryCredentialStore};
use mc_infra::email::MockMailer;
use mc_shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    config.logging.init().ok();

    let store = Arc::new(CachedCredentialStore::new(InMemoryCredentialStore::new()));
    let mailer = Arc::new(MockMailer::new());
    let manager = OtpCredentialManager::new(store, mailer.clone(), OtpConfig::default());

    let user = UserRef::new("demo", "1", "user@example.com", true);
    let mut flow = ChallengeFlow::new(
        manager,
        Arc::new(PlainTextRenderer),
        Arc::new(NoOpAuditSink),
        user,
    );

    let response = flow.begin().await?;
    println!("challenge: {}", response.page.unwrap_or_default());

    let code = mailer
        .last_code("user@example.com")
        .expect("code was delivered");
    println!("delivered code: {}", code);

    let response = flow.handle(Signal::Submit(Some("00000000".into()))).await?;
    println!("wrong code -> {:?}", response.state);
    println!("page: {}", response.page.unwrap_or_default());

    let response = flow.handle(Signal::Submit(Some(code))).await?;
    println!("right code -> {:?}", response.state);

    Ok(())
}
