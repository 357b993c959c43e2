use std::io;

use gosms::{Settings, Sms};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::from_env()?;
    let phone = std::env::var("GOSMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "GOSMS_PHONE environment variable is required",
        )
    })?;
    let sender = std::env::var("GOSMS_SENDER").unwrap_or_else(|_| "GOSMS".to_owned());
    let text = std::env::var("GOSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the gosms demo.".to_owned());

    let sms = Sms::from_settings(&settings)?;
    println!("backend: {:?}", sms.backend());

    let response = sms.send(sender, phone, text).await?;
    let Some(sent) = response.sent() else {
        println!("gateway rejected the destination number");
        return Ok(());
    };
    println!(
        "message_id: {}, balance: {}, characters: {}",
        sent.message_id, sent.balance, sent.character_count
    );

    let status = sms.status(sent.message_id).await?;
    println!("status: {}", status.status.as_str());

    Ok(())
}
