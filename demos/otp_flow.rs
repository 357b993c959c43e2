use gosms::{OtpCode, Sms};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "995500000001".to_owned());

    let sms = Sms::simulated();

    let response = sms.send_otp(phone.as_str()).await?;
    let Some(challenge) = response.into_sent() else {
        println!("{phone} is not a valid number");
        return Ok(());
    };
    println!("hash: {}, code: {}", challenge.hash.as_str(), challenge.code.value());

    let good = sms
        .verify_otp(phone.as_str(), challenge.hash.clone(), challenge.code)
        .await?;
    println!("correct code -> success: {}, verify: {}", good.success, good.verify);

    let wrong = OtpCode::new(challenge.code.value() - 1);
    let bad = sms.verify_otp(phone.as_str(), challenge.hash, wrong).await?;
    println!("wrong code   -> success: {}, verify: {}", bad.success, bad.verify);

    Ok(())
}
