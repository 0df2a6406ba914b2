use std::error::Error;

mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine: variables may come from the real environment.
    dotenvy::dotenv().ok();

    telemetry::init()?;

    api::start().await?;

    Ok(())
}
