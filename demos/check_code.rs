use std::io;

use telegram_gateway::{GatewayClient, StatusQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("GATEWAY_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "GATEWAY_TOKEN environment variable is required",
        )
    })?;
    let request_id = std::env::var("GATEWAY_REQUEST_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "GATEWAY_REQUEST_ID environment variable is required",
        )
    })?;
    let code = std::env::var("GATEWAY_CODE").ok();

    let client = GatewayClient::new(token);
    let mut query = StatusQuery::for_request(request_id);
    if let Some(code) = code {
        query = query.code(code);
    }

    let outcome = client.check_verification_status(query).await?;
    println!("outcome: {outcome:?}");

    Ok(())
}
