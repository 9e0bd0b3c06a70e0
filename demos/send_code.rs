use std::io;

use telegram_gateway::GatewayClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("GATEWAY_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "GATEWAY_TOKEN environment variable is required",
        )
    })?;
    let phone = std::env::var("GATEWAY_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "GATEWAY_PHONE environment variable is required",
        )
    })?;

    let mut client = GatewayClient::new(token);
    client.set_phone_number(phone);

    if !client.check_send_ability(None).await? {
        eprintln!("gateway cannot deliver to this number right now");
        return Ok(());
    }

    client.send_verification_message(None).await?;
    println!(
        "request_id: {:?}, cost: {:?}, balance: {:?}, delivery: {}",
        client.request_id(),
        client.request_cost(),
        client.remaining_balance(),
        client.delivery_status(),
    );

    Ok(())
}
