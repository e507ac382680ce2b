use std::io;

use nuntium::{AoMessage, NuntiumClient, SendAo};

fn required_var(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = required_var("NUNTIUM_URL")?;
    let account = required_var("NUNTIUM_ACCOUNT")?;
    let application = required_var("NUNTIUM_APPLICATION")?;
    let password = required_var("NUNTIUM_PASSWORD")?;
    let to = required_var("NUNTIUM_TO")?;
    let body =
        std::env::var("NUNTIUM_BODY").unwrap_or_else(|_| "Hello from the nuntium demo.".to_owned());

    let client = NuntiumClient::new(base_url, account, application, password);

    let message = AoMessage::new("sms://demo", to, "demo", body);
    let receipt = client.send_ao(SendAo::single(message)).await?;
    println!(
        "id: {:?}, guid: {:?}, token: {:?}",
        receipt.id, receipt.guid, receipt.token
    );

    if let Some(token) = receipt.token {
        for message in client.get_ao(&token).await? {
            println!("queued: {message:?}");
        }
    }

    Ok(())
}
