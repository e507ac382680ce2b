use std::io;

use nuntium::{Channel, Direction, NuntiumClient, NuntiumError};

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

    let client = NuntiumClient::new(base_url, account, application, password);

    let mut channel = Channel::new("demo-channel", "qst_server", "sms");
    channel.direction = Some(Direction::Bidirectional);
    channel.enabled = Some(true);
    channel
        .configuration
        .insert("password".to_owned(), "demo".to_owned());

    match client.create_channel(&channel).await {
        Ok(created) => println!("created: {created:?}"),
        Err(NuntiumError::Validation {
            summary,
            properties,
        }) => {
            eprintln!("rejected: {summary}");
            for (field, message) in properties {
                eprintln!("  {field}: {message}");
            }
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    for channel in client.channels().await? {
        println!("channel {} enabled={:?}", channel.name, channel.enabled);
    }

    client.delete_channel("demo-channel").await?;
    Ok(())
}
