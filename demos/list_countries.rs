use std::io;

use nuntium::NuntiumClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("NUNTIUM_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NUNTIUM_URL environment variable is required",
        )
    })?;

    // Reference data is unauthenticated; the credentials are unused here.
    let client = NuntiumClient::new(base_url, "", "", "");

    for country in client.countries().await? {
        println!("{} ({}, {:?})", country.name, country.iso2, country.iso3);
        for carrier in client.carriers(Some(&country.iso2)).await? {
            println!("  carrier {} {:?}", carrier.guid, carrier.name);
        }
    }

    Ok(())
}
