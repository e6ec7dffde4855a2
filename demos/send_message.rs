use std::io;

use clickatell_connect::{
    ClickatellClient, Credentials, MessageText, OutboundMessage, RecipientList, SenderNumber,
};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::new(
        required("CLICKATELL_USER")?,
        required("CLICKATELL_PASSWORD")?,
        required("CLICKATELL_API_ID")?,
    )?;
    let to = RecipientList::sanitize(required("CLICKATELL_TO")?)?;
    let from = SenderNumber::new(required("CLICKATELL_FROM")?)?;
    let text = MessageText::new(
        std::env::var("CLICKATELL_MESSAGE")
            .unwrap_or_else(|_| "Hello from the clickatell-connect demo.".to_owned()),
    )?;

    let client = ClickatellClient::new();
    let session = client.authenticate(&credentials).await?;
    let receipt = client
        .send_message(&session, &OutboundMessage::new(to, from, text))
        .await?;
    println!("message ids: {:?}", receipt.message_ids().collect::<Vec<_>>());

    Ok(())
}
