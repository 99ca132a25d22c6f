//! Terminal front-end for the chat widget.
//!
//! Usage: `chat [endpoint]` (default `http://localhost:3000/chat`).
//! Type a message and press enter; `/close` and `/open` toggle the widget,
//! `/quit` exits.

use nitsat_backend::services::{
    transcript::MessageRole,
    widget::{ChatWidget, HttpChatTransport},
};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_ENDPOINT: &str = "http://localhost:3000/chat";

fn print_last(widget: &ChatWidget) {
    if let Some(message) = widget.transcript().last() {
        let who = match message.role {
            MessageRole::User => "you",
            MessageRole::Assistant => "assistant",
        };
        println!("{who}> {}", message.content);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let transport = HttpChatTransport::new(endpoint);

    let mut widget = ChatWidget::default();
    widget.open();
    print_last(&widget);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim().to_string();
        match command.as_str() {
            "/quit" => break,
            "/close" => {
                widget.close();
                println!("(closed)");
            }
            "/open" => {
                widget.open();
                print_last(&widget);
            }
            _ if !widget.is_open() => println!("(closed, type /open)"),
            _ => {
                widget.set_input(line);
                println!("(typing...)");
                widget.send(&transport).await;
                print_last(&widget);
            }
        }
    }
    Ok(())
}
