use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::{ChatSession, Message, ProxyClient, Role, SubmitOutcome};
use crate::utils::create_spinner;
use colored::Colorize;
use std::error::Error;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

const CMD_IMAGE: &str = "/image";
const CMD_CLEAR: &str = "/clear";
const CMD_QUIT: &str = "/quit";

#[derive(Debug, PartialEq)]
pub enum Input<'a> {
    Image(&'a str),
    /// `/image` without a path.
    MissingPath,
    Clear,
    Quit,
    Text(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((CMD_IMAGE, path)) => Input::Image(path.trim()),
        _ if line == CMD_IMAGE => Input::MissingPath,
        _ if line == CMD_CLEAR => Input::Clear,
        _ if line == CMD_QUIT => Input::Quit,
        _ => Input::Text(line),
    }
}

pub fn render_message(message: &Message) -> String {
    let label = match message.role {
        Role::User => "you".bold().green(),
        Role::Assistant => "assistant".bold().magenta(),
    };
    match message.role {
        Role::User if message.image_url.is_some() => {
            format!("{} {} {}", label, "[image]".dimmed(), message.text)
        }
        _ => format!("{} {}", label, message.text),
    }
}

fn print_transcript_updates(session: &mut ChatSession) {
    for message in session.take_unrendered() {
        println!("{}", render_message(message));
    }
    if let Some(error) = session.error() {
        eprintln!("{} {}", "error".bold().red(), error);
    }
}

async fn submit_with_spinner(session: &mut ChatSession, backend: &ProxyClient) -> SubmitOutcome {
    let spinner = create_spinner("magenta", "Asking the vision model...".to_string());
    let outcome = session.submit(backend).await;
    spinner.finish_and_clear();
    outcome
}

/// Selects `image_path`, asks one question and prints the exchange.
pub async fn run_ask(
    config: &ClientConfig,
    image_path: &str,
    question: &str,
) -> Result<(), Box<dyn Error>> {
    let backend = ProxyClient::new(config);
    let mut session = ChatSession::new();

    if let Err(e) = session.select_image(image_path).await {
        print_transcript_updates(&mut session);
        return Err(e.into());
    }
    session.input = question.to_string();

    let outcome = submit_with_spinner(&mut session, &backend).await;
    print_transcript_updates(&mut session);
    match outcome {
        SubmitOutcome::Answered => Ok(()),
        _ => Err(ClientError::Proxy(session.error().unwrap_or_default().to_string()).into()),
    }
}

pub async fn run_chat(config: &ClientConfig) -> Result<(), Box<dyn Error>> {
    let backend = ProxyClient::new(config);
    let mut session = ChatSession::new();
    log::info!("Chatting through {}", backend.endpoint());

    println!(
        "Type a message, {} <path> to attach an image, {} to drop it, {} to exit.",
        CMD_IMAGE.cyan(),
        CMD_CLEAR.cyan(),
        CMD_QUIT.cyan()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let prompt = match session.attachment() {
            Some(attachment) => format!("[{}] > ", attachment.path.display()),
            None => "> ".to_string(),
        };
        print!("{}", prompt.bold());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_input(&line) {
            Input::Quit => break,
            Input::Clear => session.clear_attachment(),
            Input::MissingPath => {
                eprintln!("{} usage: {} <path>", "error".bold().red(), CMD_IMAGE);
                continue;
            }
            Input::Image(path) => {
                if session.select_image(path).await.is_ok() {
                    if let Some(attachment) = session.attachment() {
                        println!(
                            "{} {} ({}, {} bytes)",
                            "attached".cyan(),
                            path,
                            attachment.mime_type,
                            attachment.size
                        );
                    }
                }
            }
            Input::Text(text) => {
                session.input = text.to_string();
                submit_with_spinner(&mut session, &backend).await;
            }
        }
        print_transcript_updates(&mut session);
    }
    Ok(())
}
