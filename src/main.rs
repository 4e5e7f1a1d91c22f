mod config;
mod constants;
mod error;
mod print_help;
mod proxy;
mod repl;
mod session;
mod utils;
mod vision;

use crate::config::{ClientConfig, ProxyConfig};
use crate::constants::{CMD_ASK, CMD_CHAT, CMD_SERVE, DEFAULT_VISION_QUESTION};
use crate::print_help::print_help;
use std::{env, error::Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|arg| arg == "-help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        CMD_SERVE => {
            let config = ProxyConfig::from_env()?;
            proxy::serve(config).await?;
        }
        CMD_CHAT => repl::run_chat(&ClientConfig::from_env()).await?,
        CMD_ASK if args.len() > 2 => {
            let question = if args.len() > 3 {
                args[3..].join(" ")
            } else {
                DEFAULT_VISION_QUESTION.to_string()
            };
            repl::run_ask(&ClientConfig::from_env(), &args[2], &question).await?
        }
        _ => print_help(),
    }

    Ok(())
}
