//! Standalone client binary for a Gesedels server
//!
//! Provides a command-line interface for reading and writing pairs

use clap::Parser;
use gesedels::Client;
use std::io::{self, Write};

/// Interactive client for a Gesedels server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address of the server to connect to
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    println!("Connecting to Gesedels server at {}...", cli.addr);
    let client = Client::new(&cli.addr)?;
    println!("{}", client.index().await?);
    println!("Connected! Type 'help' for available commands or 'quit' to exit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input {
            "quit" | "exit" => {
                println!("Goodbye!");
                break;
            }
            "help" => {
                print_help();
            }
            _ => {
                if let Err(e) = handle_command(&client, input).await {
                    println!("Error: {}", e);
                }
            }
        }
    }

    Ok(())
}

async fn handle_command(client: &Client, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (parts, rest) = split_fields(input, 3);

    match parts[0] {
        "set" => {
            if parts.len() < 3 {
                println!("Usage: set <user> <name> <value>");
                return Ok(());
            }

            client.set(parts[1], parts[2], rest).await?;
            println!("OK");
        }
        "get" => {
            if parts.len() != 3 || !rest.is_empty() {
                println!("Usage: get <user> <name>");
                return Ok(());
            }

            match client.get(parts[1], parts[2]).await? {
                Some(value) => println!("{}", value),
                None => println!("(nil)"),
            }
        }
        "delete" | "del" => {
            if parts.len() != 3 || !rest.is_empty() {
                println!("Usage: delete <user> <name>");
                return Ok(());
            }

            client.delete(parts[1], parts[2]).await?;
            println!("OK");
        }
        _ => {
            println!("Unknown command: {}. Type 'help' for available commands.", parts[0]);
        }
    }

    Ok(())
}

/// Split off up to `count` whitespace-separated fields, returning them and the
/// remainder of the line with its leading whitespace removed.
fn split_fields(input: &str, count: usize) -> (Vec<&str>, &str) {
    let mut fields = Vec::with_capacity(count);
    let mut rest = input.trim_start();

    while fields.len() < count && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    (fields, rest)
}

fn print_help() {
    println!("Available commands:");
    println!("  set <user> <name> <value>  - Set the value of a pair");
    println!("  get <user> <name>          - Get the value of a pair");
    println!("  delete <user> <name>       - Delete a pair");
    println!("  help                       - Show this help message");
    println!("  quit                       - Exit the client");
}
