// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Keksipurkki CLI - HTTP client with a proper cookie jar
//!
//! Example usage and demonstration of the keksipurkki library.

use std::env;
use std::process::ExitCode;

use keksipurkki::HttpClient;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keksipurkki=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: keksipurkki fetch <url>");
                return ExitCode::from(1);
            }
            fetch_url(&args[2]).await
        }
        "download" => {
            if args.len() < 4 {
                eprintln!("Usage: keksipurkki download <url> <dir>");
                return ExitCode::from(1);
            }
            download_url(&args[2], &args[3]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("keksipurkki {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Keksipurkki - HTTP Client with a Proper Cookie Jar

USAGE:
    keksipurkki <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url>            Fetch a URL and display response information
    download <url> <dir>   Download a URL into a directory
    help                   Show this help message
    version                Show version information

EXAMPLES:
    keksipurkki fetch https://example.com
    keksipurkki download https://example.com/report.pdf /tmp

For more information, see: https://github.com/bountyyfi/keksipurkki
"#
    );
}

async fn fetch_url(url: &str) -> ExitCode {
    println!("Fetching: {}", url);

    let client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            return ExitCode::from(1);
        }
    };

    match client.get(url).await {
        Ok(response) => {
            println!("\n=== Response ===");
            println!("Status: {}", response.status);
            println!("URL: {}", response.url);
            println!("Content-Type: {:?}", response.content_type());
            println!("Size: {} bytes", response.body_len());
            println!("Time: {}ms", response.response_time_ms);
            if response.redirected {
                println!("Redirected: yes");
            }

            let jar = client.cookie_jar();
            if !jar.is_empty() {
                println!("\n=== Cookies ({}) ===", jar.len());
                if let Some(header) = jar.cookie_header(&response.url) {
                    println!("Would send: {}", header);
                }
            }

            let text = response.text_lossy();
            let excerpt: String = text.chars().take(400).collect();
            if !excerpt.is_empty() {
                println!("\n=== Body ===");
                println!("{}", excerpt);
                if text.len() > excerpt.len() {
                    println!("... ({} bytes total)", response.body_len());
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to fetch URL: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn download_url(url: &str, dir: &str) -> ExitCode {
    println!("Downloading: {}", url);

    let client = match HttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            return ExitCode::from(1);
        }
    };

    let response = match client.get(url).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to fetch URL: {}", e);
            return ExitCode::from(1);
        }
    };

    match response.save_to_file(dir, None).await {
        Ok(path) => {
            println!("Saved {} bytes to {}", response.body_len(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Download failed: {}", e);
            ExitCode::from(1)
        }
    }
}
