use std::io::Write;
use std::time::Instant;

use log::error;

mod api;
mod config;
mod controller;
mod models;
mod notify;
mod page;
mod render;
mod sanitize;


use api::{HttpApi, UploadForm};
use config::Config;
use controller::{Event, PageController};

fn main() {
    env_logger::init();

    let cfg = Config::from_env();
    let api = match HttpApi::new(cfg.base_url.clone(), cfg.http_timeout) {
        Ok(a) => a,
        Err(e) => {
            error!("Cannot build HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cmd = args.first().map(String::as_str).unwrap_or("list");

    // Raw file fetch needs no page state; handle it before the
    // controller takes ownership of the client.
    if cmd == "download" {
        match (args.get(1).and_then(|s| s.parse::<i64>().ok()), args.get(2)) {
            (Some(id), Some(filename)) => {
                use api::PortfolioApi;
                match api.download(id, filename) {
                    Ok(bytes) => match std::fs::write(filename, &bytes) {
                        Ok(_) => println!("Saved {} ({} bytes)", filename, bytes.len()),
                        Err(e) => {
                            error!("Cannot write {}: {}", filename, e);
                            std::process::exit(1);
                        }
                    },
                    Err(e) => {
                        error!("Download failed: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }
            _ => usage(),
        }
    }

    let mut ctl = PageController::new(cfg, Box::new(api));

    match cmd {
        "list" => {
            let query = args.get(1).cloned().unwrap_or_default();
            ctl.handle(Event::SearchSubmitted { query });
            // Let the entrance cascade finish before printing.
            ctl.tick(Instant::now() + std::time::Duration::from_secs(60));
            println!("{}", ctl.render_page());
        }
        "like" => match args.get(1).and_then(|s| s.parse::<i64>().ok()) {
            Some(id) => {
                ctl.handle(Event::PageLoad);
                ctl.handle(Event::LikeClicked { id });
                ctl.tick(Instant::now() + std::time::Duration::from_secs(60));
                println!("{}", ctl.render_page());
            }
            None => usage(),
        },
        "delete" => match args.get(1).and_then(|s| s.parse::<i64>().ok()) {
            Some(id) => {
                ctl.handle(Event::PageLoad);
                let confirmed = confirm(&format!(
                    "Are you sure you want to delete portfolio {}? This cannot be undone.",
                    id
                ));
                ctl.handle(Event::DeleteClicked { id, confirmed });
                ctl.tick(Instant::now() + std::time::Duration::from_secs(60));
                println!("{}", ctl.render_page());
            }
            None => usage(),
        },
        "upload" => {
            // title category [description] read from the command line;
            // files are attached by path.
            let mut form = UploadForm {
                portfolio_title: args.get(1).cloned().unwrap_or_default(),
                category: args.get(2).cloned().unwrap_or_default(),
                description: args.get(3).cloned().unwrap_or_default(),
                ..UploadForm::default()
            };
            for path in args.iter().skip(4) {
                match std::fs::read(path) {
                    Ok(bytes) => {
                        let name = std::path::Path::new(path)
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.clone());
                        form.files.push((name, bytes));
                    }
                    Err(e) => {
                        error!("Cannot read {}: {}", path, e);
                        std::process::exit(1);
                    }
                }
            }
            ctl.handle(Event::FilesChosen { count: form.files.len() });
            ctl.handle(Event::UploadSubmitted { form });
            if let Some(to) = ctl.tick(Instant::now() + std::time::Duration::from_secs(60)) {
                eprintln!("Redirecting to {}", to);
            }
            println!("{}", ctl.render_page());
        }
        _ => usage(),
    }
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn usage() {
    eprintln!("Usage: folioview [list [query] | like <id> | delete <id> | upload <title> <category> [description] [file...] | download <id> <filename>]");
    std::process::exit(2);
}
