//! Terminal driver for the dashboard.
//!
//! Single-threaded cooperative loop: render the current page, read one
//! command, update the session, render again. Chart PNGs land in the
//! configured chart directory and are referenced from the page text.

use anyhow::{Context, Result};
use domus::artifact::ArtifactStore;
use domus::config::Config;
use domus::form::{self, FieldDescriptor};
use domus::inference::PredictionRequest;
use domus::journal::Journal;
use domus::render::{self, ViewState};
use domus::session::{Page, Session};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() -> Result<()> {
    let config = Config::from_env();
    let mut journal = Journal::open(&config.journal_path);

    let store = ArtifactStore::open(&config)
        .context("failed to load the model and pipeline artifacts")?;
    journal.log("startup", json!({ "dataset": config.dataset_path }));
    if let Some(err) = store.dataset_error() {
        journal.log("dataset_degraded", json!({ "error": err.to_string() }));
    }

    let mut session = Session::new();
    let mut state = ViewState::default();
    state.analysis.preview_rows = config.preview_rows;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Housing Price Dashboard");
    println!(
        "Commands: home | analysis | predict | performance | rows | echo | \
         plot <x> <y> | export <path> | quit"
    );

    loop {
        let page = render::render(&store, session.page(), &state, Path::new(&config.chart_dir));
        println!();
        println!("===== {} =====", page.title);
        print!("{}", page.body);
        print!("> ");
        io::stdout().flush().ok();

        let Some(Ok(line)) = lines.next() else { break };
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");

        match command {
            "" => {}
            "quit" | "exit" => break,
            "rows" => state.analysis.show_raw = !state.analysis.show_raw,
            "echo" => state.echo_submission = !state.echo_submission,
            "plot" => match (parts.next(), parts.next()) {
                (Some(x), Some(y)) => {
                    state.analysis.pair = Some((x.to_string(), y.to_string()));
                    session.set_page(Page::Analysis);
                    journal.log("plot", json!({ "x": x, "y": y }));
                }
                _ => println!("usage: plot <x> <y>"),
            },
            "export" => {
                let dest = parts.next().unwrap_or("description.txt");
                match render::home::export_description(&store, Path::new(dest)) {
                    Ok(path) => {
                        println!("description written to {}", path.display());
                        journal.log("export", json!({ "dest": path.display().to_string() }));
                    }
                    Err(message) => println!("[!] {}", message),
                }
            }
            _ => match Page::from_command(command) {
                Some(target) => {
                    // A second `predict` while already on the page walks
                    // the form and submits.
                    if target == Page::Prediction && session.page() == Page::Prediction {
                        let fields = form::field_descriptors(store.table());
                        if let Some(request) = fill_form(&fields, &mut lines) {
                            log_outcome(&mut journal, &store, &request);
                            state.submitted = Some(request);
                        }
                    }
                    session.set_page(target);
                    journal.log("page", json!({ "to": target.label() }));
                }
                None => println!("unknown command: {}", command),
            },
        }
    }

    journal.log("shutdown", json!({}));
    Ok(())
}

/// Walk the form one field at a time. Empty input takes the field default;
/// invalid input re-prompts; EOF abandons the submission.
fn fill_form(
    fields: &[FieldDescriptor],
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Option<PredictionRequest> {
    if fields.is_empty() {
        println!("[!] no dataset loaded; nothing to submit");
        return None;
    }

    let mut values = Vec::with_capacity(fields.len());
    for field in fields {
        loop {
            print!(
                "{} [{}] (default {}): ",
                field.name,
                field.domain_display(),
                field.default_value()
            );
            io::stdout().flush().ok();

            let line = match lines.next() {
                Some(Ok(line)) => line,
                _ => return None,
            };
            let input = line.trim();
            if input.is_empty() {
                values.push(field.default_value());
                break;
            }
            match field.parse(input) {
                Ok(value) => {
                    values.push(value);
                    break;
                }
                Err(err) => println!("[!] {}", err),
            }
        }
    }

    Some(form::build_request(fields, values))
}

fn log_outcome(journal: &mut Journal, store: &ArtifactStore, request: &PredictionRequest) {
    match store.pipeline().predict(request) {
        Ok(price) => journal.log("prediction", json!({ "outcome": "ok", "price": price })),
        Err(err) => journal.log(
            "prediction",
            json!({ "outcome": "error", "error": err.to_string() }),
        ),
    }
}
