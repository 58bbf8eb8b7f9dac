//! Line-mode front end.
//!
//! Reads one command per line from stdin and prints the resulting page.

use crate::actions::{self, Flow};
use crate::commands::parse_command;
use crate::render;
use anyhow::Result;
use car_store::{AlertKind, AppState, Storefront, view};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

pub const HELP: &str = "\
Pages:      catalog | garage | add | favorites | login | edit CAR_ID
Session:    login USERNAME PASSWORD | register USERNAME EMAIL PASSWORD | logout
Catalog:    filter make=.. body=.. fuel=.. trans=.. min=.. max=.. | reset | refresh
Garage:     garage add CAR_ID | garage remove CAR_ID
Favorites:  fav CAR_ID
Reviews:    reviews CAR_ID | reviews close | review RATING COMMENT
            review edit ID | review save RATING COMMENT | review cancel | review delete ID
Cars:       set FIELD VALUE | submit | delete CAR_ID
Other:      help | quit
";

/// Run the line-mode loop until `quit` or end of input
pub async fn run(storefront: Storefront) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_state(&storefront.snapshot().await);
    print_alerts(&storefront).await;

    loop {
        prompt("> ").await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let mut command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if let Some(question) = command.confirmation() {
            if !confirm(&mut lines, question).await? {
                println!("Cancelled");
                continue;
            }
            command = command.confirmed();
        }

        // Failures were already alerted by the storefront
        match actions::execute(&storefront, command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::ShowHelp) => {
                print!("{HELP}");
                continue;
            }
            Ok(Flow::Continue) | Err(_) => {}
        }

        print_state(&storefront.snapshot().await);
        print_alerts(&storefront).await;
    }

    Ok(())
}

async fn prompt(text: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

async fn confirm(lines: &mut Lines<BufReader<Stdin>>, question: &str) -> Result<bool> {
    prompt(&format!("{question} [y/N] ")).await?;
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_state(state: &AppState) {
    println!("{}", render::nav_line(&view::render_nav(state)));
    for line in render::page_lines(state) {
        println!("{line}");
    }
    for line in render::reviews_lines(&view::render_reviews(state)) {
        println!("{line}");
    }
}

async fn print_alerts(storefront: &Storefront) {
    for alert in storefront.take_alerts().await {
        match alert.kind {
            AlertKind::Info => println!("* {}", alert.message),
            AlertKind::Error => eprintln!("! {}", alert.message),
        }
    }
}
