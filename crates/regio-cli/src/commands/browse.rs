//! Interactive drill-down over the region hierarchy.

use std::fmt::Write as _;
use std::sync::Arc;

use regio_core::LevelView;
use regio_db::RegionDb;
use regio_remote::RemoteClient;
use regio_resolve::{NavEvent, Navigator, Step};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

type RegionNavigator = Navigator<RegionDb, RemoteClient>;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    /// Zero-based index into the current listing.
    Select(usize),
    Back,
    Retry,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line.trim().to_ascii_lowercase().as_str() {
        "b" | "back" => Input::Back,
        "r" | "retry" => Input::Retry,
        "q" | "quit" | "exit" => Input::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Select(n - 1),
            _ => Input::Unknown,
        },
    }
}

fn render_view(view: &LevelView) -> String {
    let mut out = format!("== {} ==\n", view.title);
    for (index, item) in view.items.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {item}", index + 1);
    }
    if view.show_back {
        out.push_str("  [b] back\n");
    }
    out.push_str("  [q] quit");
    out
}

/// Wait for the pending action and report it. Returns `false` if the load failed.
async fn settle(nav: &mut RegionNavigator) -> bool {
    let progress = Progress::spinner("Loading...");
    match nav.next_event().await {
        Some(NavEvent::Updated(view)) => {
            progress.finish_clear();
            println!("{}", render_view(&view));
            true
        }
        Some(NavEvent::LoadFailed(error)) => {
            progress.finish_err(error.user_message());
            println!("{} ([r] retry)", error.user_message());
            false
        }
        None => {
            progress.finish_clear();
            true
        }
    }
}

/// Handle `regio browse`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut nav = Navigator::new(Arc::clone(&ctx.resolver), ctx.root_title());
    nav.refresh();
    settle(&mut nav).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Quit => break,
            Input::Back => {
                if nav.back().is_some() {
                    settle(&mut nav).await;
                } else {
                    println!("already at the top level");
                }
            }
            Input::Retry => {
                nav.refresh();
                settle(&mut nav).await;
            }
            Input::Select(index) => match nav.select(index) {
                Ok(Step::Loading(_)) => {
                    settle(&mut nav).await;
                }
                Ok(Step::Picked(county)) => return output(&county, flags.format),
                Err(error) => println!("{error}"),
            },
            Input::Unknown => println!("enter a number, b, r or q"),
        }
    }
    Ok(())
}
