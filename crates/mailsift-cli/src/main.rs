mod state;

use anyhow::Context;
use mailsift_core::EmailIdent;
use mailsift_render::{render_email_detail, render_reasoning, render_theme_cards};
use mailsift_search::SearchPhase;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

const USAGE: &str = "\
mailsift <command>

  search <query>        run a relevance search and print the first page
  email <id|index>      fetch one email and print its detail fragment
  themes <query>        search, then run theme analysis over the visible page
  ask <theme> <text>    one-shot deep-analysis question over one theme
  metrics               print dashboard counters
  todos                 list pending actions
  config                print config path and backend URL
";

/// A 64-char lowercase hex argument is a message id; anything else is
/// treated as a result-table index.
fn parse_ident(arg: &str) -> EmailIdent {
    if arg.len() == 64 && arg.chars().all(|ch| ch.is_ascii_hexdigit()) {
        EmailIdent::from_parts(None, arg)
    } else {
        EmailIdent::from_parts(Some(arg), "")
    }
}

async fn run_search(state: &mut AppState, query: &str) -> anyhow::Result<()> {
    let view = state
        .search
        .submit(query)
        .await
        .map_err(anyhow::Error::msg)?;
    if let Some(banner) = &view.banner {
        println!("{banner}");
    }
    for hit in &view.rows {
        println!(
            "{:>6}  {}  {:<28}  {}  ({:.0})",
            hit.ident().as_str(),
            hit.date,
            hit.from,
            hit.subject,
            hit.relevance,
        );
    }
    if view.page.visible() {
        println!(
            "página {} de {} ({} correos)",
            view.page.page,
            view.page.total_pages(),
            view.page.total
        );
    }
    Ok(())
}

async fn run(state: &mut AppState, args: &[String]) -> anyhow::Result<()> {
    match args {
        [command, query] if command == "search" => run_search(state, query).await,
        [command, id] if command == "email" => {
            let detail = state
                .search
                .open_detail(&parse_ident(id))
                .await
                .map_err(anyhow::Error::msg)?
                .context("request debounced, retry")?;
            println!("{}", render_email_detail(&detail));
            Ok(())
        }
        [command, query] if command == "themes" => {
            let view = state
                .search
                .submit(query)
                .await
                .map_err(anyhow::Error::msg)?;
            if view.phase != SearchPhase::Results {
                anyhow::bail!("sin resultados para analizar");
            }
            let ids: Vec<String> = view
                .rows
                .iter()
                .map(|hit| hit.ident().as_str().to_string())
                .collect();
            let cards = state.themes.analyze(&ids).await?;
            println!("{}", render_theme_cards(&cards));
            Ok(())
        }
        [command, theme_id, question] if command == "ask" => {
            state.deep.init(&[theme_id.clone()]).await?;
            let view = state.deep.prompt(question).await?;
            println!("{}", view.answer.response);
            if !view.answer.reasoning.is_empty() {
                println!("---");
                println!("{}", render_reasoning(&view.answer.reasoning));
            }
            state.deep.reset().await?;
            Ok(())
        }
        [command] if command == "config" => {
            println!("config:  {}", state.config_manager.config_path().display());
            println!("backend: {}", state.config.backend.base_url);
            Ok(())
        }
        [command] if command == "metrics" => {
            let metrics = state
                .dashboard
                .refresh()
                .await?
                .context("metrics request debounced")?;
            println!("correos:   {}", metrics.total_emails);
            println!("buzones:   {}", metrics.total_mailboxes);
            println!("pendientes: {}", metrics.todos_pending);
            println!("hechas:    {}", metrics.todos_done);
            Ok(())
        }
        [command] if command == "todos" => {
            for todo in state.todos.load().await? {
                let mark = if todo.done { "x" } else { " " };
                println!("[{mark}] {}  {}", todo.id, todo.title);
            }
            Ok(())
        }
        _ => {
            eprint!("{USAGE}");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut state = AppState::initialize()?;
    run(&mut state, &args).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_argument_is_a_message_id() {
        let id = "0f70bb9efc1f4a02e28f8d96dd19751d49fdc2b3aa67b3e8aebf46d0acbc9e51";
        assert_eq!(parse_ident(id).as_str(), id);
        assert!(matches!(parse_ident(id), EmailIdent::MessageId(_)));
    }

    #[test]
    fn other_arguments_are_indices() {
        assert!(matches!(parse_ident("12"), EmailIdent::Index(_)));
    }
}
