//! Handler for the `watch` command.
//!
//! Loads a section, renders it, then re-renders as filter commands arrive
//! on stdin, one per line:
//!
//! ```text
//! search <text>      free text (debounced)
//! status <value>     note status or reminder status, `all` to reset
//! category <id|all>  notes only
//! store <id|all>     notes only
//! note <id|all>      reminders only
//! clear              reset every filter
//! quit
//! ```

use super::render::{NotesTable, RemindersTable};
use crate::app::{AppContext, Section};
use crate::gateway::NoteStatus;
use crate::services::controller::{FilterBinding, NoteSelector, ReminderSelector};
use crate::services::filters::{parse_choice, IdSelector, ReminderStatusFilter};
use crate::services::{FilterController, FilterInput, NotesBinding, RemindersBinding};
use clap::ValueEnum;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchTarget {
    Notes,
    Reminders,
}

/// A parsed stdin line
#[derive(Debug, Clone, PartialEq)]
pub enum WatchLine<S> {
    Filter(FilterInput<S>),
    Quit,
    Skip,
}

fn split(line: &str) -> (String, String) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim().to_string()),
        None => (line.to_lowercase(), String::new()),
    }
}

/// Commands shared by every target, or `None` to try target-specific ones
fn common<S>(cmd: &str, arg: &str) -> Option<WatchLine<S>> {
    match cmd {
        "" => Some(WatchLine::Skip),
        "search" | "/" => Some(WatchLine::Filter(FilterInput::Search(arg.to_string()))),
        "clear" => Some(WatchLine::Filter(FilterInput::Clear)),
        "quit" | "exit" | "q" => Some(WatchLine::Quit),
        _ => None,
    }
}

pub fn parse_notes_line(line: &str) -> Result<WatchLine<NoteSelector>, String> {
    let (cmd, arg) = split(line);
    if let Some(parsed) = common(&cmd, &arg) {
        return Ok(parsed);
    }

    let selector = match cmd.as_str() {
        "status" => NoteSelector::Status(parse_choice::<NoteStatus>(&arg)?),
        "category" => NoteSelector::Category(IdSelector::from_input(&arg)),
        "store" => NoteSelector::Store(IdSelector::from_input(&arg)),
        other => return Err(format!("Unknown command '{}'", other)),
    };
    Ok(WatchLine::Filter(FilterInput::Select(selector)))
}

pub fn parse_reminders_line(line: &str) -> Result<WatchLine<ReminderSelector>, String> {
    let (cmd, arg) = split(line);
    if let Some(parsed) = common(&cmd, &arg) {
        return Ok(parsed);
    }

    let selector = match cmd.as_str() {
        "status" => ReminderSelector::Status(arg.parse::<ReminderStatusFilter>()?),
        "note" => ReminderSelector::Note(IdSelector::from_input(&arg)),
        other => return Err(format!("Unknown command '{}'", other)),
    };
    Ok(WatchLine::Filter(FilterInput::Select(selector)))
}

pub async fn execute(ctx: &AppContext, target: WatchTarget) -> anyhow::Result<()> {
    match target {
        WatchTarget::Notes => {
            ctx.load_section(Section::Notes).await?;
            let binding = NotesBinding::new(ctx.clone(), NotesTable);
            drive(binding, parse_notes_line).await
        }
        WatchTarget::Reminders => {
            ctx.load_section(Section::Reminders).await?;
            let binding = RemindersBinding::new(ctx.clone(), RemindersTable);
            drive(binding, parse_reminders_line).await
        }
    }
}

async fn drive<B>(
    binding: B,
    parse: fn(&str) -> Result<WatchLine<B::Selector>, String>,
) -> anyhow::Result<()>
where
    B: FilterBinding + 'static,
{
    let mut controller = FilterController::new(binding);
    controller.render().await;

    let (tx, rx) = mpsc::channel(32);
    let running = tokio::spawn(controller.run(rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse(&line) {
            Ok(WatchLine::Filter(input)) => {
                if tx.send(input).await.is_err() {
                    break;
                }
            }
            Ok(WatchLine::Quit) => break,
            Ok(WatchLine::Skip) => {}
            Err(e) => eprintln!("{e}"),
        }
    }

    drop(tx);
    running.await?;
    tracing::info!("Watch finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_lines() {
        assert_eq!(
            parse_notes_line("search  Loja nova ").unwrap(),
            WatchLine::Filter(FilterInput::Search("Loja nova".to_string()))
        );
        assert_eq!(
            parse_notes_line("search").unwrap(),
            WatchLine::Filter(FilterInput::Search(String::new()))
        );
        assert_eq!(
            parse_notes_line("STATUS concluido").unwrap(),
            WatchLine::Filter(FilterInput::Select(NoteSelector::Status(Some(NoteStatus::Done))))
        );
        assert_eq!(
            parse_notes_line("store all").unwrap(),
            WatchLine::Filter(FilterInput::Select(NoteSelector::Store(IdSelector::all())))
        );
        assert_eq!(parse_notes_line("   ").unwrap(), WatchLine::Skip);
        assert_eq!(parse_notes_line("quit").unwrap(), WatchLine::Quit);
        assert!(parse_notes_line("note 3").is_err());
        assert!(parse_notes_line("status arquivada").is_err());
    }

    #[test]
    fn test_reminders_lines() {
        assert_eq!(
            parse_reminders_line("status atrasado").unwrap(),
            WatchLine::Filter(FilterInput::Select(ReminderSelector::Status(
                ReminderStatusFilter::Overdue
            )))
        );
        assert_eq!(
            parse_reminders_line("note 12").unwrap(),
            WatchLine::Filter(FilterInput::Select(ReminderSelector::Note(IdSelector::from(12))))
        );
        assert_eq!(
            parse_reminders_line("clear").unwrap(),
            WatchLine::Filter(FilterInput::Clear)
        );
        assert!(parse_reminders_line("category 1").is_err());
    }
}
