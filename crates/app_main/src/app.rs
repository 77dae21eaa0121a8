//! Interactive shell driving the viewer session
//!
//! One command per line; the window title is printed after every change.

use anyhow::Result;
use app_core::{Command, CommandOutcome, IngestReport, ViewerSession, HELP};
use std::io::{BufRead, Write};

/// Run the shell until `quit` or end of input
pub fn run<R: BufRead, W: Write>(session: &mut ViewerSession, input: R, mut out: W) -> Result<()> {
    print_status(session, &mut out)?;
    writeln!(out, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        tracing::debug!("Command: {:?}", command);

        match session.execute(command) {
            Ok(CommandOutcome::Quit) => break,
            Ok(outcome) => print_outcome(session, &outcome, &mut out)?,
            Err(e) => {
                tracing::warn!("Command failed: {}", e);
                writeln!(out, "{}", e.user_message())?;
            }
        }
    }

    Ok(())
}

fn print_outcome<W: Write>(session: &ViewerSession, outcome: &CommandOutcome, out: &mut W) -> Result<()> {
    match outcome {
        CommandOutcome::Image(_) => print_status(session, out)?,
        CommandOutcome::Loaded(report) => {
            print_report(report, out)?;
            print_status(session, out)?;
        }
        CommandOutcome::Shuffle(enabled) => {
            writeln!(out, "Shuffle: {}", if *enabled { "on" } else { "off" })?;
            print_status(session, out)?;
        }
        CommandOutcome::List => {
            let images = session.images();
            let current = images.current_image();
            for (i, path) in images.image_files().iter().enumerate() {
                let marker = if Some(path.as_path()) == current { '>' } else { ' ' };
                writeln!(out, "{} {:>4} {}", marker, i + 1, path.display())?;
            }
        }
        CommandOutcome::History => {
            let history = &session.settings().directory_history;
            if history.is_empty() {
                writeln!(out, "No recent directories")?;
            }
            for (i, entry) in history.iter().enumerate() {
                let flag = if entry.include_subdirs { " (with subdirectories)" } else { "" };
                writeln!(out, "{:>2} {}{}", i + 1, entry.path, flag)?;
            }
        }
        CommandOutcome::Help => {
            for (usage, description) in HELP {
                writeln!(out, "  {:<22} {}", usage, description)?;
            }
        }
        CommandOutcome::Quit => {}
    }
    Ok(())
}

fn print_report<W: Write>(report: &IngestReport, out: &mut W) -> Result<()> {
    if report.rejected > 0 {
        writeln!(
            out,
            "Loaded {} images ({} skipped)",
            report.accepted, report.rejected
        )?;
    } else {
        writeln!(out, "Loaded {} images", report.accepted)?;
    }
    Ok(())
}

fn print_status<W: Write>(session: &ViewerSession, out: &mut W) -> Result<()> {
    match session.position() {
        Some((position, count)) => writeln!(out, "[{}/{}] {}", position, count, session.title())?,
        None => writeln!(out, "{}", session.title())?,
    }
    Ok(())
}
