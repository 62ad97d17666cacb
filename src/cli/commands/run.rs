//! Replay a session script against a fresh board

use std::cell::RefCell;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use log::{debug, info};

use kanban::adapters::TerminalSurface;
use kanban::board::{Board, SubmitOutcome};
use kanban::config::BoardConfig;
use kanban::output::{ColumnSpec, OutputMode, render_transition};
use kanban::session::{self, EventOutcome};

/// Replay every event in the script, printing what the board renders
pub fn run(config: &BoardConfig, script: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let source = match script {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            buf
        },
    };

    let events = session::parse_script(&source)?;
    debug!("parsed {} event(s)", events.len());

    let columns = ColumnSpec::from_config(&config.columns)?;
    let surface = Rc::new(RefCell::new(TerminalSurface::new(columns, mode)));
    let mut board = Board::from_config(config, surface)?;

    let mut created = 0;
    let mut rejected = 0;
    for event in &events {
        match session::apply(&mut board, event) {
            EventOutcome::Submitted(SubmitOutcome::Created(_)) => created += 1,
            EventOutcome::Submitted(SubmitOutcome::Rejected(_)) => rejected += 1,
            EventOutcome::Drag(transition) => render_transition(&transition, mode),
            EventOutcome::Shown => {},
        }
    }

    info!(
        "session done: {} event(s), {created} created, {rejected} rejected, {} on board",
        events.len(),
        board.store().len()
    );
    Ok(())
}
