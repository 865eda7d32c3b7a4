use {
    crate::state::{DashboardAction, DashboardState},
    crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::time::Duration,
};

/// Idle wait between redraws when no key arrives
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the TUI event loop
///
/// Blocks until the user quits. Range and grouping keys are applied to
/// `state`, which recomputes its summaries before the next draw.
pub fn run_ui(state: &mut DashboardState) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen keeps stderr logs out of the dashboard buffer
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, state);

    // Restore the terminal even when the loop failed
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut DashboardState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| {
            let area = f.size();
            crate::ui::layout::render_layout(f, area, &*state);
        })?;

        if !crossterm::event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = crossterm::event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key_action(&key) {
                KeyOutcome::Quit => break,
                KeyOutcome::Action(action) => {
                    state.apply(action);
                }
                KeyOutcome::Ignored => {}
            }
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Quit,
    Action(DashboardAction),
    Ignored,
}

fn key_action(key: &KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Char('[') => KeyOutcome::Action(DashboardAction::ShiftStart(-1)),
        KeyCode::Char(']') => KeyOutcome::Action(DashboardAction::ShiftStart(1)),
        KeyCode::Char('{') => KeyOutcome::Action(DashboardAction::ShiftEnd(-1)),
        KeyCode::Char('}') => KeyOutcome::Action(DashboardAction::ShiftEnd(1)),
        KeyCode::Char('r') => KeyOutcome::Action(DashboardAction::ResetRange),
        KeyCode::Char('g') => KeyOutcome::Action(DashboardAction::ToggleGrouping),
        _ => KeyOutcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_action(&press(KeyCode::Esc)), KeyOutcome::Quit);
        assert_eq!(key_action(&press(KeyCode::Char('q'))), KeyOutcome::Quit);
        assert_eq!(
            key_action(&press(KeyCode::Char(']'))),
            KeyOutcome::Action(DashboardAction::ShiftStart(1))
        );
        assert_eq!(
            key_action(&press(KeyCode::Char('{'))),
            KeyOutcome::Action(DashboardAction::ShiftEnd(-1))
        );
        assert_eq!(
            key_action(&press(KeyCode::Char('g'))),
            KeyOutcome::Action(DashboardAction::ToggleGrouping)
        );
        assert_eq!(key_action(&press(KeyCode::Char('x'))), KeyOutcome::Ignored);
    }
}
