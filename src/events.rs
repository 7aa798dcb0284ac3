//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    input::action_for_key,
    types::{MainMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events for at most `--frame-ms` milliseconds and dispatches
/// key presses to [`handle_key`]. Returning without an event lets the caller draw the next frame,
/// so the view keeps refreshing while no key is held.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(app.config.frame_ms))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key)?;
            }
        }
    }

    Ok(())
}

/// Dispatches one key press based on the current screen.
///
/// # Errors
///
/// This function returns an error if selecting "Generate Maze" fails to build a maze.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => handle_menu_key(app, item, key.code)?,
        Screen::InGame => handle_game_key(app, key),
    }

    Ok(())
}

/// Handles menu navigation with `j`/`k`, selection with `l` and quitting with `q`.
fn handle_menu_key(app: &mut App, item: MainMenuItem, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::MainMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::MainMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            MainMenuItem::GenerateMaze => app.start_maze()?,
            MainMenuItem::Arena => app.start_arena(),
            MainMenuItem::Quit => app.exit = true,
        },
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        _ => {}
    }

    Ok(())
}

/// Handles in-game keys; `Esc` goes back to the menu and the rest map to player actions.
fn handle_game_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.leave_game();
        return;
    }

    let Some(action) = action_for_key(key) else {
        return;
    };

    if let Some(session) = app.session.as_mut() {
        if session.apply(action) {
            app.exit = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;
    use crate::config::Config;

    /// Builds a plain key press.
    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Builds an app with a fixed seed and small mazes.
    fn app() -> App {
        let config = Config {
            seed: Some(3),
            width: 9,
            height: 9,
            ..Config::default()
        };

        App::new(config).expect("config should be valid")
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = app();

        handle_key(&mut app, press(KeyCode::Char('j'))).expect("navigation should not fail");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Arena));

        handle_key(&mut app, press(KeyCode::Down)).expect("navigation should not fail");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        handle_key(&mut app, press(KeyCode::Char('k'))).expect("navigation should not fail");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Arena));
    }

    #[test]
    fn test_menu_select_generate() {
        let mut app = app();

        handle_key(&mut app, press(KeyCode::Char('l'))).expect("maze should generate");

        assert_eq!(app.screen, Screen::InGame);
        let session = app.session.as_ref().expect("session should exist");
        assert_eq!(session.map().width(), 9);
    }

    #[test]
    fn test_menu_select_quit() {
        let mut app = app();
        app.screen = Screen::MainMenu(MainMenuItem::Quit);

        handle_key(&mut app, press(KeyCode::Enter)).expect("quit should not fail");

        assert!(app.exit, "selecting quit should exit");
    }

    #[test]
    fn test_menu_q_quits() {
        let mut app = app();

        handle_key(&mut app, press(KeyCode::Char('q'))).expect("quit should not fail");

        assert!(app.exit, "q in the menu should exit");
    }

    #[test]
    fn test_game_keys_move_viewer() {
        let mut app = app();
        app.start_arena();

        handle_key(&mut app, press(KeyCode::Char('w'))).expect("movement should not fail");

        let pose = app.session.as_ref().expect("session should exist").pose();
        assert!((pose.x - 8.5).abs() < 1e-12, "w should step forward");
        assert!(!app.exit);
    }

    #[test]
    fn test_game_escape_returns_to_menu() {
        let mut app = app();
        app.start_arena();

        handle_key(&mut app, press(KeyCode::Esc)).expect("escape should not fail");

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::GenerateMaze));
        assert!(app.session.is_none(), "escape drops the session");
        assert!(!app.exit, "escape should not exit the program");
    }

    #[test]
    fn test_game_q_quits() {
        let mut app = app();
        app.start_arena();

        handle_key(&mut app, press(KeyCode::Char('q'))).expect("quit should not fail");

        assert!(app.exit, "q in game should exit");
    }

    #[test]
    fn test_game_ignores_unmapped_keys() {
        let mut app = app();
        app.start_arena();
        let before = *app.session.as_ref().expect("session should exist").pose();

        handle_key(&mut app, press(KeyCode::Char('z'))).expect("unmapped key should not fail");

        let after = *app.session.as_ref().expect("session should exist").pose();
        assert_eq!(before, after, "unmapped keys leave the pose alone");
    }
}
