//! Type definitions and enums for the application screens and menus.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and how to interpret key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu, holding the currently highlighted item.
    MainMenu(MainMenuItem),
    /// First-person view of the active session.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu, in the order they are listed on
/// screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Generate Maze" menu option.
    ///
    /// Generates a fresh maze from the next seed and starts playing it.
    GenerateMaze,
    /// "Arena" menu option.
    ///
    /// Plays the built-in arena, or the map file given on the command line.
    Arena,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Every item, in display order.
    pub(crate) const ALL: [Self; 3] = [Self::GenerateMaze, Self::Arena, Self::Quit];

    /// Returns the label shown for the item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::GenerateMaze => "Generate Maze",
            Self::Arena => "Arena",
            Self::Quit => "Quit",
        }
    }

    /// Returns the item below this one, stopping at the last.
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::GenerateMaze => Self::Arena,
            Self::Arena | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, stopping at the first.
    #[must_use]
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::GenerateMaze | Self::Arena => Self::GenerateMaze,
            Self::Quit => Self::Arena,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::GenerateMaze);
        let in_game = Screen::InGame;

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::GenerateMaze));
        assert_ne!(main_menu, in_game);
        assert_ne!(main_menu, Screen::MainMenu(MainMenuItem::Quit));
    }

    #[test]
    fn test_main_menu_navigation() {
        assert_eq!(MainMenuItem::GenerateMaze.next(), MainMenuItem::Arena);
        assert_eq!(MainMenuItem::Arena.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.next(), MainMenuItem::Quit);

        assert_eq!(MainMenuItem::Quit.previous(), MainMenuItem::Arena);
        assert_eq!(MainMenuItem::Arena.previous(), MainMenuItem::GenerateMaze);
        assert_eq!(
            MainMenuItem::GenerateMaze.previous(),
            MainMenuItem::GenerateMaze
        );
    }

    #[test]
    fn test_navigation_follows_display_order() {
        for pair in MainMenuItem::ALL.windows(2) {
            if let [above, below] = pair {
                assert_eq!(above.next(), *below, "next should follow the list");
                assert_eq!(below.previous(), *above, "previous should follow the list");
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(MainMenuItem::GenerateMaze.label(), "Generate Maze");
        assert_eq!(MainMenuItem::Arena.label(), "Arena");
        assert_eq!(MainMenuItem::Quit.label(), "Quit");
    }

    #[test]
    fn test_debug_implementations() {
        assert_eq!(format!("{:?}", Screen::InGame), "InGame");
        assert_eq!(format!("{:?}", MainMenuItem::Arena), "Arena");
    }
}
