//! Core application state and logic for the raycaster.

use color_eyre::eyre::Result;
use log::info;
use ratatui::DefaultTerminal;

use crate::{
    clock::FrameClock,
    config::Config,
    events,
    file_loader::load_map,
    labyrinth::generate_maze,
    movement::MotionSettings,
    pose::Pose,
    session::{RenderSettings, Session},
    types::{MainMenuItem, Screen},
    ui,
    world::GridMap,
};

/// Application state container for the raycaster.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
#[derive(Debug)]
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Session being played, if any.
    ///
    /// This field is only `Some` while [`screen`](App::screen) is [`Screen::InGame`]. Leaving the
    /// game drops it.
    pub(crate) session: Option<Session>,
    /// Validated command-line configuration.
    pub(crate) config: Config,
    /// Frame rendering parameters derived from the configuration.
    pub(crate) render: RenderSettings,
    /// Movement step sizes derived from the configuration.
    pub(crate) motion: MotionSettings,
    /// Map and starting pose for the "Arena" menu entry.
    ///
    /// This is the built-in arena unless a map file was given on the command line, in which case
    /// it was loaded once at startup.
    pub(crate) arena: (GridMap, Pose),
    /// Seed of the first generated maze.
    pub(crate) base_seed: u64,
    /// Number of mazes generated so far.
    ///
    /// Each generation uses `base_seed + generation`, so a fixed `--seed` reproduces the whole
    /// sequence of mazes.
    pub(crate) generation: u64,
    /// Frame rate counter for the status line.
    pub(crate) clock: FrameClock,
}

impl App {
    /// Creates the application from a parsed configuration.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The configuration does not validate (see [`Config::validate`])
    /// - The map file given with `--map` cannot be loaded
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let render = config.render()?;
        let motion = config.motion();
        let (map, pose) = config
            .map
            .as_deref()
            .map(load_map)
            .transpose()?
            .unwrap_or_else(|| (GridMap::arena(), Pose::arena_start()));
        let base_seed = config.seed.unwrap_or_else(rand::random);

        info!(
            "maze size {}x{}, first seed {base_seed}, parallel casting {}",
            config.width, config.height, render.parallel
        );

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::GenerateMaze),
            session: None,
            arena: (map, pose.with_fov(config.fov)),
            config,
            render,
            motion,
            base_seed,
            generation: 0,
            clock: FrameClock::new(),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site. Each pass
    /// draws one frame and then waits up to `--frame-ms` for a key.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - Maze generation failures when starting a new maze
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            self.clock.tick();
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Generates the next maze and starts playing it.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be generated.
    pub(crate) fn start_maze(&mut self) -> Result<()> {
        let seed = self.base_seed.wrapping_add(self.generation);
        self.generation = self.generation.wrapping_add(1);

        let (map, pose) = generate_maze(self.config.width, self.config.height, seed)?;
        info!("starting maze #{} from seed {seed}", self.generation);

        self.enter(map, pose.with_fov(self.config.fov));

        Ok(())
    }

    /// Starts playing the arena or the loaded map file.
    pub(crate) fn start_arena(&mut self) {
        let (map, pose) = self.arena.clone();
        info!("starting arena {}x{}", map.width(), map.height());

        self.enter(map, pose);
    }

    /// Drops the current session and returns to the main menu.
    pub(crate) fn leave_game(&mut self) {
        self.session = None;
        self.screen = Screen::MainMenu(MainMenuItem::GenerateMaze);
    }

    /// Switches to the in-game screen with a fresh session.
    fn enter(&mut self, map: GridMap, pose: Pose) {
        self.session = Some(Session::new(map, pose, self.motion));
        self.screen = Screen::InGame;
    }
}
