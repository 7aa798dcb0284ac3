//! User interface rendering functions for all application screens.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
    Frame,
};

use crate::{
    composer::ColumnSlice,
    pose::Pose,
    types::{MainMenuItem, Screen},
    world::{grid_coord, Cell, GridMap},
    App,
};

/// Grey value of the brightest possible wall.
const WALL_BRIGHTNESS: u16 = 204;
/// Green value of the brightest possible floor.
const FLOOR_BRIGHTNESS: u16 = 153;
/// Width of the main menu box.
const MENU_WIDTH: u16 = 36;
/// Height of the main menu box: one row per item plus the border.
const MENU_HEIGHT: u16 = 5;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function returns an error if the in-game screen is drawn without a session.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders the main menu screen with navigation options.
///
/// This function displays a centred, bordered box listing every [`MainMenuItem`] and highlights
/// the currently selected one.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let [area] = Layout::vertical([Constraint::Length(MENU_HEIGHT)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(MENU_WIDTH)])
        .flex(Flex::Center)
        .areas(area);

    let block = Block::bordered()
        .title("raycastuine")
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(area);

    frame.render_widget(block, area);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let rows = Layout::vertical(vec![Constraint::Max(1); MainMenuItem::ALL.len()]).split(inner_space);
    for (entry, row) in MainMenuItem::ALL.into_iter().zip(rows.iter()) {
        let style = if entry == item {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(entry.label()).centered().style(style), *row);
    }
}

/// Renders the first-person view with the overhead map and status line on top.
///
/// The view fills the terminal except for the bottom row, which holds the status line unless
/// `--no-status` was given. The overhead map sits in the top-right corner when it fits.
///
/// # Errors
///
/// This function returns an error if there is no active session.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = app
        .session
        .as_ref()
        .ok_or_eyre("no active session to draw")?;

    let status_rows = u16::from(!app.config.no_status);
    let [view_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(status_rows)])
            .areas(frame.area());

    let slices = session.render(view_area.width, view_area.height, &app.render);
    frame.render_widget(RaycastView::new(&slices, app.render.shades), view_area);

    if !app.config.no_minimap {
        if let Some(area) = minimap_area(view_area, session.map()) {
            frame.render_widget(Clear, area);
            frame.render_widget(minimap(session.map(), session.pose()), area);
        }
    }

    if !app.config.no_status {
        frame.render_widget(
            status_line(session.pose(), app.clock.fps(), view_area),
            status_area,
        );
    }

    Ok(())
}

/// Widget copying composed column records into the terminal buffer.
///
/// Each record paints its column with a black sky, a grey wall whose brightness follows the
/// wall shade, and a green floor that brightens towards the bottom of the screen.
#[derive(Debug)]
pub(crate) struct RaycastView<'frame> {
    /// Column records, one per screen column of the area.
    slices: &'frame [ColumnSlice],
    /// Number of shade levels the records were composed with.
    levels: u8,
}

impl<'frame> RaycastView<'frame> {
    /// Wraps the records of one frame.
    pub(crate) const fn new(slices: &'frame [ColumnSlice], levels: u8) -> Self {
        Self { slices, levels }
    }
}

impl Widget for RaycastView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for slice in self.slices.iter().filter(|slice| slice.column < area.width) {
            let x = area.x.saturating_add(slice.column);
            let ceiling = slice.ceiling.min(area.height);
            let floor = slice.floor.min(area.height);

            for row in 0..ceiling {
                paint(buf, x, area.y.saturating_add(row), Color::Black);
            }

            let wall = wall_color(slice.wall_shade, self.levels);
            for row in ceiling..floor {
                paint(buf, x, area.y.saturating_add(row), wall);
            }

            for &(row, shade) in slice.floor_shades.iter().filter(|(row, _)| *row < area.height) {
                paint(
                    buf,
                    x,
                    area.y.saturating_add(row),
                    floor_color(shade, self.levels),
                );
            }
        }
    }
}

/// Fills one buffer cell with a blank of the given background.
fn paint(buf: &mut Buffer, x: u16, y: u16, color: Color) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        let _ = cell.set_char(' ').set_bg(color);
    }
}

/// Grey of a wall at shade `level`.
pub(crate) fn wall_color(level: u8, levels: u8) -> Color {
    let value = scale_shade(level, levels, WALL_BRIGHTNESS);

    Color::Rgb(value, value, value)
}

/// Green of a floor row at shade `level`.
pub(crate) fn floor_color(level: u8, levels: u8) -> Color {
    Color::Rgb(0, scale_shade(level, levels, FLOOR_BRIGHTNESS), 0)
}

/// Scales a shade level onto `0..brightest`.
fn scale_shade(level: u8, levels: u8, brightest: u16) -> u8 {
    let value = u16::from(level) * brightest / u16::from(levels.max(1));

    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Returns where the overhead map goes, or `None` if it does not fit next to the view edge.
///
/// Every map cell takes two terminal columns so the map keeps a square look.
pub(crate) fn minimap_area(view: Rect, map: &GridMap) -> Option<Rect> {
    let width = u16::try_from(map.width().checked_mul(2)?).ok()?;
    let height = u16::try_from(map.height()).ok()?;

    (width < view.width && height <= view.height)
        .then(|| Rect::new(view.right() - width - 1, view.y, width, height))
}

/// Builds the overhead map: `[]` for walls and `><` for the viewer.
pub(crate) fn minimap(map: &GridMap, pose: &Pose) -> Paragraph<'static> {
    let wall_style = Style::default().fg(Color::White).bg(Color::Black);
    let open_style = Style::default().bg(Color::Black);
    let player_style = Style::default().fg(Color::Yellow).bg(Color::Black);

    let player = (grid_coord(pose.x), grid_coord(pose.y));

    let lines: Vec<Line<'static>> = (0..map.height())
        .filter_map(|y| isize::try_from(y).ok())
        .map(|y| {
            let spans: Vec<Span<'static>> = (0..map.width())
                .filter_map(|x| isize::try_from(x).ok())
                .map(|x| {
                    if (x, y) == player {
                        Span::styled("><", player_style)
                    } else if map.cell(x, y) == Some(Cell::Wall) {
                        Span::styled("[]", wall_style)
                    } else {
                        Span::styled("  ", open_style)
                    }
                })
                .collect();

            Line::from(spans)
        })
        .collect();

    Paragraph::new(lines)
}

/// Builds the status line with the pose, frame rate and view size.
pub(crate) fn status_line(pose: &Pose, fps: u32, view: Rect) -> Line<'static> {
    Line::raw(format!(
        "Angle: {:.2} X: {:.2} Y: {:.2} FOV: {:.2} Fps: {fps} Cols: {} Rows: {}   (esc) menu / (q) quit",
        pose.normalized_heading(),
        pose.x,
        pose.y,
        pose.fov,
        view.width,
        view.height,
    ))
    .style(Style::default().fg(Color::Green))
}
