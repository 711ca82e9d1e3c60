use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::simulation::Navigator;
use crate::ui::field::{activity_levels, strength_levels};

/// Bar heights for the neural side panels, each in 0..=100.
#[derive(Clone, Debug, Default)]
pub struct NeuralPanels {
    pub heading: Vec<u64>,
    pub integrator: Vec<u64>,
    pub comparison: Vec<u64>,
    pub strengths: Vec<u64>,
}

impl NeuralPanels {
    #[must_use]
    pub fn from_navigator(nav: &Navigator) -> Self {
        Self {
            heading: activity_levels(nav.heading_activity(), 1.0),
            integrator: activity_levels(nav.integrator_activity(), 0.0),
            comparison: activity_levels(nav.memory_comparison(), 0.0),
            strengths: strength_levels(&nav.memory_strengths(), nav.config().max_strength),
        }
    }
}

/// HUD line: time, mode, heading and the estimated home vector.
#[must_use]
pub fn hud_line(nav: &Navigator) -> String {
    let (hx, hy) = nav.home_vector();
    format!(
        "t: {:.1}s | Mode: {} | Hdg: {:+.2} | Home: ({:+.1}, {:+.1}) | Sites: {} | Mem: {}",
        nav.elapsed(),
        nav.mode().label(),
        nav.heading(),
        hx,
        hy,
        nav.sites().len(),
        nav.memory().len(),
    )
}

fn bar_panel<'a>(title: &'a str, levels: &[u64], color: Color) -> BarChart<'a> {
    let bars: Vec<Bar> = levels
        .iter()
        .map(|v| Bar::default().value(*v).text_value(String::new()))
        .collect();
    BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .max(100)
}

fn draw_panels(f: &mut Frame, area: Rect, panels: &NeuralPanels) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    f.render_widget(bar_panel("TB1 Compass", &panels.heading, Color::Yellow), chunks[0]);
    f.render_widget(
        bar_panel("CPU4 Path Integrator", &panels.integrator, Color::Magenta),
        chunks[1],
    );
    f.render_widget(
        bar_panel("CPU1 Memory Δ", &panels.comparison, Color::Cyan),
        chunks[2],
    );
    f.render_widget(
        bar_panel("Memory Strengths", &panels.strengths, Color::Green),
        chunks[3],
    );
}

pub fn draw_ui(f: &mut Frame, grid_lines: Vec<String>, hud_info: &str, panels: &NeuralPanels) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(0),    // Arena + panels
        ])
        .split(f.area());

    // HUD
    let hud = Paragraph::new(Span::styled(
        hud_info,
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(hud, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(chunks[1]);

    // Arena
    let text: Vec<Line> = grid_lines
        .into_iter()
        .map(|s| Line::from(Span::raw(s)))
        .collect();

    let field = Paragraph::new(text)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(field, body[0]);
    draw_panels(f, body[1], panels);
}
