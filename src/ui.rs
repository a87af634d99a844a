//! Terminal UI rendering for the folio session.
//!
//! One full-screen view at a time, chosen by `RenderState::screen`:
//! - Boot / Session: scrollback plus prompt, colored by line kind and tone
//! - Crashed / Recovering / Exiting: centered status screens
//! - Matrix: digital rain
//! - Standard: the static portfolio page
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state. The only thing it owns is the rain animation.

use rand::seq::IndexedRandom;
use rand::Rng;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::interpreter::render;
use crate::markup::{Markup, MarkupLine, Tone};
use crate::matrix::MatrixRain;
use crate::meltdown::Glitch;
use crate::portfolio::Portfolio;
use crate::render::RenderState;
use crate::tea::Screen;
use crate::terminal::{Body, LineKind, ResumeState, TerminalLine};
use crate::theme::Palette;

const GARBAGE: &[char] = &['#', '%', '&', '@', '$', '!', '?', '/', '\\', '|', '~', '░', '▒', '▓'];
/// Share of characters replaced per glitch level.
const GARBLE_TEXT: f64 = 0.03;
const GARBLE_SCREEN: f64 = 0.08;
/// Timestamps only when the terminal is at least this wide.
const TIMESTAMP_MIN_WIDTH: u16 = 80;

/// Main render function - entry point for all UI drawing.
/// Takes an immutable RenderState snapshot.
pub fn draw(frame: &mut Frame, state: &RenderState, rain: &mut MatrixRain) {
    let area = frame.area();
    let palette = Palette::named(&state.theme);
    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

    match state.screen {
        Screen::Boot | Screen::Session => render_session(frame, state, &palette, area),
        Screen::Crashed => render_crash(frame, area),
        Screen::Recovering => render_recovering(frame, state, &palette, area),
        Screen::Exiting => render_exiting(frame, &palette, area),
        Screen::Matrix => {
            if rain.size() != (area.width, area.height) {
                rain.resize(area.width, area.height);
            }
            rain.tick();
            frame.render_widget(&*rain, area);
        }
        Screen::Standard => render_standard(frame, state, &palette, area),
    }
}

// -----------------------------------------------------------------------------
// Session
// -----------------------------------------------------------------------------

fn render_session(frame: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let width = area.width.max(1) as usize;
    let show_time = area.width >= TIMESTAMP_MIN_WIDTH;

    let mut rows: Vec<Line<'static>> = Vec::new();
    for line in &state.history {
        for row in history_rows(line, palette, show_time) {
            rows.extend(wrap(row, width));
        }
    }
    let history_rows = rows.len();

    if state.prompt_visible {
        rows.extend(wrap(prompt_row(state, palette), width));
        if state.suggestions.len() > 1 {
            rows.push(suggestion_row(state, palette));
        }
    }

    if state.glitch != Glitch::None {
        let mut rng = rand::rng();
        rows = rows
            .into_iter()
            .map(|row| garble(row, state.glitch, palette, &mut rng))
            .collect();
    }

    // Scrolling only moves through history; the prompt rows stay pinned
    // when the view is at the bottom.
    let height = area.height as usize;
    let scroll = state.scroll.min(history_rows.saturating_sub(height.min(history_rows)));
    let end = rows.len() - scroll;
    let start = end.saturating_sub(height);
    let visible: Vec<Line> = rows.drain(start..end).collect();

    let mut style = Style::default().fg(palette.text).bg(palette.bg);
    if state.frozen {
        style = style.add_modifier(Modifier::REVERSED);
    }
    frame.render_widget(Paragraph::new(visible).style(style), area);
}

fn kind_color(kind: LineKind, palette: &Palette) -> ratatui::style::Color {
    match kind {
        LineKind::Input | LineKind::Output => palette.text,
        LineKind::System => palette.dim,
        LineKind::Error => palette.error,
    }
}

fn tone_style(tone: Tone, kind: LineKind, palette: &Palette) -> Style {
    let base = Style::default().fg(kind_color(kind, palette));
    if kind != LineKind::Output {
        return base;
    }
    match tone {
        Tone::Plain => base,
        Tone::Accent | Tone::Art => base.fg(palette.accent),
        Tone::Heading => base.fg(palette.heading).add_modifier(Modifier::BOLD),
        Tone::Dim => base.fg(palette.dim),
        Tone::Link => base.fg(palette.link).add_modifier(Modifier::UNDERLINED),
        Tone::Quote => base.add_modifier(Modifier::ITALIC),
    }
}

fn markup_rows(markup: &Markup, kind: LineKind, palette: &Palette) -> Vec<Line<'static>> {
    markup
        .lines
        .iter()
        .map(|line| {
            Line::from(
                line.fragments
                    .iter()
                    .map(|f| Span::styled(f.text.clone(), tone_style(f.tone, kind, palette)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn resume_rows(state: &ResumeState, palette: &Palette) -> Vec<Line<'static>> {
    let line = match state {
        ResumeState::Loading => Line::from(Span::styled(
            Body::Resume(ResumeState::Loading).to_plain(),
            Style::default().fg(palette.dim).add_modifier(Modifier::SLOW_BLINK),
        )),
        ResumeState::Ready(path) => Line::from(vec![
            Span::styled("Resume ready: ", Style::default().fg(palette.text)),
            Span::styled(
                path.display().to_string(),
                Style::default().fg(palette.link).add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        ResumeState::Failed(_) => Line::from(Span::styled(
            Body::Resume(state.clone()).to_plain(),
            Style::default().fg(palette.error),
        )),
    };
    vec![line]
}

fn history_rows(line: &TerminalLine, palette: &Palette, show_time: bool) -> Vec<Line<'static>> {
    let mut rows = match &line.body {
        Body::Markup(markup) if markup.is_empty() => vec![Line::default()],
        Body::Markup(markup) => markup_rows(markup, line.kind, palette),
        Body::Resume(state) => resume_rows(state, palette),
    };

    if show_time && line.kind == LineKind::Input {
        if let (Some(ts), Some(first)) = (line.timestamp, rows.first_mut()) {
            first.spans.insert(
                0,
                Span::styled(
                    ts.format("%H:%M:%S ").to_string(),
                    Style::default().fg(palette.dim),
                ),
            );
        }
    }
    rows
}

fn prompt_row(state: &RenderState, palette: &Palette) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{} ", state.mode.prompt()),
            Style::default().fg(palette.prompt).add_modifier(Modifier::BOLD),
        ),
        Span::styled(state.input.clone(), Style::default().fg(palette.text)),
    ];
    if state.focused {
        spans.push(Span::styled(
            "_",
            Style::default()
                .fg(palette.prompt)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

fn suggestion_row(state: &RenderState, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::with_capacity(state.suggestions.len() * 2);
    for (i, s) in state.suggestions.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if i == state.suggestion_index {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.dim)
        };
        spans.push(Span::styled(s.clone(), style));
    }
    Line::from(spans)
}

/// Hard-wrap a row at `width` characters, keeping span styles.
fn wrap(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let total: usize = line.spans.iter().map(|s| s.content.chars().count()).sum();
    if total <= width || width == 0 {
        return vec![line];
    }

    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for span in line.spans {
        let mut rest: Vec<char> = span.content.chars().collect();
        while !rest.is_empty() {
            let take = (width - used).min(rest.len());
            let chunk: String = rest.drain(..take).collect();
            current.push(Span::styled(chunk, span.style));
            used += take;
            if used == width {
                rows.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
        }
    }
    if !current.is_empty() {
        rows.push(Line::from(current));
    }
    rows
}

/// Replace random characters; heavy damage also shifts whole rows.
fn garble<R: Rng + ?Sized>(
    line: Line<'static>,
    glitch: Glitch,
    palette: &Palette,
    rng: &mut R,
) -> Line<'static> {
    let chance = match glitch {
        Glitch::None => return line,
        Glitch::Text => GARBLE_TEXT,
        Glitch::Screen => GARBLE_SCREEN,
    };

    let mut spans: Vec<Span<'static>> = line
        .spans
        .into_iter()
        .map(|span| {
            let text: String = span
                .content
                .chars()
                .map(|c| {
                    if !c.is_whitespace() && rng.random_bool(chance) {
                        GARBAGE.choose(rng).copied().unwrap_or(c)
                    } else {
                        c
                    }
                })
                .collect();
            Span::styled(text, span.style)
        })
        .collect();

    if glitch == Glitch::Screen && rng.random_bool(0.1) {
        let shift = rng.random_range(1..6);
        spans.insert(0, Span::styled(" ".repeat(shift), Style::default().bg(palette.error)));
    }
    Line::from(spans)
}

// -----------------------------------------------------------------------------
// Full-screen status views
// -----------------------------------------------------------------------------

fn centered(area: Rect, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}

fn render_crash(frame: &mut Frame, area: Rect) {
    use ratatui::style::Color;

    frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);
    let red = Style::default().fg(Color::Rgb(0xdc, 0x26, 0x26));
    let lines = vec![
        Line::styled("FATAL ERROR", red.add_modifier(Modifier::BOLD)),
        Line::default(),
        Line::styled("SYSTEM HALTED", red),
        Line::styled("0x000000DEAD", Style::default().fg(Color::Rgb(0x99, 0x1b, 0x1b))),
    ];
    let paragraph = Paragraph::new(lines).centered();
    frame.render_widget(paragraph, centered(area, 4));
}

fn render_recovering(frame: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let dots = ". ".repeat(state.recovery_dots as usize);
    let line = Line::styled(
        dots.trim_end().to_string(),
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    );
    frame.render_widget(Paragraph::new(line).centered(), centered(area, 1));
}

fn render_exiting(frame: &mut Frame, palette: &Palette, area: Rect) {
    use ratatui::style::Color;

    frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);
    let lines = vec![
        Line::styled("Connection to remote host closed.", Style::default().fg(palette.dim)),
        Line::default(),
        Line::styled(
            "Redirecting to standard interface...",
            Style::default().fg(palette.dim).add_modifier(Modifier::SLOW_BLINK),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), centered(area, 3));
}

// -----------------------------------------------------------------------------
// Standard page
// -----------------------------------------------------------------------------

/// The whole portfolio as one document, headed by name and title.
pub fn standard_page(p: &Portfolio) -> Markup {
    let mut page = Markup::new()
        .with(|l| l.heading(p.about.name.clone()))
        .with(|l| l.dim(p.about.role.clone()))
        .blank();

    let sections = [
        ("About", render::about(p)),
        ("Skills", render::skills(p)),
        ("Experience", render::experience(p)),
        ("Education", render::education(p)),
        ("Projects", render::projects(p)),
        ("Awards", render::awards(p)),
        ("Contact", render::contact(p)),
    ];
    for (title, body) in sections {
        if body.is_empty() {
            continue;
        }
        page = page
            .line(MarkupLine::default().push(Tone::Heading, title.to_uppercase()))
            .append(body)
            .blank();
    }
    page.with(|l| l.dim("q quit • ↑/↓ scroll"))
}

fn render_standard(frame: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let Some(portfolio) = state.portfolio.as_deref() else {
        return;
    };
    let width = area.width.saturating_sub(4).max(1) as usize;
    let rows: Vec<Line> = markup_rows(&standard_page(portfolio), LineKind::Output, palette)
        .into_iter()
        .flat_map(|row| wrap(row, width))
        .collect();

    let max_scroll = rows.len().saturating_sub(area.height as usize);
    let scroll = state.standard_scroll.min(max_scroll);
    let inner = Rect {
        x: area.x + 2,
        width: area.width.saturating_sub(4),
        ..area
    };
    let visible: Vec<Line> = rows.into_iter().skip(scroll).collect();
    frame.render_widget(
        Paragraph::new(visible).style(Style::default().fg(palette.text).bg(palette.bg)),
        inner,
    );
}
