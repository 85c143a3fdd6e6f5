//! Moisture dashboard
//!
//! Derives the display state of one decoded record and composes it into a
//! backend-neutral [`Panel`]. Painting is left to a
//! [`DisplaySurface`](crate::ports::DisplaySurface).
//!
//! ```text
//! ╭──────────── Moisture Sensor ─────────────╮
//! │ CRITICAL: Sensor at maximum depth! ...   │   (depth 6 only)
//! │ 💧 Wet                                   │
//! │                                          │
//! │ ██████████████████████████████           │
//! │                                          │
//! │ 100.0% Moisture                          │
//! │ Depth: 6/6                               │
//! ╰──────────────── rp-moisture ─────────────╯
//! ```

use crate::domain::{DepthLevel, Status, StatusClassifier};
use crate::record::{DecodeError, Record};

/// Default bar width in cells
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Glyph for filled bar cells
pub const BAR_FILLED: char = '█';

/// Glyph for the empty track
pub const BAR_TRACK: char = '─';

/// Warning shown when the probe reaches the highest depth level
pub const ALERT_TEXT: &str = "CRITICAL: Sensor at maximum depth! Risk of drowning!";

// ============================================================================
// Styling
// ============================================================================

/// Colors the dashboard uses. Surfaces map them to their own palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Green,
    Yellow,
    Red,
}

/// Text style of a span
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub blink: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        bold: false,
        blink: false,
    };

    pub const fn bold() -> Self {
        Style {
            color: None,
            bold: true,
            blink: false,
        }
    }

    pub const fn fg(color: Color) -> Self {
        Style {
            color: Some(color),
            bold: false,
            blink: false,
        }
    }

    pub const fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn with_blink(mut self) -> Self {
        self.blink = true;
        self
    }
}

/// A run of text in one style
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::PLAIN)
    }

    /// Width in terminal cells
    pub fn width(&self) -> usize {
        display_width(&self.text)
    }
}

/// One panel row
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    /// Width in terminal cells
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Text without styling
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A bordered panel, painted as a whole
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub subtitle: String,
    pub border: Color,
    pub lines: Vec<Line>,
}

impl Panel {
    /// Width of the widest row
    pub fn content_width(&self) -> usize {
        self.lines.iter().map(Line::width).max().unwrap_or(0)
    }

    /// Rows as plain text
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(Line::plain_text).collect()
    }
}

/// Out-of-panel message, painted without clearing the surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub label: String,
    pub detail: String,
}

impl Annotation {
    /// Report a line the decoder rejected
    pub fn rejected_line(line: &str, error: &DecodeError) -> Self {
        Self {
            label: "Error parsing line:".to_string(),
            detail: format!("{} ({})", line.trim_end(), error),
        }
    }

    /// Report a transport failure
    pub fn link_fault(endpoint: &str, error: &dyn std::error::Error) -> Self {
        Self {
            label: "Link error:".to_string(),
            detail: format!("{} ({})", endpoint, error),
        }
    }

    /// Label and detail joined by a space
    pub fn text(&self) -> String {
        format!("{} {}", self.label, self.detail)
    }
}

/// Terminal cell width of a string
///
/// Pictographs (U+1F300 and above) take two cells, everything else one.
pub fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| if c as u32 >= 0x1F300 { 2 } else { 1 })
        .sum()
}

// ============================================================================
// Display State
// ============================================================================

/// Moisture band of a reading, selecting icon and color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    /// percent > 70
    High,
    /// 40 < percent <= 70
    Mid,
    /// percent <= 40
    Low,
}

impl Band {
    /// Lower bound (exclusive) of the high band
    pub const HIGH_ABOVE: f32 = 70.0;

    /// Lower bound (exclusive) of the mid band
    pub const MID_ABOVE: f32 = 40.0;

    pub fn from_percent(percent: f32) -> Self {
        if percent > Self::HIGH_ABOVE {
            Band::High
        } else if percent > Self::MID_ABOVE {
            Band::Mid
        } else {
            Band::Low
        }
    }

    pub const fn icon(&self) -> &'static str {
        match self {
            Band::High => "💧",
            Band::Mid => "🪴",
            Band::Low => "🌵",
        }
    }

    pub const fn color(&self) -> Color {
        match self {
            Band::High => Color::Blue,
            Band::Mid => Color::Green,
            Band::Low => Color::Yellow,
        }
    }
}

/// Dashboard configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Bar width in cells
    pub bar_width: usize,
    /// Panel title
    pub title: String,
    /// Panel subtitle
    pub subtitle: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            title: "Moisture Sensor".to_string(),
            subtitle: "rp-moisture".to_string(),
        }
    }
}

/// Everything the panel shows for one record
///
/// Recomputed on every render cycle from the decoded record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayState {
    pub percent: f32,
    pub depth: DepthLevel,
    pub status: Status,
    pub band: Band,
    /// Filled bar cells, `floor(bar_width * percent / 100)`
    pub filled: usize,
    pub bar_width: usize,
    /// Set iff the depth is at its maximum
    pub alert: bool,
}

impl DisplayState {
    /// Derive the display state of a record
    ///
    /// `status` comes from the raw sample, independently of `percent`.
    pub fn derive(record: &Record, status: Status, bar_width: usize) -> Self {
        let percent = record.percent();
        let filled = ((bar_width as f32 * percent / 100.0) as usize).min(bar_width);
        Self {
            percent,
            depth: record.depth(),
            status,
            band: Band::from_percent(percent),
            filled,
            bar_width,
            alert: record.depth().is_max(),
        }
    }

    pub const fn icon(&self) -> &'static str {
        self.band.icon()
    }

    pub const fn color(&self) -> Color {
        self.band.color()
    }

    /// Empty bar cells
    pub fn track(&self) -> usize {
        self.bar_width - self.filled
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Turns decoded records into panels
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    classifier: StatusClassifier,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(classifier: StatusClassifier, config: DashboardConfig) -> Self {
        Self { classifier, config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Derive the display state, recomputing status from the raw sample
    pub fn state(&self, record: &Record) -> DisplayState {
        let status = self.classifier.classify(record.raw());
        DisplayState::derive(record, status, self.config.bar_width)
    }

    /// Compose the panel for a display state
    pub fn panel(&self, state: &DisplayState) -> Panel {
        let color = state.color();
        let mut lines = Vec::with_capacity(7);

        if state.alert {
            lines.push(Line::new(vec![Span::new(
                ALERT_TEXT,
                Style::fg(Color::Red).with_bold().with_blink(),
            )]));
        }

        lines.push(Line::new(vec![Span::new(
            format!("{} {}", state.icon(), state.status),
            Style::fg(color).with_bold(),
        )]));
        lines.push(Line::blank());

        let mut bar = Vec::with_capacity(2);
        if state.filled > 0 {
            bar.push(Span::new(
                BAR_FILLED.to_string().repeat(state.filled),
                Style::fg(color),
            ));
        }
        if state.track() > 0 {
            bar.push(Span::plain(BAR_TRACK.to_string().repeat(state.track())));
        }
        lines.push(Line::new(bar));
        lines.push(Line::blank());

        lines.push(Line::new(vec![
            Span::new(format!("{:.1}%", state.percent), Style::bold()),
            Span::plain(" Moisture"),
        ]));
        lines.push(Line::new(vec![
            Span::plain("Depth: "),
            Span::new(
                format!("{}/{}", state.depth.value(), DepthLevel::LEVELS),
                Style::bold(),
            ),
        ]));

        Panel {
            title: self.config.title.clone(),
            subtitle: self.config.subtitle.clone(),
            border: color,
            lines,
        }
    }

    /// State and panel of a record in one call
    pub fn render(&self, record: &Record) -> (DisplayState, Panel) {
        let state = self.state(record);
        let panel = self.panel(&state);
        (state, panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(line: &str) -> Record {
        Record::decode(line).unwrap()
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::from_percent(100.0), Band::High);
        assert_eq!(Band::from_percent(70.01), Band::High);
        assert_eq!(Band::from_percent(70.0), Band::Mid);
        assert_eq!(Band::from_percent(40.01), Band::Mid);
        assert_eq!(Band::from_percent(40.0), Band::Low);
        assert_eq!(Band::from_percent(0.0), Band::Low);
    }

    #[test]
    fn test_band_styles() {
        assert_eq!((Band::High.icon(), Band::High.color()), ("💧", Color::Blue));
        assert_eq!((Band::Mid.icon(), Band::Mid.color()), ("🪴", Color::Green));
        assert_eq!((Band::Low.icon(), Band::Low.color()), ("🌵", Color::Yellow));
    }

    #[test]
    fn test_bar_fill() {
        let dashboard = Dashboard::default();
        assert_eq!(dashboard.state(&record("100.00,6,30000")).filled, 30);
        assert_eq!(dashboard.state(&record("0.00,1,65535")).filled, 0);
        // floor(30 * 43.72 / 100) = floor(13.116)
        let mid = dashboard.state(&record("43.72,3,50000"));
        assert_eq!((mid.filled, mid.track()), (13, 17));
        // floor(30 * 99.99 / 100) = floor(29.997)
        assert_eq!(dashboard.state(&record("99.99,6,30001")).filled, 29);
    }

    #[test]
    fn test_custom_bar_width() {
        let dashboard = Dashboard::new(
            StatusClassifier::default(),
            DashboardConfig {
                bar_width: 10,
                ..Default::default()
            },
        );
        let state = dashboard.state(&record("55.00,4,45000"));
        assert_eq!((state.filled, state.bar_width), (5, 10));
    }

    #[test]
    fn test_status_recomputed_from_raw() {
        let dashboard = Dashboard::default();
        // High percent but raw above the dry threshold.
        let state = dashboard.state(&record("90.00,6,61000"));
        assert_eq!(state.band, Band::High);
        assert_eq!(state.status, Status::Dry);

        let strict = Dashboard::new(StatusClassifier::new(40000), DashboardConfig::default());
        assert_eq!(strict.state(&record("43.72,3,50000")).status, Status::Dry);
    }

    #[test]
    fn test_panel_layout() {
        let dashboard = Dashboard::default();
        let (state, panel) = dashboard.render(&record("43.72,3,50000"));
        assert!(!state.alert);
        assert_eq!(panel.border, Color::Green);
        assert_eq!(
            panel.plain_lines(),
            vec![
                "🪴 Wet".to_string(),
                String::new(),
                format!("{}{}", "█".repeat(13), "─".repeat(17)),
                String::new(),
                "43.7% Moisture".to_string(),
                "Depth: 3/6".to_string(),
            ]
        );
        assert_eq!(panel.lines[0].spans[0].style, Style::fg(Color::Green).with_bold());
        assert_eq!(panel.lines[2].spans[0].style, Style::fg(Color::Green));
    }

    #[test]
    fn test_alert_panel_puts_warning_first() {
        let dashboard = Dashboard::default();
        let (state, panel) = dashboard.render(&record("100.00,6,30000"));
        assert!(state.alert);
        assert_eq!(panel.lines.len(), 7);
        assert_eq!(panel.lines[0].plain_text(), ALERT_TEXT);
        let style = panel.lines[0].spans[0].style;
        assert_eq!(style.color, Some(Color::Red));
        assert!(style.bold && style.blink);
        assert_eq!(panel.lines[1].plain_text(), "💧 Wet");
        assert_eq!(panel.lines[3].plain_text(), "█".repeat(30));
        assert_eq!(panel.lines[5].plain_text(), "100.0% Moisture");
        assert_eq!(panel.lines[6].plain_text(), "Depth: 6/6");
    }

    #[test]
    fn test_empty_bar_has_only_track() {
        let (_, panel) = Dashboard::default().render(&record("0.00,1,65535"));
        assert_eq!(panel.lines[0].plain_text(), "🌵 Dry");
        assert_eq!(panel.lines[2].spans.len(), 1);
        assert_eq!(panel.lines[2].spans[0].style, Style::PLAIN);
    }

    #[test]
    fn test_display_width_counts_pictographs_twice() {
        assert_eq!(display_width("🪴 Wet"), 6);
        assert_eq!(display_width("───"), 3);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_rejected_line_annotation() {
        let error = Record::decode("1,2").unwrap_err();
        let note = Annotation::rejected_line("1,2\r\n", &error);
        assert_eq!(note.text(), "Error parsing line: 1,2 (expected 3 fields, found 2)");
    }

    proptest! {
        #[test]
        fn alert_iff_max_depth(hundredths in 0u32..=10_000, level in 1u8..=6, raw in any::<u16>()) {
            let depth = DepthLevel::new(level).unwrap();
            let record = Record::new(hundredths as f32 / 100.0, depth, raw);
            let state = Dashboard::default().state(&record);
            prop_assert_eq!(state.alert, level == 6);
            prop_assert!(state.filled <= state.bar_width);
        }
    }
}
