//! A titled grid of components.
//!
//! The dashboard owns the component list and redoes the layout on every
//! render: it packs the components into rows, draws a bordered panel per
//! component and asks each component to paint inside its panel. Draw errors
//! are collected and returned; none of them stops the rest of the frame.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing::{debug, warn};

use crate::config::{DashboardConfig, WidgetConfig};
use crate::error::{Error, Result};
use crate::feed::{Binding, Feed, SnapshotStore};
use crate::layout::{pack, ComponentKind, LayoutEntry, LayoutPlan, Regions, DEFAULT_HEADER_PERCENT};
use crate::widgets::{
    Component, Funnel, Histogram, PieChart, Radar, ScatterPlot, Table, TableOptions,
};

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

struct Panel {
    title: Option<String>,
    entry: LayoutEntry,
    component: Arc<dyn Component>,
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("title", &self.title)
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

/// Components laid out under a title row.
#[derive(Debug)]
pub struct Dashboard {
    title: String,
    title_color: Color,
    header_percent: u16,
    borders: bool,
    panels: Vec<Panel>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new("")
    }
}

impl Dashboard {
    /// Creates an empty dashboard.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_color: Color::Green,
            header_percent: DEFAULT_HEADER_PERCENT,
            borders: true,
            panels: Vec::new(),
        }
    }

    /// Sets the share of the height reserved for the title row.
    #[must_use]
    pub fn header_percent(mut self, percent: u16) -> Self {
        self.header_percent = percent;
        self
    }

    /// Sets the title color.
    #[must_use]
    pub fn title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    /// Draws a titled border around each panel.
    #[must_use]
    pub fn borders(mut self, enabled: bool) -> Self {
        self.borders = enabled;
        self
    }

    /// Appends a component with its kind's default width.
    pub fn push(&mut self, component: Arc<dyn Component>, title: Option<String>) {
        let entry = LayoutEntry::new(component.kind());
        self.panels.push(Panel {
            title,
            entry,
            component,
        });
    }

    /// Appends a component with an explicit width weight.
    pub fn push_weighted(&mut self, component: Arc<dyn Component>, title: Option<String>, weight: u16) {
        let entry = LayoutEntry::weighted(component.kind(), weight);
        self.panels.push(Panel {
            title,
            entry,
            component,
        });
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the dashboard has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Component at `index`.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&Arc<dyn Component>> {
        self.panels.get(index).map(|p| &p.component)
    }

    /// The dashboard title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Packs the current component list.
    #[must_use]
    pub fn plan(&self) -> LayoutPlan {
        let entries: Vec<LayoutEntry> = self.panels.iter().map(|p| p.entry).collect();
        pack(&entries, self.header_percent)
    }

    /// Panel rectangles for a frame of `area`.
    #[must_use]
    pub fn regions(&self, area: Rect) -> Regions {
        self.plan().regions(area)
    }

    /// Area inside a panel's border.
    fn content_area(&self, panel: Rect) -> Rect {
        if self.borders {
            Block::bordered().inner(panel)
        } else {
            panel
        }
    }

    /// Renders the title row and every component.
    ///
    /// Returns the components that could not draw, by index. Their panels are
    /// still bordered; only their content is missing.
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Vec<(usize, Error)> {
        let regions = self.regions(area);

        if let Some(header) = regions.header {
            self.render_title(header, buf);
        }

        let mut failures = Vec::new();
        for (index, region) in regions.cells {
            let panel = &self.panels[index];
            if self.borders {
                let mut block = Block::bordered();
                if let Some(title) = &panel.title {
                    block = block.title(title.as_str());
                }
                block.render(region, buf);
            }

            let content = self.content_area(region);
            if let Err(e) = panel.component.draw(content, buf) {
                if e.is_recoverable() {
                    debug!(component = index, kind = %panel.entry.kind, error = %e, "component skipped this frame");
                } else {
                    warn!(component = index, kind = %panel.entry.kind, error = %e, "component failed to draw");
                }
                failures.push((index, e));
            }
        }
        failures
    }

    fn render_title(&self, header: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.title_color);
        let title = Paragraph::new(self.title.as_str()).style(style);
        if self.borders && header.height >= 3 {
            title.block(Block::bordered()).render(header, buf);
        } else {
            title.render(header, buf);
        }
    }

    /// Routes one terminal event.
    ///
    /// `Esc` and `Ctrl-C` ask the host to quit. Mouse events go to every
    /// component that wants them; other keys go nowhere.
    pub fn handle_event(&self, event: &Event) -> Control {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c'));
                if key.code == KeyCode::Esc || ctrl_c {
                    Control::Quit
                } else {
                    Control::Continue
                }
            }
            Event::Mouse(_) => {
                for (index, panel) in self.panels.iter().enumerate() {
                    if !panel.component.wants_mouse() {
                        continue;
                    }
                    if let Err(e) = panel.component.handle_input(event) {
                        debug!(component = index, error = %e, "mouse event rejected");
                    }
                }
                Control::Continue
            }
            _ => Control::Continue,
        }
    }

    /// Builds the widgets a configuration names and one feed per widget.
    ///
    /// Kinds without a built-in component are logged and skipped. Missing
    /// required columns are configuration errors.
    pub fn from_config(config: &DashboardConfig, store: &Arc<SnapshotStore>) -> Result<(Self, Vec<Feed>)> {
        config.validate()?;
        let theme = &config.theme;
        let mut dashboard = Self::new(config.title.clone())
            .header_percent(config.header_percent)
            .title_color(theme.title_color());
        let mut feeds = Vec::new();

        for (i, widget) in config.widgets.iter().enumerate() {
            let kind = match widget.kind.parse::<ComponentKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    warn!(widget = i, error = %e, "widget skipped");
                    continue;
                }
            };

            let (component, binding): (Arc<dyn Component>, Binding) = match kind {
                ComponentKind::Scatter => {
                    let target = Arc::new(ScatterPlot::new().color(theme.scatter_color()));
                    let binding = Binding::Scatter {
                        target: Arc::clone(&target),
                        x_col: required(widget, i, "x_col", widget.x_col.as_ref())?,
                        y_col: required(widget, i, "y_col", widget.y_col.as_ref())?,
                    };
                    (target, binding)
                }
                ComponentKind::Histogram => {
                    let target = Arc::new(Histogram::new().bar_color(theme.bar_color()));
                    target.set_alert_color(theme.alert_color());
                    let binding = Binding::Histogram {
                        target: Arc::clone(&target),
                        value_col: required(widget, i, "value_col", widget.value_col.as_ref())?,
                        bins: widget.bin_count(),
                    };
                    (target, binding)
                }
                ComponentKind::Radar => {
                    let target = Arc::new(
                        Radar::new()
                            .axis_color(theme.axis_color())
                            .data_color(theme.data_color()),
                    );
                    let binding = Binding::Radar {
                        target: Arc::clone(&target),
                        label_col: widget.label_col.clone(),
                        value_col: widget.value_col.clone(),
                    };
                    (target, binding)
                }
                ComponentKind::Funnel => {
                    let target = Arc::new(Funnel::new());
                    let binding = Binding::Funnel {
                        target: Arc::clone(&target),
                        value_col: widget.value_col.clone(),
                    };
                    (target, binding)
                }
                ComponentKind::Pie => {
                    let target = Arc::new(
                        PieChart::new()
                            .arc_step(config.arc_step())
                            .gap_free(config.arc_gap_free),
                    );
                    let binding = Binding::Pie {
                        target: Arc::clone(&target),
                        value_col: widget.value_col.clone(),
                        colors: theme.segment_colors(),
                    };
                    (target, binding)
                }
                ComponentKind::Table => {
                    let options = TableOptions::default()
                        .rows_per_page(config.rows_per_page)
                        .header_colors(theme.header_fill_color(), theme.header_text_color());
                    let target = Arc::new(Table::new(Vec::new(), Vec::new(), options)?);
                    let binding = Binding::Table {
                        target: Arc::clone(&target),
                    };
                    (target, binding)
                }
                ComponentKind::Donut | ComponentKind::Gauge | ComponentKind::Text => {
                    warn!(widget = i, kind = %kind, "no built-in component for this kind, widget skipped");
                    continue;
                }
            };

            let name = widget
                .title
                .clone()
                .unwrap_or_else(|| format!("{kind}#{i}"));
            feeds.push(Feed::new(
                name,
                config.widget_interval(widget),
                binding,
                Arc::clone(store),
            ));

            match widget.weight {
                Some(weight) => dashboard.push_weighted(component, widget.title.clone(), weight),
                None => dashboard.push(component, widget.title.clone()),
            }
        }

        Ok((dashboard, feeds))
    }
}

fn required(widget: &WidgetConfig, index: usize, key: &str, value: Option<&String>) -> Result<String> {
    value.cloned().ok_or_else(|| Error::ConfigInvalid {
        key: format!("widgets[{index}].{key}"),
        message: format!("required for {} widgets", widget.kind),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::DataSnapshot;
    use crate::widgets::test_support::painted;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

    fn store() -> Arc<SnapshotStore> {
        let header = ["region", "amount", "units"].map(String::from).to_vec();
        let records = (0..12)
            .map(|i| vec![format!("r{i}"), format!("{}", i * 3), format!("{}", 12 - i)])
            .collect();
        Arc::new(SnapshotStore::new(DataSnapshot::new(header, records)))
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_quit_keys() {
        let d = Dashboard::new("t");
        assert_eq!(d.handle_event(&key(KeyCode::Esc, KeyModifiers::NONE)), Control::Quit);
        assert_eq!(
            d.handle_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Control::Quit
        );
        assert_eq!(
            d.handle_event(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Control::Continue
        );
        assert_eq!(d.handle_event(&Event::FocusGained), Control::Continue);
    }

    #[test]
    fn test_render_title_and_panels() {
        let mut d = Dashboard::new("Sales");
        let pie = Arc::new(PieChart::new());
        pie.set_values(&[1, 2], vec![Color::Red]).unwrap();
        d.push(pie, Some("share".into()));

        let area = Rect::new(0, 0, 80, 60);
        let mut buf = Buffer::empty(area);
        let failures = d.render(area, &mut buf);
        assert!(failures.is_empty());

        // 5% of 60 rows = 3: a bordered title row.
        assert!(row_text(&buf, 1).contains("Sales"));
        assert!(row_text(&buf, 3).contains("share"));
        assert!(painted(&buf).iter().any(|(_, _, _, c)| *c == Color::Red));
    }

    #[test]
    fn test_render_collects_failures() {
        let mut d = Dashboard::new("x");
        d.push(Arc::new(ScatterPlot::new()), None);
        d.push(Arc::new(Table::new(Vec::new(), Vec::new(), TableOptions::default()).unwrap()), None);

        let area = Rect::new(0, 0, 12, 6);
        let mut buf = Buffer::empty(area);
        let failures = d.render(area, &mut buf);
        let indices: Vec<usize> = failures.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1]);
        assert!(matches!(failures[1].1, Error::NoColumns));
    }

    #[test]
    fn test_from_config_builds_components_and_feeds() {
        let yaml = r"
title: Ops
widgets:
  - kind: scatter
    x_col: amount
    y_col: units
  - kind: bar
    value_col: amount
  - kind: radar
  - kind: funnel
  - kind: pie
    value_col: units
  - kind: table
    title: records
  - kind: gauge
  - kind: heatmap
";
        let config = DashboardConfig::parse(yaml).unwrap();
        let (dashboard, feeds) = Dashboard::from_config(&config, &store()).unwrap();

        assert_eq!(dashboard.len(), 6);
        assert_eq!(feeds.len(), 6);
        assert_eq!(dashboard.title(), "Ops");
        assert_eq!(feeds[5].name(), "records");
        assert_eq!(feeds[0].name(), "scatter#0");
        for feed in &feeds {
            feed.recompute().unwrap();
        }

        let kinds: Vec<ComponentKind> = (0..dashboard.len())
            .filter_map(|i| dashboard.component(i).map(|c| c.kind()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::Scatter,
                ComponentKind::Histogram,
                ComponentKind::Radar,
                ComponentKind::Funnel,
                ComponentKind::Pie,
                ComponentKind::Table,
            ]
        );

        let area = Rect::new(0, 0, 120, 80);
        let mut buf = Buffer::empty(area);
        assert!(dashboard.render(area, &mut buf).is_empty());
    }

    #[test]
    fn test_from_config_requires_columns() {
        let config = DashboardConfig::parse("widgets:\n  - kind: scatter\n    x_col: a\n").unwrap();
        let err = Dashboard::from_config(&config, &store()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref key, .. } if key == "widgets[0].y_col"));
    }

    #[test]
    fn test_mouse_routed_to_table() {
        let config = DashboardConfig::parse("widgets:\n  - kind: table\n").unwrap();
        let (dashboard, feeds) = Dashboard::from_config(&config, &store()).unwrap();
        feeds[0].recompute().unwrap();

        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        assert!(dashboard.render(area, &mut buf).is_empty());

        // Panel (0, 2, 50, 38); inside the border the pagination bar sits on
        // row 38 and "Next > " spans columns 42..49.
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 45,
            row: 38,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(dashboard.handle_event(&click), Control::Continue);

        let mut buf = Buffer::empty(area);
        dashboard.render(area, &mut buf);
        assert!(row_text(&buf, 38).contains("Page 2 of 3"));
    }

    #[test]
    fn test_key_events_not_routed() {
        let mut d = Dashboard::new("");
        let table = Arc::new(
            Table::new(Vec::new(), vec![vec!["a".into()]; 12], TableOptions::default()).unwrap(),
        );
        d.push(Arc::clone(&table) as Arc<dyn Component>, None);
        d.handle_event(&key(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(table.pagination().current_page, 0);
    }
}
