//! Renders the rows of the active view as a chart or table.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
        Row, Table,
    },
    Frame,
};

use super::theme::Theme;
use crate::data::{CircuitLocation, QualifyingRow, RaceResultRow, SprintResultRow};
use crate::views::{View, ViewData};

/// Race-count tiers for circuit markers; bigger markers for busier circuits
const CIRCUIT_TIERS: [(usize, &str, Marker); 3] = [
    (30, "30+ races", Marker::Block),
    (10, "10-29 races", Marker::Dot),
    (0, "1-9 races", Marker::Braille),
];

/// Axis titles and plot type for an x/y chart
struct XyPlot<'a> {
    x_title: &'a str,
    y_title: &'a str,
    graph_type: GraphType,
    x_bounds: Option<[f64; 2]>,
    y_bounds: Option<[f64; 2]>,
    /// Draw smaller y values on top
    y_reversed: bool,
}

/// One plotted series with an optional legend entry
struct Series {
    name: Option<String>,
    marker: Marker,
    points: Vec<(f64, f64)>,
}

impl Series {
    fn single(points: Vec<(f64, f64)>) -> Vec<Series> {
        vec![Series {
            name: None,
            marker: Marker::Braille,
            points,
        }]
    }
}

/// Main content panel showing the selected view
pub struct ViewPanel<'a> {
    view: View,
    data: &'a ViewData,
    subtitle: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> ViewPanel<'a> {
    pub fn new(view: View, data: &'a ViewData, subtitle: Option<&'a str>, theme: &'a Theme) -> Self {
        ViewPanel {
            view,
            data,
            subtitle,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (border_style, _) = self.theme.panel_styles(focused);
        let title = match self.subtitle {
            Some(sub) => format!(" {} - {sub} ", self.view.title()),
            None => format!(" {} ", self.view.title()),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .title_style(self.theme.title_style());

        if self.data.is_empty() {
            self.render_empty(frame, area, block);
            return;
        }

        match self.data {
            ViewData::DriverStandings(rows) => {
                let bars = rows
                    .iter()
                    .map(|r| (r.driver_label.clone(), r.points.unwrap_or(0.0)))
                    .collect();
                self.render_bars(frame, area, block, bars);
            }
            ViewData::ConstructorStandings(rows) => {
                let bars = rows
                    .iter()
                    .map(|r| (r.label(), r.points.unwrap_or(0.0)))
                    .collect();
                self.render_bars(frame, area, block, bars);
            }
            ViewData::RaceResults(rows) => self.render_results(frame, area, block, rows),
            ViewData::StatusCounts(rows) => {
                let bars = rows
                    .iter()
                    .map(|r| (r.status_text.clone(), r.count as f64))
                    .collect();
                self.render_bars(frame, area, block, bars);
            }
            ViewData::LapTimes(rows) => {
                let points: Vec<(f64, f64)> = rows
                    .iter()
                    .filter_map(|l| Some((l.lap? as f64, l.milliseconds? as f64 / 1000.0)))
                    .collect();
                let plot = XyPlot {
                    x_title: "lap",
                    y_title: "seconds",
                    graph_type: GraphType::Line,
                    x_bounds: None,
                    y_bounds: None,
                    y_reversed: false,
                };
                self.render_xy(frame, area, block, Series::single(points), plot);
            }
            ViewData::PitStops(rows) => {
                let points: Vec<(f64, f64)> = rows
                    .iter()
                    .filter_map(|p| Some((p.lap? as f64, p.milliseconds? as f64 / 1000.0)))
                    .collect();
                let plot = XyPlot {
                    x_title: "lap",
                    y_title: "seconds",
                    graph_type: GraphType::Scatter,
                    x_bounds: None,
                    y_bounds: None,
                    y_reversed: false,
                };
                self.render_xy(frame, area, block, Series::single(points), plot);
            }
            ViewData::PitStopCounts(rows) => {
                let bars = rows
                    .iter()
                    .map(|r| (r.driver_label.clone(), r.pit_count as f64))
                    .collect();
                self.render_bars(frame, area, block, bars);
            }
            ViewData::Sprint(rows) => self.render_bars(frame, area, block, sprint_bars(rows)),
            ViewData::Qualifying(rows) => self.render_qualifying(frame, area, block, rows),
            ViewData::RacesPerSeason(rows) => {
                let points: Vec<(f64, f64)> = rows
                    .iter()
                    .map(|r| (r.year as f64, r.race_count as f64))
                    .collect();
                let plot = XyPlot {
                    x_title: "season",
                    y_title: "races",
                    graph_type: GraphType::Line,
                    x_bounds: None,
                    y_bounds: None,
                    y_reversed: false,
                };
                self.render_xy(frame, area, block, Series::single(points), plot);
            }
            ViewData::RacesByCountry(rows) => {
                let bars = rows
                    .iter()
                    .map(|r| (r.country.clone(), r.race_count as f64))
                    .collect();
                self.render_bars(frame, area, block, bars);
            }
            ViewData::Circuits(rows) => {
                let plot = XyPlot {
                    x_title: "longitude",
                    y_title: "latitude",
                    graph_type: GraphType::Scatter,
                    x_bounds: Some([-180.0, 180.0]),
                    y_bounds: Some([-90.0, 90.0]),
                    y_reversed: false,
                };
                self.render_xy(frame, area, block, circuit_series(rows), plot);
            }
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, block: Block) {
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let message = Paragraph::new("No data available")
            .style(Style::default().add_modifier(Modifier::DIM))
            .alignment(Alignment::Center);

        frame.render_widget(message, inner);
    }

    /// Horizontal bar chart, one bar per (label, value)
    fn render_bars(&self, frame: &mut Frame, area: Rect, block: Block, values: Vec<(String, f64)>) {
        let bars: Vec<Bar> = values
            .into_iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::default()
                    .label(Line::from(label))
                    .value(value.max(0.0).round() as u64)
                    .text_value(format_value(value))
                    .style(Style::default().fg(self.theme.chart_color(i)))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .label_style(self.theme.normal_style())
            .value_style(self.theme.highlight_style())
            .data(BarGroup::default().bars(&bars));

        frame.render_widget(chart, area);
    }

    fn render_xy(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block,
        mut series: Vec<Series>,
        plot: XyPlot,
    ) {
        // Chart y grows upward, so negate to put small values on top
        if plot.y_reversed {
            for s in &mut series {
                for point in &mut s.points {
                    point.1 = -point.1;
                }
            }
        }
        let y_label = |v: f64| format_value(if plot.y_reversed { -v } else { v });

        let all_points: Vec<(f64, f64)> =
            series.iter().flat_map(|s| s.points.iter().copied()).collect();
        let (data_x, data_y) = bounds(&all_points);
        let [x_min, x_max] = plot.x_bounds.unwrap_or(data_x);
        let [y_min, y_max] = plot.y_bounds.unwrap_or(data_y);

        let datasets: Vec<Dataset> = series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let dataset = Dataset::default()
                    .marker(s.marker)
                    .graph_type(plot.graph_type)
                    .style(Style::default().fg(self.theme.chart_color(i)))
                    .data(&s.points);
                match &s.name {
                    Some(name) => dataset.name(name.clone()),
                    None => dataset,
                }
            })
            .collect();

        let x_labels = vec![
            Span::raw(format_value(x_min)),
            Span::raw(format_value((x_min + x_max) / 2.0)),
            Span::raw(format_value(x_max)),
        ];
        let y_labels = vec![
            Span::raw(y_label(y_min)),
            Span::raw(y_label((y_min + y_max) / 2.0)),
            Span::raw(y_label(y_max)),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        plot.x_title,
                        Style::default().add_modifier(Modifier::DIM),
                    ))
                    .style(self.theme.normal_style())
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        plot.y_title,
                        Style::default().add_modifier(Modifier::DIM),
                    ))
                    .style(self.theme.normal_style())
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }

    /// Classification table beside a grid-vs-finish scatter
    fn render_results(&self, frame: &mut Frame, area: Rect, block: Block, rows: &[RaceResultRow]) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        self.render_results_table(frame, chunks[0], block, rows);

        let (border_style, _) = self.theme.panel_styles(false);
        let scatter_block = Block::default()
            .title(" Grid vs Finish ")
            .borders(Borders::ALL)
            .border_style(border_style)
            .title_style(self.theme.title_style());
        let plot = XyPlot {
            x_title: "grid",
            y_title: "finish",
            graph_type: GraphType::Scatter,
            x_bounds: None,
            y_bounds: None,
            y_reversed: true,
        };
        let series = Series::single(grid_vs_finish(rows));
        self.render_xy(frame, chunks[1], scatter_block, series, plot);
    }

    /// Classification table, ordered by finishing position
    fn render_results_table(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block,
        rows: &[RaceResultRow],
    ) {
        let mut ordered: Vec<&RaceResultRow> = rows.iter().collect();
        ordered.sort_by_key(|r| r.position_order.unwrap_or(i64::MAX));

        let body: Vec<Row> = ordered
            .into_iter()
            .map(|r| {
                let status = r.status_display();
                let status_style = self.theme.outcome_style(&status);
                Row::new(vec![
                    Cell::from(opt(r.position_order)),
                    Cell::from(r.driver_label.clone()),
                    Cell::from(r.constructor_name.clone().unwrap_or_default()),
                    Cell::from(opt(r.grid)),
                    Cell::from(r.points.map(format_value).unwrap_or_default()),
                    Cell::from(opt(r.laps)),
                    Cell::from(status).style(status_style),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(14),
            Constraint::Min(12),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Min(10),
        ];
        let header = ["Pos", "Driver", "Constructor", "Grid", "Points", "Laps", "Status"];
        self.render_table(frame, area, block, &header, body, &widths);
    }

    fn render_qualifying(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block,
        rows: &[QualifyingRow],
    ) {
        let body: Vec<Row> = rows
            .iter()
            .map(|q| {
                Row::new(vec![
                    Cell::from(opt(q.position)),
                    Cell::from(q.driver_label.clone()),
                    Cell::from(q.constructor_name.clone().unwrap_or_default()),
                    Cell::from(q.q1.clone().unwrap_or_default()),
                    Cell::from(q.q2.clone().unwrap_or_default()),
                    Cell::from(q.q3.clone().unwrap_or_default()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(14),
            Constraint::Min(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
        ];
        let header = ["Pos", "Driver", "Constructor", "Q1", "Q2", "Q3"];
        self.render_table(frame, area, block, &header, body, &widths);
    }

    fn render_table(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block,
        header: &[&str],
        body: Vec<Row>,
        widths: &[Constraint],
    ) {
        let header = Row::new(header.iter().map(|h| Cell::from(*h)))
            .style(self.theme.title_style())
            .bottom_margin(1);

        let table = Table::new(body, widths.iter().copied())
            .header(header)
            .style(self.theme.normal_style())
            .block(block);

        frame.render_widget(table, area);
    }
}

/// (grid, finishing position) per classified driver
fn grid_vs_finish(rows: &[RaceResultRow]) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|r| Some((r.grid? as f64, r.position_order? as f64)))
        .collect()
}

/// Sprint points per driver, kept in classification order
fn sprint_bars(rows: &[SprintResultRow]) -> Vec<(String, f64)> {
    rows.iter()
        .map(|r| (r.driver_label.clone(), r.points.unwrap_or(0.0)))
        .collect()
}

/// Circuit markers split into race-count tiers, busiest first
fn circuit_series(rows: &[CircuitLocation]) -> Vec<Series> {
    let mut series: Vec<Series> = CIRCUIT_TIERS
        .iter()
        .map(|&(_, name, marker)| Series {
            name: Some(name.to_string()),
            marker,
            points: Vec::new(),
        })
        .collect();

    for c in rows {
        let tier = CIRCUIT_TIERS
            .iter()
            .position(|&(min, _, _)| c.race_count >= min)
            .unwrap_or(CIRCUIT_TIERS.len() - 1);
        series[tier].points.push((c.lng, c.lat));
    }

    series.retain(|s| !s.points.is_empty());
    series
}

/// Data bounds padded so flat or single-point series still render
fn bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;

    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if points.is_empty() {
        return ([0.0, 1.0], [0.0, 1.0]);
    }
    if x_min >= x_max {
        x_max = x_min + 1.0;
    }
    if y_min >= y_max {
        y_max = y_min + 1.0;
    }

    let y_pad = (y_max - y_min) * 0.05;
    ([x_min, x_max], [y_min - y_pad, y_max + y_pad])
}

fn opt(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Format a value for display on axis labels and bars
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{value:.0}")
    } else if value.abs() >= 1000.0 {
        format!("{value:.2e}")
    } else {
        format!("{value:.2}")
    }
}
