use {
    crate::{
        aggregator_core::{Counted, SummaryTables},
        state::DashboardState,
        ui::renderer::{axis_bounds, daily_points, format_count, indexed_points, range_label, ranked_bars, short_month},
    },
    ratatui::{
        layout::{Alignment, Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        symbols::Marker,
        text::{Line, Span},
        widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph},
        Frame,
    },
};

/// Render the main UI layout
pub fn render_layout(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Charts
            Constraint::Length(3), // Footer/Keys
        ])
        .split(area);

    render_header(f, chunks[0], state);

    let summaries = state.summaries();
    if summaries.is_empty() {
        render_no_data(f, chunks[1]);
    } else {
        render_charts(f, chunks[1], summaries, state.top_n());
    }

    render_footer(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let range = range_label(state.range());

    let text = vec![
        Line::from(vec![
            Span::styled("orderscope", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" - E-Commerce Order Dashboard"),
        ]),
        Line::from(vec![
            Span::styled("Range: ", Style::default().fg(Color::Yellow)),
            Span::raw(range),
            Span::raw(" | "),
            Span::styled("Months: ", Style::default().fg(Color::Yellow)),
            Span::raw(state.grouping().as_str()),
            Span::raw(" | "),
            Span::styled("Rows loaded: ", Style::default().fg(Color::Yellow)),
            Span::raw(format_count(state.total_rows())),
        ]),
    ];

    let header = Block::default().borders(Borders::ALL).title("Dashboard");
    f.render_widget(Paragraph::new(text).block(header), area);
}

fn render_no_data(f: &mut Frame, area: Rect) {
    let text = Paragraph::new("No data in selected range")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(text, area);
}

fn render_charts(f: &mut Frame, area: Rect, summaries: &SummaryTables, top_n: usize) {
    let rows = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34), // Daily orders + metric
            Constraint::Percentage(33), // Monthly trends
            Constraint::Percentage(33), // Top states / cities
        ])
        .split(area);

    let daily = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(22)])
        .split(rows[0]);
    render_daily_orders(f, daily[0], summaries);
    render_total_orders(f, daily[1], summaries);

    let monthly = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_monthly_series(
        f,
        monthly[0],
        "Customers per Month",
        &summaries.monthly_customers,
        Color::LightBlue,
    );
    render_monthly_series(f, monthly[1], "Orders per Month", &summaries.monthly_orders, Color::Green);

    let ranked = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    render_ranked(
        f,
        ranked[0],
        &format!("Top {} States by Customers", top_n),
        &summaries.state_customers,
        top_n,
    );
    render_ranked(
        f,
        ranked[1],
        &format!("Top {} Cities by Customers", top_n),
        &summaries.city_customers,
        top_n,
    );
}

fn render_daily_orders(f: &mut Frame, area: Rect, summaries: &SummaryTables) {
    let points = daily_points(&summaries.daily_orders);
    let x_max = points.last().map(|p| p.0).unwrap_or(0.0).max(1.0);
    let y_bounds = axis_bounds(points.iter().map(|p| p.1));

    let (first, last) = match (summaries.daily_orders.first(), summaries.daily_orders.last()) {
        (Some(a), Some(b)) => (a.day.to_string(), b.day.to_string()),
        _ => (String::new(), String::new()),
    };

    let dataset = Dataset::default()
        .name("orders")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title("Daily Orders"))
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(vec![Span::raw("0"), Span::raw(format_count(y_bounds[1] as usize))]),
        );

    f.render_widget(chart, area);
}

fn render_total_orders(f: &mut Frame, area: Rect, summaries: &SummaryTables) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format_count(summaries.total_orders()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];
    let metric = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Total orders"));
    f.render_widget(metric, area);
}

fn render_monthly_series<T: Counted>(f: &mut Frame, area: Rect, title: &str, rows: &[T], color: Color) {
    let points = indexed_points(rows);
    let x_max = (rows.len().saturating_sub(1) as f64).max(1.0);
    let y_bounds = axis_bounds(points.iter().map(|p| p.1));

    let x_labels = match (rows.first(), rows.last()) {
        (Some(a), Some(b)) => vec![Span::raw(short_month(a.key())), Span::raw(short_month(b.key()))],
        _ => Vec::new(),
    };

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .x_axis(Axis::default().bounds([0.0, x_max]).labels(x_labels))
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(vec![Span::raw("0"), Span::raw(format_count(y_bounds[1] as usize))]),
        );

    f.render_widget(chart, area);
}

fn render_ranked<T: Counted>(f: &mut Frame, area: Rect, title: &str, rows: &[T], top_n: usize) {
    let bars = ranked_bars(rows, top_n);
    let data: Vec<(&str, u64)> = bars.iter().map(|(label, value)| (label.as_str(), *value)).collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::LightBlue))
        .value_style(Style::default().fg(Color::Black).bg(Color::LightBlue))
        .data(data.as_slice());

    f.render_widget(chart, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let text = vec![Line::from(vec![
        key("[ ]"),
        Span::raw(" start ±1d | "),
        key("{ }"),
        Span::raw(" end ±1d | "),
        key("r"),
        Span::raw(" reset | "),
        key("g"),
        Span::raw(" month grouping | "),
        key("q"),
        Span::raw(" quit"),
    ])];

    let footer = Block::default().borders(Borders::ALL).title("Keys");
    f.render_widget(Paragraph::new(text).block(footer), area);
}
