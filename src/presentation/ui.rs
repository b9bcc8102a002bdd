use super::theme::{Palette, brand_style, palette};
use crate::application::{App, AppMode, MapCamera, Screen};
use crate::domain::{Brand, DistanceOption, Position, Shop, distance_meters, format_miles};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap,
        canvas::{Canvas, Map, MapResolution},
    },
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let palette = palette(app.appearance);
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, &palette, chunks[0]);
    match app.screen() {
        Screen::PermissionPrompt => render_permission_prompt(f, &palette, chunks[1]),
        Screen::PermissionDenied => render_permission_denied(f, &palette, chunks[1]),
        Screen::AcquiringLocation => render_acquiring(f, app, &palette, chunks[1]),
        Screen::ShopList => render_shop_screen(f, app, &palette, chunks[1]),
    }
    render_status_bar(f, app, &palette, chunks[2]);

    if let Some(shop) = app.detail_shop() {
        render_detail_sheet(f, shop, app.position(), &palette);
    }
    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, &palette, app.help_scroll);
    }
    if app.is_prompting() {
        render_permission_dialog(f, &palette);
    }
}

fn render_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let header = Paragraph::new(format!(
        "CoffeeFinder | Appearance: {} | Location: {}",
        app.appearance,
        app.location.current_status()
    ))
    .style(palette.accent().add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}

fn render_message(f: &mut Frame, palette: &Palette, area: Rect, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16 + 4).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let message_area = Rect {
        x: area.x + area.width / 8,
        y: top,
        width: area.width - area.width / 4,
        height,
    };
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(palette.base());
    f.render_widget(widget, message_area);
}

fn render_permission_prompt(f: &mut Frame, palette: &Palette, area: Rect) {
    let lines = vec![
        Line::styled("◎", palette.accent().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled("Location Access Needed", palette.title()),
        Line::raw(""),
        Line::styled(
            "To find coffee shops near you, please allow CoffeeFinder to access your location.",
            palette.base(),
        ),
        Line::raw(""),
        Line::styled("[Enter] Allow Location Access", palette.selected()),
    ];
    render_message(f, palette, area, lines);
}

fn render_permission_denied(f: &mut Frame, palette: &Palette, area: Rect) {
    let lines = vec![
        Line::styled("⊘", Style::default().fg(palette.danger).add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled("Location Access Denied", palette.title()),
        Line::raw(""),
        Line::styled(
            "CoffeeFinder cannot show nearby coffee shops without location access. \
             Please enable location services for this app in Settings.",
            palette.base(),
        ),
        Line::raw(""),
        Line::styled("[o] Open Settings", palette.accent()),
    ];
    render_message(f, palette, area, lines);
}

fn render_acquiring(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mut lines = vec![
        Line::styled("Acquiring location...", palette.title()),
        Line::raw(""),
        Line::styled("⋯", palette.accent()),
    ];
    if let Some(error) = app.location.last_error() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(error.to_string(), palette.muted()));
    }
    render_message(f, palette, area, lines);
}

fn render_shop_screen(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_filters(f, app, palette, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let shops = app.visible_shops();
    render_shop_list(f, app, &shops, palette, body[0]);
    render_map(f, &app.camera, &shops, app.selected_index, app.position(), palette, body[1], "Map");
}

fn render_filters(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mut brand_spans = vec![Span::styled("Filter by Brand: ", palette.title())];
    for brand in Brand::ALL {
        let style = brand_style(brand);
        let label = format!(" {} {} ", style.key, brand);
        let chip = if app.selected_brands.contains(&brand) {
            palette.selected()
        } else {
            palette.muted()
        };
        brand_spans.push(Span::styled(label, chip));
        brand_spans.push(Span::raw(" "));
    }

    let distance = app.distance();
    let at_min = app.distance_index == 0;
    let at_max = app.distance_index + 1 >= DistanceOption::ALL.len();
    let distance_line = Line::from(vec![
        Span::styled("Distance: ", palette.title()),
        Span::styled(if at_min { "  " } else { "◀ " }, palette.muted()),
        Span::styled(distance.label, palette.accent().add_modifier(Modifier::BOLD)),
        Span::styled(if at_max { "  " } else { " ▶" }, palette.muted()),
        Span::styled("  (D/d)", palette.muted()),
    ]);

    let filters = Paragraph::new(vec![Line::from(brand_spans), distance_line])
        .block(Block::default().borders(Borders::ALL).title("Filters"))
        .style(palette.base());
    f.render_widget(filters, area);
}

fn render_shop_list(f: &mut Frame, app: &App, shops: &[Shop], palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Nearby Coffee ({})", shops.len()));

    if shops.is_empty() {
        let empty = Paragraph::new("No coffee shops found matching your criteria.")
            .block(block)
            .wrap(Wrap { trim: true })
            .style(palette.muted());
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Brand"),
        Cell::from("Address"),
        Cell::from("Distance"),
    ])
    .style(palette.muted().add_modifier(Modifier::BOLD));

    let visible_rows = area.height.saturating_sub(3) as usize;
    let first = app
        .selected_index
        .saturating_sub(visible_rows.saturating_sub(1));

    let rows: Vec<Row> = shops
        .iter()
        .enumerate()
        .skip(first)
        .map(|(i, shop)| {
            let brand = brand_style(shop.brand);
            let distance = app
                .position()
                .map(|p| format_miles(distance_meters(p, shop.position())))
                .unwrap_or_default();
            let style = if i == app.selected_index {
                palette.selected()
            } else {
                palette.base()
            };
            Row::new(vec![
                Cell::from(shop.name.clone()),
                Cell::from(shop.brand.to_string()).style(Style::default().fg(brand.color)),
                Cell::from(shop.address.clone().unwrap_or_default()),
                Cell::from(distance).style(palette.accent()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(11),
            Constraint::Min(10),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(1)
    .style(palette.base());

    f.render_widget(table, area);
}

#[allow(clippy::too_many_arguments)]
fn render_map(
    f: &mut Frame,
    camera: &MapCamera,
    shops: &[Shop],
    selected: usize,
    user: Option<Position>,
    palette: &Palette,
    area: Rect,
    title: &str,
) {
    let (x_bounds, y_bounds) = camera.bounds();
    let land = palette.muted;
    let accent = palette.accent;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({:.3}°)", title, camera.span_degrees)),
        )
        .marker(Marker::Braille)
        .background_color(palette.bg)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: land,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for (i, shop) in shops.iter().enumerate() {
                let brand = brand_style(shop.brand);
                let mut style = Style::default().fg(brand.color);
                if i == selected {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                ctx.print(shop.longitude, shop.latitude, Span::styled(brand.marker, style));
            }
            if let Some(user) = user {
                ctx.print(
                    user.longitude,
                    user.latitude,
                    Span::styled("◉", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_status_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let text = if app.is_prompting() {
        "y/Enter: Allow While Using App | n/Esc: Don't Allow".to_string()
    } else if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        match app.mode {
            AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
            AppMode::Detail => "g: Get Directions | Esc: back | ?: help".to_string(),
            AppMode::Normal => match app.screen() {
                Screen::PermissionPrompt => "Enter: allow location access | t: appearance | ?: help | q: quit".to_string(),
                Screen::PermissionDenied => "o: open settings | t: appearance | ?: help | q: quit".to_string(),
                Screen::AcquiringLocation => "Waiting for a location fix | t: appearance | ?: help | q: quit".to_string(),
                Screen::ShopList => "1-3: brands | d/D: distance | ↑↓: select | Enter: details | +/-: zoom | t: appearance | ?: help | q: quit".to_string(),
            },
        }
    };

    let style = match app.mode {
        AppMode::Normal => palette.base(),
        AppMode::Detail => palette.accent(),
        AppMode::Help => palette.accent(),
    };
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_detail_sheet(f: &mut Frame, shop: &Shop, user: Option<Position>, palette: &Palette) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };
    f.render_widget(Clear, popup_area);

    let brand = brand_style(shop.brand);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(shop.name.clone())
        .border_style(Style::default().fg(brand.color))
        .style(palette.base());
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(inner);

    let mut header = vec![
        Line::styled(brand.glyph, Style::default().fg(brand.color)),
        Line::styled(shop.name.clone(), palette.title()),
        Line::styled(shop.brand.to_string(), Style::default().fg(brand.color)),
    ];
    if let Some(user) = user {
        header.push(Line::styled(
            format!("{} away", format_miles(distance_meters(user, shop.position()))),
            palette.muted(),
        ));
    }
    f.render_widget(
        Paragraph::new(header).alignment(Alignment::Center).style(palette.base()),
        chunks[0],
    );

    let mini_map = MapCamera::detail(shop);
    render_map(f, &mini_map, std::slice::from_ref(shop), 0, user, palette, chunks[1], "Location");

    if let Some(address) = shop.address.as_deref().filter(|a| !a.is_empty()) {
        let address_box = Paragraph::new(vec![
            Line::styled(address.to_string(), palette.base()),
            Line::styled("[g] Get Directions", Style::default().fg(brand.color).add_modifier(Modifier::BOLD)),
        ])
        .block(Block::default().borders(Borders::ALL).title("Address"))
        .style(palette.base());
        f.render_widget(address_box, chunks[2]);
    }

    let details = Paragraph::new("More shop details coming soon (e.g., hours, amenities, user ratings).")
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true })
        .style(palette.muted());
    f.render_widget(details, chunks[3]);
}

fn render_permission_dialog(f: &mut Frame, palette: &Palette) {
    let area = f.area();
    let width = area.width.min(60);
    let height = area.height.min(8);
    let dialog_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    f.render_widget(Clear, dialog_area);

    let lines = vec![
        Line::styled("Allow \"CoffeeFinder\" to use your location?", palette.title()),
        Line::raw(""),
        Line::styled("Your location is used to find coffee shops near you.", palette.base()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[y] Allow While Using App", palette.selected()),
            Span::raw("   "),
            Span::styled("[n] Don't Allow", palette.accent()),
        ]),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Location"))
        .style(palette.base());
    f.render_widget(dialog, dialog_area);
}

fn render_help_popup(f: &mut Frame, palette: &Palette, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("CoffeeFinder Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(palette.accent()),
        )
        .style(palette.base());

    f.render_widget(help_widget, popup_area);
}

pub fn help_line_count() -> usize {
    get_help_text().lines().count()
}

fn get_help_text() -> &'static str {
    r#"COFFEEFINDER

Shows coffee shops near your current location, nearest first, in a list
and on a map.

=== LOCATION ACCESS ===
Enter           Ask for location access (first launch)
y / n           Answer the location permission dialog
o               Open Settings (turns location access on or off)
                Changes made in Settings are picked up automatically

=== FILTERS ===
1               Toggle Starbucks
2               Toggle Dutch Bros
3               Toggle Dunkin'
                With no brand selected, every brand is shown
d / D           Next / previous distance (1, 3, 5, 10, 20 miles)

=== LIST AND MAP ===
↑↓ or j/k       Move the selection
Enter           Open the shop details
+ / -           Zoom the map in / out
c               Center the map on your location

Map markers:    ● Starbucks   ▲ Dutch Bros   ■ Dunkin'   ◉ You

=== SHOP DETAILS ===
g               Get Directions (link copied to the clipboard)
Esc             Back to the list

=== APPEARANCE ===
t               Cycle System / Light / Dark
                Your choice is remembered between sessions

=== GENERAL ===
F1 or ?         Show this help (scroll with ↑↓, PgUp/PgDn, Home)
Esc/F1/?/q      Close this help window
q               Quit"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthorizationStatus;
    use crate::infrastructure::{SimulatedLocationService, SimulationConfig};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn app_with_status(status: AuthorizationStatus) -> App {
        App::new(
            SimulatedLocationService::new(SimulationConfig {
                initial_status: status,
                ..SimulationConfig::default()
            }),
            None,
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_permission_prompt() {
        let text = render(&App::default());
        assert!(text.contains("Location Access Needed"));
        assert!(text.contains("Allow Location Access"));
    }

    #[test]
    fn test_render_permission_dialog() {
        let mut app = App::default();
        app.start();
        let text = render(&app);
        assert!(text.contains("to use your location?"));
        assert!(text.contains("Don't Allow"));
    }

    #[test]
    fn test_render_denied() {
        let text = render(&app_with_status(AuthorizationStatus::Restricted));
        assert!(text.contains("Location Access Denied"));
        assert!(text.contains("Open Settings"));
    }

    #[test]
    fn test_render_acquiring() {
        let mut app = app_with_status(AuthorizationStatus::Granted);
        app.start();
        assert!(render(&app).contains("Acquiring location..."));
    }

    #[test]
    fn test_render_shop_list() {
        let mut app = app_with_status(AuthorizationStatus::Granted);
        app.start();
        app.tick(Instant::now());

        let text = render(&app);
        assert!(text.contains("Nearby Coffee (3)"));
        assert!(text.contains("Starbucks - Main St"));
        assert!(text.contains("Dunkin' - City Center"));
        assert!(text.contains("10 miles"));
        assert!(!text.contains("Riverwalk"));
    }

    #[test]
    fn test_render_empty_list() {
        let mut app = app_with_status(AuthorizationStatus::Granted);
        app.start();
        app.tick(Instant::now());
        app.directory = crate::domain::ShopDirectory::new(Vec::new());
        assert!(render(&app).contains("No coffee shops found matching your criteria."));
    }

    #[test]
    fn test_render_detail_sheet() {
        let mut app = app_with_status(AuthorizationStatus::Granted);
        app.start();
        app.tick(Instant::now());
        app.open_detail();

        let text = render(&app);
        assert!(text.contains("123 Main St, Los Angeles, CA"));
        assert!(text.contains("Get Directions"));
        assert!(text.contains("More shop details coming soon"));
    }

    #[test]
    fn test_render_help() {
        let mut app = App::default();
        app.show_help();
        assert!(render(&app).contains("CoffeeFinder Help"));
    }
}
