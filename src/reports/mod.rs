use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use fengshui::api::LayoutAnalysis;
use fengshui::catalog::ObjectCatalog;
use fengshui::geometry::{placement_rect, Grid, Placement};
use fengshui::optimizer::runner::{OptimizationResult, SearchStrategy};
use fengshui::scorer::ScoreDetails;
use std::time::Duration;

// Widest room map we print, in characters.
const MAP_COLUMNS: i32 = 48;

fn score_color(v: f32) -> Color {
    if v > 0.0 {
        Color::Green
    } else if v < 0.0 {
        Color::Red
    } else {
        Color::Reset
    }
}

pub fn print_catalog(catalog: &ObjectCatalog) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("Category"),
        Cell::new("Width"),
        Cell::new("Height"),
        Cell::new("Icon"),
    ]);
    for i in 2..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (kind, spec) in &catalog.objects {
        table.add_row(vec![
            Cell::new(kind).add_attribute(Attribute::Bold),
            Cell::new(spec.category.to_string()),
            Cell::new(spec.width),
            Cell::new(spec.height),
            Cell::new(spec.icon.as_deref().unwrap_or("-")),
        ]);
    }
    println!("\n{}", table);
    println!(
        "1 cell = {} {} (display only)",
        catalog.grid_cell_size, catalog.units
    );
}

pub fn print_placements(catalog: &ObjectCatalog, grid: Grid, placements: &[Placement]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Type").add_attribute(Attribute::Bold),
        Cell::new("X"),
        Cell::new("Y"),
        Cell::new("Size"),
        Cell::new("Valid"),
    ]);
    for i in [0, 2, 3] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (i, p) in placements.iter().enumerate() {
        let size = if catalog.is_boundary(&p.kind) {
            format!("span {}", catalog.boundary_span(&p.kind))
        } else {
            let (w, h) = catalog.footprint(&p.kind);
            format!("{}x{}", w, h)
        };
        let valid = fengshui::geometry::is_position_valid(catalog, grid, p.x, p.y, &p.kind);
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&p.kind).add_attribute(Attribute::Bold),
            Cell::new(p.x),
            Cell::new(p.y),
            Cell::new(size),
            if valid {
                Cell::new("yes").fg(Color::Green)
            } else {
                Cell::new("no").fg(Color::Red)
            },
        ]);
    }
    println!("\nLayout ({}x{}):", grid.width, grid.height);
    println!("{}", table);
}

/// Downsampled ASCII plan. Furniture shows its first letter, boundaries
/// an upper-case letter on the wall.
pub fn print_room_map(catalog: &ObjectCatalog, grid: Grid, placements: &[Placement]) {
    let scale = ((grid.width + MAP_COLUMNS - 1) / MAP_COLUMNS).max(1);
    let cols = ((grid.width + scale - 1) / scale) as usize;
    // Terminal cells are about twice as tall as wide
    let rows = ((grid.height + 2 * scale - 1) / (2 * scale)).max(1) as usize;
    let mut canvas = vec![vec!['.'; cols]; rows];

    let to_cell = |x: i32, y: i32| -> Option<(usize, usize)> {
        if !grid.in_bounds(x, y) {
            return None;
        }
        Some(((y / (2 * scale)) as usize, (x / scale) as usize))
    };

    for p in placements {
        let label = p.kind.chars().next().unwrap_or('?');
        if catalog.is_boundary(&p.kind) {
            if let Some((r, c)) = to_cell(p.x, p.y) {
                canvas[r][c] = label.to_ascii_uppercase();
            }
            continue;
        }
        for (x, y) in placement_rect(catalog, p).cells() {
            if let Some((r, c)) = to_cell(x, y) {
                canvas[r][c] = label.to_ascii_lowercase();
            }
        }
    }

    println!("\nRoom map (1 char = {}x{} cells):", scale, 2 * scale);
    println!("+{}+", "-".repeat(cols));
    for row in canvas {
        println!("|{}|", row.into_iter().collect::<String>());
    }
    println!("+{}+", "-".repeat(cols));
}

pub fn print_breakdown(d: &ScoreDetails) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Term").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (name, value) in d.terms() {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.2}", value)).fg(score_color(value)),
        ]);
    }

    let named = [
        ("  floating", d.pen_floating),
        ("  corner", d.bonus_corner),
        ("  bed in corner", d.pen_bed_corner),
        ("  door at bed foot", d.pen_door_bed_foot),
        ("  window near door", d.pen_window_door),
        ("  bed under window", d.pen_bed_window),
        ("  door facing bed", d.pen_door_facing_bed),
        ("  door clearance", d.pen_door_clearance),
    ];
    for (name, value) in named.into_iter().filter(|(_, v)| *v != 0.0) {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.2}", value)).fg(score_color(value)),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", d.layout_score))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    println!("\n{}", table);

    if let Some(v) = d.violation {
        println!("Hard violation: {}", v);
    }
    println!("Score: {:.2}", d.layout_score);
}

pub fn print_zone_analysis(analysis: &LayoutAnalysis) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Zone").add_attribute(Attribute::Bold),
        Cell::new("Objects"),
        Cell::new("Weight"),
        Cell::new("Score"),
    ]);
    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (zone, entry) in &analysis.zone_analysis {
        let count = Cell::new(entry.count);
        table.add_row(vec![
            Cell::new(zone.to_string()),
            if entry.count > 0 {
                count.fg(Color::Green)
            } else {
                count
            },
            Cell::new(format!("{:.0}", entry.weight)),
            Cell::new(format!("{:.0}", entry.score)),
        ]);
    }
    println!("\n{}", table);
    println!(
        "Energy flow: command position {:.2}, chi flow {:.2}",
        analysis.energy_flow.command_position, analysis.energy_flow.chi_flow
    );
}

pub fn print_recommendations(recs: &[String]) {
    if recs.is_empty() {
        println!("\nNo recommendations.");
        return;
    }
    println!("\nRecommendations:");
    for r in recs {
        println!("  - {}", r);
    }
}

pub fn print_search_summary(result: &OptimizationResult, elapsed: Duration) {
    let strategy = match result.strategy {
        SearchStrategy::Annealed => "annealed".to_string(),
        SearchStrategy::Reduced { dropped } => format!("reduced (dropped {})", dropped),
        SearchStrategy::Fallback => "fallback layout".to_string(),
    };
    println!(
        "\nSearch: {} iterations, {} in {:.2?} (seed score {:.2} -> {:.2})",
        result.iterations, strategy, elapsed, result.initial_score, result.score
    );
}
