/// Diagnostic tool to verify input → sort → layout pipeline
use squarify_rs::layout::{
    compute_layout, normalize_sizes, padded_squarify, LayoutConfig, Rect, RectKind,
};
use squarify_rs::render::{label_candidates, paint, paint_values, Fill};
use squarify_rs::tree::{sort_nested, NodeId, NodeInput, Tree};
use std::path::{Path, PathBuf};

const DEMO_VALUES: [f64; 6] = [500.0, 433.0, 78.0, 25.0, 25.0, 7.0];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("squarify_rs=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next().filter(|a| a != "-").map(PathBuf::from);
    let width: f64 = args.next().map(|a| a.parse::<f64>()).transpose()?.unwrap_or(700.0);
    let height: f64 = args.next().map(|a| a.parse::<f64>()).transpose()?.unwrap_or(433.0);
    let padding: f64 = args.next().map(|a| a.parse::<f64>()).transpose()?.unwrap_or(0.0);
    let metric = args.next();

    println!("=== DIAGNOSTIC: Input → Layout Pipeline ===");
    println!("Region: {:.1}x{:.1}, padding {:.2}", width, height, padding);

    match input {
        Some(path) => run_nested(&path, metric.as_deref(), width, height, padding),
        None => run_flat(width, height, padding),
    }
}

fn run_flat(width: f64, height: f64, padding: f64) -> anyhow::Result<()> {
    println!("\n[1] Demo values: {:?}", DEMO_VALUES);

    let normalized = normalize_sizes(&DEMO_VALUES, width, height)?;
    let rects = padded_squarify(&normalized, 0.0, 0.0, width, height, padding)?;

    // Shade by share of the total, the way a plotting front-end would.
    let total: f64 = DEMO_VALUES.iter().sum();
    let painted = paint_values(&DEMO_VALUES, &rects, |_, v| Fill::new((), (v / total) as f32));

    println!("\n[2] Rectangles:");
    for (i, (value, (rect, fill))) in DEMO_VALUES.iter().zip(&painted).enumerate() {
        print_rect(i, &format!("{value} @ {:.2}", fill.opacity), rect);
    }

    report_coverage(rects.iter().map(Rect::area).sum(), width * height);
    Ok(())
}

fn run_nested(
    path: &Path,
    metric: Option<&str>,
    width: f64,
    height: f64,
    padding: f64,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let inputs: Vec<NodeInput> = serde_json::from_str(&text)?;

    let mut tree = Tree::from_input(&inputs)?;
    println!("\n[1] Tree built: {} nodes, {} top-level", tree.len(), tree.roots.len());
    if let Some(metric) = metric {
        tree.use_metric(metric)?;
        println!("    Weighted by metric '{}'", metric);
    }

    sort_nested(&mut tree);
    let config = LayoutConfig {
        parallel: tree.len() > 10_000,
        ..LayoutConfig::with_padding(padding)
    };
    let layout = compute_layout(&tree, Rect::new(0.0, 0.0, width, height), &config)?;
    println!("\n[2] Layout computed: {} rectangles", layout.len());

    println!("\n[3] Top-level rectangles:");
    for (i, &id) in tree.roots.iter().enumerate().take(10) {
        if let Some(rect) = layout.rect(id) {
            print_rect(i, &tree.get(id).label, &rect);
        }
    }

    // Check for anomalies
    println!("\n[4] Checking for anomalies:");
    let sums = tree.nested_sums();
    let mut anomalies = 0usize;
    for (idx, node) in tree.nodes.iter().enumerate() {
        if !node.has_children() {
            continue;
        }
        let id = NodeId(idx as u32);
        let Some(parent) = layout.get(id) else {
            continue;
        };
        let expected = parent.rect.inset(&config.insets).area();
        let mut covered: f64 = tree
            .children(id)
            .filter_map(|c| layout.get(c))
            .map(|r| r.slot.area())
            .sum();
        if let Some(&ri) = layout.remainder_to_rect.get(&id) {
            covered += layout.rects[ri].slot.area();
        }
        let reached = tree.children(id).any(|c| layout.get(c).is_some());
        if reached && sums[idx] > 0.0 && (covered - expected).abs() > 1e-6 * expected.max(1.0) {
            anomalies += 1;
            println!(
                "    '{}': children cover {:.3} of {:.3}",
                node.label, covered, expected
            );
        }
    }
    println!("    {} anomalies", anomalies);

    let remainders = layout
        .rects
        .iter()
        .filter(|r| matches!(r.kind, RectKind::Remainder(_)))
        .count();
    println!("    {} remainder rectangles", remainders);

    let top_area: f64 = tree
        .roots
        .iter()
        .filter_map(|&id| layout.get(id))
        .map(|r| r.slot.area())
        .sum();
    report_coverage(top_area, width * height);

    let painted = paint(&tree, &layout, |item| {
        let opacity = if item.is_remainder() { 0.3 } else { 1.0 };
        Fill::new(item.depth, opacity)
    });
    println!("\n[5] Label candidates:");
    for (i, p) in label_candidates(&painted, 70.0, 20.0, 24).into_iter().enumerate() {
        let label = p.label.as_deref().unwrap_or_default();
        print_rect(i, &format!("{label} (depth {})", p.fill.color), &p.rect);
    }
    Ok(())
}

fn print_rect(i: usize, label: &str, rect: &Rect) {
    let (cx, cy) = rect.center();
    println!(
        "    [{}] '{}' - rect: {:.3}x{:.3} at ({:.3}, {:.3}) - center ({:.1}, {:.1}) - aspect {:.2}",
        i,
        label,
        rect.dx,
        rect.dy,
        rect.x,
        rect.y,
        cx,
        cy,
        rect.aspect_ratio()
    );
}

fn report_coverage(area_sum: f64, region_area: f64) {
    println!("\n    Total rect area: {:.3}", area_sum);
    println!("    Region area:     {:.3}", region_area);
    println!("    Coverage: {:.2}%", (area_sum / region_area) * 100.0);
}
