use super::{FrequencyTable, CHART_THRESHOLD};
use crate::error::{SampPickError, SpResult};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle, FontTransform};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

const FONT_FAMILY: &str = "sans-serif";
const FONT_ENV: &str = "SAMPPICK_FONT";
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// Accent-like qualitative colors.
const PALETTE: [RGBColor; 4] = [
    RGBColor(127, 201, 127),
    RGBColor(190, 174, 212),
    RGBColor(253, 192, 134),
    RGBColor(56, 108, 176),
];

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Registers a system TrueType font for chart text, once per process.
/// Returns false when none could be found.
fn ensure_font() -> bool {
    *FONT_READY.get_or_init(|| {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(p) = std::env::var_os(FONT_ENV) {
            candidates.push(PathBuf::from(p));
        }
        candidates.extend(FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if register_font(FONT_FAMILY, FontStyle::Normal, bytes).is_ok() {
                debug!("Chart font: {}", path.display());
                return true;
            }
        }
        warn!(
            "⚠️  No TrueType font found (set {} to a .ttf file); the chart will have no labels.",
            FONT_ENV
        );
        false
    })
}

fn chart_err<E: std::fmt::Display>(e: E) -> SampPickError {
    SampPickError::Chart(e.to_string())
}

/// Grouped bar chart of every table column for rows above
/// [`CHART_THRESHOLD`], one group per allele in allele-code order.
pub fn render_bar_chart(path: &Path, table: &FrequencyTable) -> SpResult<()> {
    let rows = table.chart_rows(CHART_THRESHOLD);
    let columns = table.columns();
    let labeled = ensure_font();

    // Each allele takes one slot per column plus a gap slot.
    let group = columns.len() + 1;
    let slots = (rows.len() * group).max(1);
    let label_slot = columns.len() / 2;
    let y_max = rows
        .iter()
        .flat_map(|(_, vals)| vals.iter().copied())
        .fold(0.0_f64, f64::max)
        .max(0.05)
        * 1.1;

    let root = BitMapBackend::new(path, (1600, 1000)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if labeled {
        builder.x_label_area_size(140).y_label_area_size(80);
    }
    let mut chart = builder
        .build_cartesian_2d((0..slots).into_segmented(), 0.0..y_max)
        .map_err(chart_err)?;

    if labeled {
        let formatter = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) if i % group == label_slot => rows
                .get(i / group)
                .map(|(allele, _)| allele.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_label_formatter(&formatter)
            .x_label_style((FONT_FAMILY, 14).into_font().transform(FontTransform::Rotate90))
            .y_desc("Frequency in Population")
            .axis_desc_style((FONT_FAMILY, 18))
            .draw()
            .map_err(chart_err)?;
    }

    for (j, column) in columns.iter().enumerate() {
        let color = PALETTE[j % PALETTE.len()];
        let bars = rows.iter().enumerate().map(|(i, (_, vals))| {
            let slot = i * group + j;
            Rectangle::new(
                [
                    (SegmentValue::Exact(slot), 0.0),
                    (SegmentValue::Exact(slot + 1), vals[j]),
                ],
                color.filled(),
            )
        });
        let series = chart.draw_series(bars).map_err(chart_err)?;
        if labeled {
            series.label(column.label.clone()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
            });
        }
    }

    if labeled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT_FAMILY, 16))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(chart_err)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}
