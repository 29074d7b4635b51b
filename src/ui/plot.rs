use eframe::egui::{
    Align2, Color32, CornerRadius, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui, Vec2,
};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::chart::spec::{ChartData, ChartSpec, HistogramBin, PieSlice};
use crate::color;

// ---------------------------------------------------------------------------
// Chart rendering – one entry point per spec, dispatch on the data kind
// ---------------------------------------------------------------------------

/// Render a chart spec at its configured size, title first.
pub fn chart(ui: &mut Ui, spec: &ChartSpec) {
    let accent = color::color32(&spec.style.accent);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(&spec.style.title)
                .color(accent)
                .size(24.0)
                .strong(),
        );
    });

    if spec.is_empty() {
        empty_chart(ui, spec);
        return;
    }

    match &spec.data {
        ChartData::Line { points } => line_chart(ui, spec, points),
        ChartData::Bars { categories, values } => bar_chart(ui, spec, categories, values),
        ChartData::Histogram { bins } => histogram(ui, spec, bins),
        ChartData::Pie { slices } => pie(ui, spec, slices),
    }
}

/// Placeholder panel for a selection that matched no rows.
fn empty_chart(ui: &mut Ui, spec: &ChartSpec) {
    let size = Vec2::new(spec.style.width, spec.style.height);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    painter.rect_filled(
        response.rect,
        CornerRadius::same(4),
        color::color32(&spec.style.background),
    );
    painter.text(
        response.rect.center(),
        Align2::CENTER_CENTER,
        "No data for this selection",
        FontId::proportional(16.0),
        Color32::GRAY,
    );
}

fn line_chart(ui: &mut Ui, spec: &ChartSpec, points: &[[f64; 2]]) {
    let accent = color::color32(&spec.style.accent);
    let series: PlotPoints = points.to_vec().into();

    let mut plot = Plot::new("tuition_line")
        .width(spec.style.width)
        .height(spec.style.height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true);
    if let Some(x) = &spec.style.x_label {
        plot = plot.x_axis_label(RichText::new(x).color(accent).size(16.0));
    }
    if let Some(y) = &spec.style.y_label {
        plot = plot.y_axis_label(RichText::new(y).color(accent).size(16.0));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.line(Line::new(series).color(accent).width(3.0));
    });
}

fn bar_chart(ui: &mut Ui, spec: &ChartSpec, categories: &[String], values: &[f64]) {
    let accent = color::color32(&spec.style.accent);
    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::new(i as f64, v)
                .width(1.0)
                .fill(accent)
                .name(&categories[i])
        })
        .collect();

    let labels = categories.to_vec();
    let mut plot = Plot::new("grade_bars")
        .width(spec.style.width)
        .height(spec.style.height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        // ticks show bucket names instead of bar indices
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 0.01 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        });
    if let Some(x) = &spec.style.x_label {
        plot = plot.x_axis_label(RichText::new(x).color(accent).size(16.0));
    }
    if let Some(y) = &spec.style.y_label {
        plot = plot.y_axis_label(RichText::new(y).color(accent).size(16.0));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars));
    });
}

fn histogram(ui: &mut Ui, spec: &ChartSpec, bins: &[HistogramBin]) {
    let accent = color::color32(&spec.style.accent);
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            // a single-bin histogram has lo == hi; keep the bar visible
            Bar::new((b.lo + b.hi) / 2.0, b.count as f64)
                .width((b.hi - b.lo).max(0.05))
                .fill(accent)
        })
        .collect();

    let mut plot = Plot::new("gpa_histogram")
        .width(spec.style.width)
        .height(spec.style.height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true);
    if let Some(x) = &spec.style.x_label {
        plot = plot.x_axis_label(RichText::new(x).color(accent).size(16.0));
    }
    if let Some(y) = &spec.style.y_label {
        plot = plot.y_axis_label(RichText::new(y).color(accent).size(16.0));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars));
    });
}

// ---------------------------------------------------------------------------
// Donut – painted directly; egui_plot has no pie primitive
// ---------------------------------------------------------------------------

fn pie(ui: &mut Ui, spec: &ChartSpec, slices: &[PieSlice]) {
    let size = Vec2::new(spec.style.width, spec.style.height);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let background = color::color32(&spec.style.background);
    painter.rect_filled(rect, CornerRadius::same(4), background);

    let total: f64 = slices.iter().map(|s| s.value).sum();
    if slices.is_empty() || total <= 0.0 {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "no data",
            FontId::proportional(16.0),
            Color32::GRAY,
        );
        return;
    }

    let radius = rect.height().min(rect.width()) * 0.42;
    let center = Pos2::new(rect.center().x - rect.width() * 0.15, rect.center().y);

    // slices start at 12 o'clock and run clockwise
    let mut start = -std::f32::consts::FRAC_PI_2;
    for (i, slice) in slices.iter().enumerate() {
        let frac = (slice.value / total) as f32;
        let sweep = frac * std::f32::consts::TAU;
        let fill = slice_color(spec, i);

        // triangle fan; a sector over 180° is not convex as one polygon
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        let arc: Vec<Pos2> = (0..=steps)
            .map(|s| {
                let a = start + sweep * s as f32 / steps as f32;
                center + Vec2::angled(a) * radius
            })
            .collect();
        for pair in arc.windows(2) {
            painter.add(Shape::convex_polygon(
                vec![center, pair[0], pair[1]],
                fill,
                Stroke::NONE,
            ));
        }

        // percentage label, skipped for slivers it would not fit
        let pct = frac * 100.0;
        if pct >= 2.5 {
            let mid = start + sweep / 2.0;
            painter.text(
                center + Vec2::angled(mid) * radius * 0.72,
                Align2::CENTER_CENTER,
                format!("{pct:.1}%"),
                FontId::proportional(14.0),
                Color32::WHITE,
            );
        }
        start += sweep;
    }

    if spec.style.hole > 0.0 {
        painter.circle_filled(center, radius * spec.style.hole, background);
    }

    if spec.style.show_legend {
        let x = rect.right() - 250.0;
        let mut y = rect.top() + 24.0;
        for (i, slice) in slices.iter().enumerate() {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, y), Vec2::splat(12.0)),
                CornerRadius::same(2),
                slice_color(spec, i),
            );
            painter.text(
                Pos2::new(x + 18.0, y + 6.0),
                Align2::LEFT_CENTER,
                &slice.label,
                FontId::proportional(14.0),
                Color32::WHITE,
            );
            y += 20.0;
        }
    }
}

fn slice_color(spec: &ChartSpec, i: usize) -> Color32 {
    spec.style
        .palette
        .get(i)
        .map(|hex| color::color32(hex))
        .unwrap_or(Color32::GRAY)
}
