//! Draws a sample plot exercising every shape, then opens it in the viewer.
//!
//! ```text
//! cargo run --example showcase --features tracing -- out.svg
//! ```

use svgsketch::{
    AxisOptions, Bounds, Document, DocumentConfig, GroupOptions, LabelFormat, Margins,
    PathCommands, Rgb, Style, hires,
};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "showcase.svg".to_string());

    let config = DocumentConfig::new().with_size(600, 600);
    let mut doc = Document::create(&output, config)?;
    doc.set_scale(Bounds::default(), Margins::default())?;

    // solid fill, otherwise labels render hollow
    doc.open_group(Style::new().set("fill", "black"))?;
    doc.y_axis(&AxisOptions::new())?;
    doc.x_axis(
        &AxisOptions::new()
            .with_step(0.2)
            .with_format(LabelFormat::Scientific { width: 9, precision: 2 }),
    )?;
    doc.close_group()?;

    let diamond = PathCommands::new()
        .move_to(150, 400)
        .line_by(50, 50)
        .line_by(-50, 50)
        .line_by(-50, -50)
        .line_by(50, -50)
        .close();
    let teal = Style::new()
        .set("stroke", "olive")
        .set("fill", "#49bab6")
        .set("stroke_width", 10);
    doc.path(&diamond, &teal)?;

    let shifted = PathCommands::new()
        .move_to(200, 300)
        .line_by(50, 50)
        .line_by(-50, 50)
        .line_by(-50, -50)
        .line_by(50, -50)
        .close();
    doc.path(
        &shifted,
        &Style::new()
            .set("fill", Rgb::new(100, 150, 200))
            .set("stroke", Rgb::from_fractions(0.6, 0.7, 1.0))
            .set("stroke_width", 5),
    )?;

    doc.circle(0.5, 0.3, 20, &teal.merged(&Style::new().set("stroke", "none")))?;
    doc.line(0.5, 0.5, 0.4, 0.5, &Style::new())?;

    doc.open_group(Style::new().set("stroke_width", 5))?;
    let lime = Style::new().set("stroke", "lime");
    doc.line(0.5, 0.5, 0.4, 0.6, &Style::new())?;
    doc.line(300, hires(300.23), 0.5, 0.6, &lime)?;
    doc.line(300, 300, 0.5, 0.6, &lime)?;
    doc.path(
        &PathCommands::new().move_to(300, 300).line_by(0.1, 0.1),
        &Style::new().set("stroke", "red").set("stroke_dasharray", "3,2"),
    )?;
    doc.fat_arrow(0.5, 0.5, 0.7, 0.5, 10, &Style::new().set("fill", "green").set("stroke", "none"))?;
    doc.arrow(
        0.5,
        0.5,
        0.7,
        0.4,
        10,
        &Style::new()
            .set("stroke_width", 3)
            .set("stroke", "maroon")
            .set("fill", "black"),
    )?;
    doc.close_group()?;

    let solid = |color: &str| Style::new().set("fill", color).set("stroke", "none");
    doc.polygon([0.7, 0.1, 0.8, 0.2, 0.8, 0.3, 0.7, 0.4], &solid("gray"))?;
    doc.polygon([0.9, 0.1, 1.0, 0.2, 1.0, 0.3, 0.9, 0.4], &solid("silver"))?;
    doc.polyline(
        [0.9, 0.1, 1.0, 0.2, 1.0, 0.3, 0.9, 0.4],
        &Style::new().set("stroke_width", 3),
    )?;

    let brush = |color: &str, width: i32| Style::new().set("stroke", color).set("stroke_width", width);
    doc.arc(0.8, 0.65, 30, 20.0, 180.0, &brush("brown", 10))?;
    doc.arc(0.8, 0.65, 60, 20.0, 245.0, &brush("purple", 15))?;
    doc.radial(0.8, 0.65, 60, 80, 132.5, &brush("purple", 15))?;
    doc.sector(0.7, 0.85, 30, 100, 10.0, 45.0, &Style::new().set("fill", "red").set("stroke", "black"))?;
    doc.rect(0.7, 0.8, 0.35, 0.25, &brush("aqua", 3).set("fill", "none"))?;
    doc.rect_corners(0.72, 0.82, 1.03, 1.03, &brush("yellow", 5).set("fill", "none"))?;
    doc.square(0.3, 0.7, 15.0, &brush("navy", 2).set("fill", "none"))?;

    doc.text(0.2, 0.1, 0.0, "hello", &Style::new().set("font_size", "60pt").set("fill", "lime"))?;
    doc.text(
        0.5,
        0.3,
        60.0,
        "again",
        &Style::new().set("font_size", "48pt").set("text_anchor", "middle"),
    )?;

    doc.open_group(Style::new().set("fill", "black"))?;
    let thin = Style::new().set("stroke_width", 1);
    doc.wind_barb(0.05, 0.95, 0.0, 40.0, 50.0, &thin)?;
    doc.wind_barb(0.10, 0.90, 7.0, 30.0, 50.0, &thin)?;
    doc.wind_barb(0.15, 0.85, 47.0, 20.0, 50.0, &thin)?;
    doc.wind_barb(0.20, 0.80, 107.0, 10.0, 80.0, &thin)?;
    doc.close_group()?;

    let label = Style::new().set("font_size", "24pt").set("text_anchor", "start");
    if let Some(mask) = doc.margin_mask_ref() {
        doc.open_group(GroupOptions::new().with_clip_path(mask))?;
        doc.text(0.5, 0.85, 60.0, "clipped", &label)?;
        doc.close_group()?;
    }
    doc.text(0.35, 0.80, 60.0, " not clipped", &label)?;

    doc.finalize()?;
    doc.display();
    Ok(())
}
