use cover_marks::config::cover::{self, RuntimeConfig};
use cover_marks::diagnostics::{render_overlay, OverlayStyle};
use cover_marks::export::export_regions;
use cover_marks::image::io::{save_rgb_image, write_json_file};
use cover_marks::page::{PageDescription, PageRenderer, PageSource, RasterPage};
use cover_marks::{CoverDetector, DetectionReport, Result};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> std::result::Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = cover::load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    split(&config).map_err(|e| e.to_string())
}

fn usage() -> String {
    "Usage: cover_split <config.json>".to_string()
}

fn split(config: &RuntimeConfig) -> Result<()> {
    let page = PageDescription::load(&config.page)?;
    let raster = RasterPage::load(&config.page_image, config.page_image_dpi)?;

    let detector = CoverDetector::new(config.params.clone());
    let report = detector.process_with_diagnostics(&page, &raster)?;
    report.print_text_summary();

    let written = export_regions(&raster, &report.result, &config.output.dir, &config.export)?;
    for (zone, path) in &written {
        println!("Exported {zone} to {}", path.display());
    }
    if written.is_empty() {
        println!("No zones exported");
    }

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }

    if let Some(path) = &config.output.debug_overlay {
        save_overlay(config, &page, &raster, &report, path)?;
    }
    Ok(())
}

fn save_overlay(
    config: &RuntimeConfig,
    page: &PageDescription,
    raster: &RasterPage,
    report: &DetectionReport,
    path: &Path,
) -> Result<()> {
    let geometry = page.geometry()?;
    let preview = raster.render(&geometry.page_rect(), config.output.preview_dpi)?;
    let (overlay, legend) =
        render_overlay(&preview, &geometry, &report.result, &OverlayStyle::default());
    save_rgb_image(&overlay, path)?;
    if let Some(legend_path) = config.output.legend_path() {
        write_json_file(&legend_path, &legend)?;
    }
    println!("Debug overlay written to {}", path.display());
    Ok(())
}
