use cover_marks::config::scan::{self, MarkScanConfig};
use cover_marks::image::io::write_json_file;
use cover_marks::marks::{detect_horizontal_marks, detect_vertical_marks};
use cover_marks::page::{PageDescription, PageSource, PathColor};
use cover_marks::units::pt_to_mm;
use cover_marks::Result;
use serde::Serialize;
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
    let config = scan::load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    scan_page(&config).map_err(|e| e.to_string())
}

fn usage() -> String {
    "Usage: mark_scan <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathEntry {
    x0_mm: f64,
    y0_mm: f64,
    width_mm: f64,
    height_mm: f64,
    color: Option<PathColor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanDump {
    vertical: Vec<PathEntry>,
    horizontal: Vec<PathEntry>,
    columns_mm: Vec<f64>,
    top_mm: Option<f64>,
    bottom_mm: Option<f64>,
}

fn scan_page(config: &MarkScanConfig) -> Result<()> {
    let page = PageDescription::load(&config.page)?;
    let geometry = page.geometry()?;
    let drawings = page.drawings()?;

    let entry = |p: &cover_marks::page::VectorPath| PathEntry {
        x0_mm: pt_to_mm(p.rect.x0),
        y0_mm: pt_to_mm(p.rect.y0),
        width_mm: pt_to_mm(p.rect.width()),
        height_mm: pt_to_mm(p.rect.height()),
        color: p.paint(),
    };
    let vertical: Vec<PathEntry> = drawings
        .iter()
        .filter(|p| {
            p.rect.height() > config.vector.min_height_pt && p.rect.width() < config.vector.max_width_pt
        })
        .map(entry)
        .collect();
    let horizontal: Vec<PathEntry> = drawings
        .iter()
        .filter(|p| {
            p.rect.width() > config.horizontal.min_width_pt
                && p.rect.height() < config.horizontal.max_height_pt
        })
        .map(entry)
        .collect();

    let marks = detect_vertical_marks(&drawings, &geometry, &config.vector);
    let hmarks = detect_horizontal_marks(&drawings, &geometry, &config.horizontal);

    println!(
        "Page {:.1}x{:.1}mm, {} paths",
        pt_to_mm(geometry.width),
        pt_to_mm(geometry.height),
        drawings.len()
    );
    println!("Vertical candidates: {}", vertical.len());
    for (i, v) in vertical.iter().enumerate() {
        println!(
            "  {:>3}: x={:7.1}mm y={:7.1}mm h={:5.1}mm color={:?}",
            i + 1,
            v.x0_mm + v.width_mm / 2.0,
            v.y0_mm,
            v.height_mm,
            v.color
        );
    }
    println!("Horizontal candidates: {}", horizontal.len());
    for (i, h) in horizontal.iter().enumerate() {
        println!(
            "  {:>3}: x={:7.1}mm y={:7.1}mm w={:5.1}mm color={:?}",
            i + 1,
            h.x0_mm,
            h.y0_mm,
            h.width_mm,
            h.color
        );
    }
    let columns_mm: Vec<f64> = marks.columns.iter().map(|x| pt_to_mm(*x)).collect();
    println!("Columns (mm): {:?}", columns_mm);

    let dump = ScanDump {
        vertical,
        horizontal,
        columns_mm,
        top_mm: hmarks.top.map(pt_to_mm),
        bottom_mm: hmarks.bottom.map(pt_to_mm),
    };
    if let Some(path) = &config.json_out {
        write_json_file(path, &dump)?;
        println!("Scan written to {}", path.display());
    }
    Ok(())
}
