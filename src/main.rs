use cover_marks::page::{PageDescription, RasterPage, VectorPath};
use cover_marks::types::{PageGeometry, Rect};
use cover_marks::{CoverDetector, CoverParams};
use image::RgbImage;

fn main() {
    // Synthetic flapped cover: six trim marks above the trim box on blank paper.
    let trim = Rect::new(20.0, 20.0, 403.2, 320.0);
    let mut drawings = Vec::new();
    for x in [20.0, 62.5, 204.9, 218.3, 360.7, 403.2] {
        drawings.push(VectorPath::new(Rect::new(x - 0.25, 2.0, x + 0.25, 16.0)));
    }
    let page = PageDescription {
        geometry: PageGeometry {
            width: 423.2,
            height: 340.0,
            trim_box: trim,
            rotation: 0,
        },
        drawings,
    };
    let raster = RasterPage::new(RgbImage::from_pixel(423, 340, image::Rgb([255, 255, 255])), 72.0);

    let detector = CoverDetector::new(CoverParams::default());
    match detector.process_with_diagnostics(&page, &raster) {
        Ok(report) => report.print_text_summary(),
        Err(err) => eprintln!("Error: {err}"),
    }
}
