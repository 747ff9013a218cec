mod common;

use common::failing::{FailAt, FailingRenderer, FailingSource};
use common::synthetic_page::{
    blank_page, cover_drawings, cover_page, geometry, page_columns, rasterize, CountingRenderer,
    OFFSET_X, PAGE_H, RASTER_DPI, TRIM_Y0, TRIM_Y1,
};
use cover_marks::classify::SpineStrategy;
use cover_marks::types::{Band, BoundaryOrigin};
use cover_marks::units::mm_to_pt;
use cover_marks::{
    ColumnSource, CoverDetector, CoverError, CoverParams, DetectionWarning, StructuralZone,
    VerticalBoundsSource,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_span(result: &cover_marks::DetectionResult, zone: StructuralZone, want: (f64, f64)) {
    let iv = result
        .zones
        .get(zone)
        .unwrap_or_else(|| panic!("{zone} not detected"));
    assert!(
        (iv.x0 - want.0).abs() < 1e-9 && (iv.x1 - want.1).abs() < 1e-9,
        "{zone}: got ({}, {}), want {want:?}",
        iv.x0,
        iv.x1
    );
}

#[test]
fn vector_marks_split_a_flapped_cover() {
    init_logging();
    let page = cover_page();
    let raster = rasterize(&page.drawings, 72.0);
    let detector = CoverDetector::new(CoverParams::default());
    let report = detector.process_with_diagnostics(&page, &raster).unwrap();
    let result = &report.result;

    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert_eq!(result.columns.len(), 6);
    for (got, want) in result.columns.iter().zip(page_columns()) {
        assert!((got - want).abs() < 1e-9, "{got} vs {want}");
    }
    let x = |v: f64| v + OFFSET_X;
    assert_span(result, StructuralZone::LeftFlap, (x(0.0), x(42.5)));
    assert_span(result, StructuralZone::BackCover, (x(42.5), x(184.9)));
    assert_span(result, StructuralZone::Spine, (x(184.9), x(198.3)));
    assert_span(result, StructuralZone::FrontCover, (x(198.3), x(340.7)));
    assert_span(result, StructuralZone::RightFlap, (x(340.7), x(383.2)));
    assert_eq!(result.bounds.y_top, TRIM_Y0);
    assert_eq!(result.bounds.y_bottom, TRIM_Y1);

    let vector = report.trace.vector.as_ref().unwrap();
    // 6 top marks kept; 6 bottom marks and the artwork rule are off-row.
    assert_eq!(vector.kept, 6);
    assert_eq!(vector.rejected_position, 7);
    assert_eq!(vector.min_y, Some(5.0));
    assert!(report.trace.raster_bounds.is_none());
    assert!(report.trace.timings.stage_ms("classify").is_some());
}

#[test]
fn detection_is_repeatable() {
    let page = cover_page();
    let raster = rasterize(&page.drawings, 72.0);
    let detector = CoverDetector::new(CoverParams::default());
    let a = detector.process(&page, &raster).unwrap();
    let b = detector.process(&page, &raster).unwrap();
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );
}

#[test]
fn raster_bounds_find_the_trim_lines() {
    init_logging();
    let page = cover_page();
    let raster = rasterize(&page.drawings, RASTER_DPI);
    let params = CoverParams {
        bounds_source: VerticalBoundsSource::RasterMarks,
        ..CoverParams::default()
    };
    let report = CoverDetector::new(params)
        .process_with_diagnostics(&page, &raster)
        .unwrap();
    let bounds = report.result.bounds;
    assert!((bounds.y_top - TRIM_Y0).abs() < 0.5, "{bounds:?}");
    assert!((bounds.y_bottom - TRIM_Y1).abs() < 0.5, "{bounds:?}");
    assert_eq!(bounds.top_origin, BoundaryOrigin::RasterMark);
    assert_eq!(bounds.bottom_origin, BoundaryOrigin::RasterMark);
    assert!(report.result.warnings.is_empty(), "{:?}", report.result.warnings);

    let scan = report.trace.raster_bounds.unwrap();
    assert_eq!(scan.dpi, RASTER_DPI);
    assert!(scan.top_winner.is_some() && scan.bottom_winner.is_some());
}

#[test]
fn vector_bounds_use_horizontal_marks() {
    let page = cover_page();
    let raster = rasterize(&page.drawings, 72.0);
    let params = CoverParams {
        bounds_source: VerticalBoundsSource::VectorMarks,
        ..CoverParams::default()
    };
    let result = CoverDetector::new(params).process(&page, &raster).unwrap();
    assert_eq!(result.bounds.y_top, TRIM_Y0 - 0.25);
    assert_eq!(result.bounds.y_bottom, TRIM_Y1 - 0.25);
    assert_eq!(result.bounds.top_origin, BoundaryOrigin::VectorMark);
}

#[test]
fn raster_columns_substitute_for_missing_vector_marks() {
    init_logging();
    // The page raster still shows the marks, but no vector paths survive.
    let raster = rasterize(&cover_drawings(), RASTER_DPI);
    let page = blank_page();
    let params = CoverParams {
        column_source: ColumnSource::VectorThenRaster,
        ..CoverParams::default()
    };
    let report = CoverDetector::new(params)
        .process_with_diagnostics(&page, &raster)
        .unwrap();
    assert_eq!(report.trace.columns.used, ColumnSource::Raster);

    let result = &report.result;
    assert_eq!(result.columns.len(), 6, "{:?}", result.columns);
    for (got, want) in result.columns.iter().zip(page_columns()) {
        assert!((got - want).abs() < 0.5, "{got} vs {want}");
    }
    let spine = result.zones.get(StructuralZone::Spine).unwrap();
    assert!((spine.width_mm - 13.4 / 2.83465).abs() < 0.3, "{spine:?}");
    for zone in StructuralZone::ALL {
        assert!(result.zones.get(zone).is_some(), "{zone} missing");
    }
}

#[test]
fn no_marks_anywhere_falls_back_to_default_offsets() {
    init_logging();
    let page = blank_page();
    let raster = rasterize(&[], RASTER_DPI);
    let params = CoverParams {
        bounds_source: VerticalBoundsSource::RasterMarks,
        ..CoverParams::default()
    };
    let renderer = CountingRenderer::new(raster);
    let result = CoverDetector::new(params).process(&page, &renderer).unwrap();

    let offset = mm_to_pt(15.0);
    assert!((result.bounds.y_top - offset).abs() < 1e-9);
    assert!((result.bounds.y_bottom - (PAGE_H - offset)).abs() < 1e-9);
    assert_eq!(result.bounds.top_origin, BoundaryOrigin::DefaultOffset);
    assert!(result.zones.is_empty());
    // Only the boundary strip was rendered.
    assert_eq!(renderer.calls.get(), 1);

    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, DetectionWarning::InsufficientMarks { .. })));
    for band in [Band::Top, Band::Bottom] {
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, DetectionWarning::RasterFallbackMiss { band: b, .. } if *b == band)));
    }
}

#[test]
fn grouped_strategy_runs_through_the_detector() {
    let page = cover_page();
    let raster = rasterize(&page.drawings, 72.0);
    let mut params = CoverParams::default();
    params.classifier.strategy = SpineStrategy::grouped();
    let report = CoverDetector::new(params)
        .process_with_diagnostics(&page, &raster)
        .unwrap();
    assert_eq!(report.trace.classification.strategy, SpineStrategy::grouped());
    assert_span(
        &report.result,
        StructuralZone::Spine,
        (OFFSET_X + 184.9, OFFSET_X + 198.3),
    );
}

#[test]
fn page_geometry_is_echoed_in_the_trace() {
    let page = cover_page();
    let raster = rasterize(&page.drawings, 72.0);
    let report = CoverDetector::default()
        .process_with_diagnostics(&page, &raster)
        .unwrap();
    assert_eq!(report.trace.input.trim_box, geometry().trim_box);
    assert_eq!(report.trace.input.paths_total, page.drawings.len());
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"classification\""));
}

#[test]
fn unreadable_page_is_an_error_not_a_partial_result() {
    init_logging();
    let raster = rasterize(&cover_drawings(), 72.0);
    for fail_at in [FailAt::Geometry, FailAt::Drawings] {
        let source = FailingSource {
            inner: cover_page(),
            fail_at,
        };
        let err = CoverDetector::default()
            .process(&source, &raster)
            .expect_err("page read failure must abort the page");
        assert!(
            matches!(err, CoverError::InputUnavailable(_)),
            "{fail_at:?}: {err}"
        );
    }
}

#[test]
fn renderer_failure_during_raster_bounds_aborts_the_page() {
    let page = cover_page();
    let params = CoverParams {
        bounds_source: VerticalBoundsSource::RasterMarks,
        ..CoverParams::default()
    };
    let err = CoverDetector::new(params)
        .process(&page, &FailingRenderer)
        .expect_err("raster bounds need the renderer");
    assert!(matches!(err, CoverError::Render { dpi, .. } if dpi == RASTER_DPI));
}

#[test]
fn renderer_failure_during_raster_columns_aborts_the_page() {
    let page = blank_page();
    let params = CoverParams {
        column_source: ColumnSource::VectorThenRaster,
        ..CoverParams::default()
    };
    let err = CoverDetector::new(params)
        .process(&page, &FailingRenderer)
        .expect_err("raster column scan needs the renderer");
    assert!(matches!(err, CoverError::Render { .. }));
}

#[test]
fn vector_only_detection_never_touches_the_renderer() {
    let page = cover_page();
    let result = CoverDetector::default()
        .process(&page, &FailingRenderer)
        .unwrap();
    assert!(result.zones.get(StructuralZone::Spine).is_some());
}
