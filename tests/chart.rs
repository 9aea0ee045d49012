mod common;

use common::dataset;
use sheetboard::chart::{ChartType, PREVIEW_ROWS, SeriesData, project};
use sheetboard::data::CellValue;
use sheetboard::error::CoreError;

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

/// (month, sales) with one empty sales cell, mirroring the decoder output
/// for a sheet with a missing value.
fn sales_dataset() -> sheetboard::dataset::Dataset {
    let mut d = dataset("alice", "Sales", 83, 0, 0);
    d.headers = vec!["month".to_string(), "sales".to_string()];
    d.records = vec![
        vec![text("Jan"), num(100.0)],
        vec![text("Feb"), CellValue::Empty],
        vec![text("Mar"), num(300.0)],
    ];
    d
}

#[test]
fn bar_projection_keeps_source_row_order() {
    let d = sales_dataset();
    let series = project(&d, "month", "sales", ChartType::Bar).expect("project");

    assert_eq!(series.record_count, 3);
    match series.data {
        SeriesData::Points(points) => {
            let xs: Vec<&str> = points.iter().map(|p| p.x.as_str()).collect();
            assert_eq!(xs, vec!["Jan", "Feb", "Mar"]);
            // Non-numeric y coerces to 0 so the row stays represented.
            assert_eq!(points[1].y, 0.0);
            assert_eq!(points[2].y, 300.0);
        }
        other => panic!("expected points, got {other:?}"),
    }
}

#[test]
fn pie_projection_groups_by_first_seen_label() {
    let mut d = sales_dataset();
    d.headers = vec!["region".to_string(), "amount".to_string()];
    d.records = vec![
        vec![text("north"), num(10.0)],
        vec![text("south"), num(5.0)],
        vec![text("north"), num(7.0)],
        vec![text("south"), text("n/a")],
    ];
    let series = project(&d, "region", "amount", ChartType::Pie).expect("project");

    match series.data {
        SeriesData::Slices(slices) => {
            assert_eq!(slices.len(), 2);
            assert_eq!(slices[0].label, "north");
            assert_eq!(slices[0].value, 17.0);
            assert_eq!(slices[1].label, "south");
            // Non-numeric contribution coerces to 0.
            assert_eq!(slices[1].value, 5.0);
        }
        other => panic!("expected slices, got {other:?}"),
    }
}

#[test]
fn scatter_projection_skips_non_numeric_pairs() {
    let mut d = sales_dataset();
    d.records = vec![
        vec![num(1.0), num(2.0)],
        vec![text("x"), num(3.0)],
        vec![num(4.0), CellValue::Empty],
        vec![text("5"), text("6")],
    ];
    let series = project(&d, "month", "sales", ChartType::Scatter).expect("project");

    match series.data {
        SeriesData::Coords(coords) => {
            assert_eq!(coords.len(), 2);
            assert_eq!((coords[0].x, coords[0].y), (1.0, 2.0));
            // Numeric-looking text still counts.
            assert_eq!((coords[1].x, coords[1].y), (5.0, 6.0));
        }
        other => panic!("expected coords, got {other:?}"),
    }
}

#[test]
fn unknown_fields_are_rejected() {
    let d = sales_dataset();
    let err = project(&d, "month", "profit", ChartType::Bar).unwrap_err();
    match err {
        CoreError::UnknownField(field) => assert_eq!(field, "profit"),
        other => panic!("expected UnknownField, got {other:?}"),
    }
    assert!(matches!(
        project(&d, "week", "sales", ChartType::Line),
        Err(CoreError::UnknownField(_))
    ));
}

#[test]
fn preview_is_capped_independent_of_projection() {
    let mut d = sales_dataset();
    d.records = (0..20).map(|i| vec![text("x"), num(i as f64)]).collect();
    let series = project(&d, "month", "sales", ChartType::Line).expect("project");

    assert_eq!(series.preview_rows.len(), PREVIEW_ROWS);
    assert_eq!(series.record_count, 20);
    match series.data {
        SeriesData::Points(points) => assert_eq!(points.len(), 20),
        other => panic!("expected points, got {other:?}"),
    }
}

#[test]
fn empty_dataset_projects_to_an_empty_series() {
    let mut d = sales_dataset();
    d.records.clear();
    let series = project(&d, "month", "sales", ChartType::Pie).expect("project");
    assert_eq!(series.record_count, 0);
    assert!(matches!(series.data, SeriesData::Slices(slices) if slices.is_empty()));
}
