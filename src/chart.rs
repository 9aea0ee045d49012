//! Chart projection: reshapes a dataset's records into a series suitable
//! for one chart type.
//!
//! Numeric coercion policy, applied consistently: bar, line, and pie treat
//! a non-numeric y-value as 0 so every record (or group) stays represented;
//! scatter skips a record when either coordinate is non-numeric, since a
//! partial point cloud is more useful than a failed request.

use std::{collections::HashMap, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    data::CellValue,
    dataset::Dataset,
    error::{CoreError, Result},
};

/// Rows carried alongside the series for UI preview.
pub const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
        }
    }
}

impl FromStr for ChartType {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" => Ok(ChartType::Pie),
            "scatter" => Ok(ChartType::Scatter),
            other => Err(CoreError::UnsupportedChartType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesData {
    /// One point per record in source row order (bar, line).
    Points(Vec<SeriesPoint>),
    /// One slice per distinct x-value in first-seen order (pie).
    Slices(Vec<PieSlice>),
    /// Numeric pairs; records with a non-numeric coordinate are skipped.
    Coords(Vec<ScatterPoint>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub chart_type: ChartType,
    pub x_field: String,
    pub y_field: String,
    pub data: SeriesData,
    pub record_count: usize,
    pub preview_rows: Vec<Vec<CellValue>>,
}

pub fn project(
    dataset: &Dataset,
    x_field: &str,
    y_field: &str,
    chart_type: ChartType,
) -> Result<ChartSeries> {
    let x_idx = dataset
        .field_index(x_field)
        .ok_or_else(|| CoreError::UnknownField(x_field.to_string()))?;
    let y_idx = dataset
        .field_index(y_field)
        .ok_or_else(|| CoreError::UnknownField(y_field.to_string()))?;

    let data = match chart_type {
        ChartType::Bar | ChartType::Line => ordered_points(dataset, x_idx, y_idx),
        ChartType::Pie => pie_slices(dataset, x_idx, y_idx),
        ChartType::Scatter => scatter_coords(dataset, x_idx, y_idx),
    };

    Ok(ChartSeries {
        chart_type,
        x_field: x_field.to_string(),
        y_field: y_field.to_string(),
        data,
        record_count: dataset.records.len(),
        preview_rows: dataset.records.iter().take(PREVIEW_ROWS).cloned().collect(),
    })
}

fn ordered_points(dataset: &Dataset, x_idx: usize, y_idx: usize) -> SeriesData {
    let points = dataset
        .records
        .iter()
        .map(|record| SeriesPoint {
            x: record[x_idx].as_display(),
            y: record[y_idx].as_f64().unwrap_or(0.0),
        })
        .collect();
    SeriesData::Points(points)
}

fn pie_slices(dataset: &Dataset, x_idx: usize, y_idx: usize) -> SeriesData {
    let mut slices: Vec<PieSlice> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in &dataset.records {
        let label = record[x_idx].as_display();
        let value = record[y_idx].as_f64().unwrap_or(0.0);
        match positions.get(&label) {
            Some(&pos) => slices[pos].value += value,
            None => {
                positions.insert(label.clone(), slices.len());
                slices.push(PieSlice { label, value });
            }
        }
    }
    SeriesData::Slices(slices)
}

fn scatter_coords(dataset: &Dataset, x_idx: usize, y_idx: usize) -> SeriesData {
    let coords = dataset
        .records
        .iter()
        .filter_map(|record| {
            let x = record[x_idx].as_f64()?;
            let y = record[y_idx].as_f64()?;
            Some(ScatterPoint { x, y })
        })
        .collect();
    SeriesData::Coords(coords)
}
