use std::io::Write;
use std::path::Path;

use image::{GrayImage, Luma};
use noise_engine::{Field, Grid};
use thiserror::Error;

/// Height of the plot a 1D line is drawn into.
pub const LINE_PLOT_HEIGHT: u32 = 64;

const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("png output needs --output <FILE>")]
    MissingOutput,
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format { Png, Json, Ascii }

fn gray(v: f64) -> u8 { (v.clamp(0.0, 1.0) * 255.0).round() as u8 }

fn plane_image(grid: &Grid<f64>) -> GrayImage {
    let mut img = GrayImage::new(grid.width() as u32, grid.height() as u32);
    for (y, row) in grid.rows().enumerate() {
        for (x, v) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Luma([gray(*v)]));
        }
    }
    img
}

/// Filled area plot: column `i` is lit from the value's height down.
fn line_image(line: &[f64]) -> GrayImage {
    let top_row = |v: f64| ((1.0 - v.clamp(0.0, 1.0)) * (LINE_PLOT_HEIGHT - 1) as f64).round() as u32;
    GrayImage::from_fn(line.len() as u32, LINE_PLOT_HEIGHT, |x, y| {
        if y >= top_row(line[x as usize]) { Luma([255]) } else { Luma([0]) }
    })
}

pub fn field_image(field: &Field) -> GrayImage {
    match field {
        Field::Plane(grid) => plane_image(grid),
        Field::Line(line) => line_image(line),
    }
}

fn ramp(v: f64) -> char {
    let i = (v.clamp(0.0, 1.0) * (ASCII_RAMP.len() - 1) as f64).round() as usize;
    ASCII_RAMP[i] as char
}

pub fn field_ascii(field: &Field) -> String {
    match field {
        Field::Plane(grid) => grid.rows().map(|row| row.iter().map(|v| ramp(*v)).collect::<String>() + "\n").collect(),
        Field::Line(line) => line.iter().map(|v| ramp(*v)).collect::<String>() + "\n",
    }
}

/// Writes `field` in `format` to `output`, or to stdout for text formats.
pub fn export(field: &Field, format: Format, output: Option<&Path>) -> Result<(), ExportError> {
    let text = match format {
        Format::Png => {
            let path = output.ok_or(ExportError::MissingOutput)?;
            field_image(field).save(path)?;
            return Ok(());
        }
        Format::Json => serde_json::to_string_pretty(field)? + "\n",
        Format::Ascii => field_ascii(field),
    };
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}
