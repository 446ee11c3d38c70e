//! PNG rendering surface.
//!
//! Draws a viewer snapshot as a min/max column envelope per visible channel,
//! with a center line and the marker as a vertical line.

use std::io::Write;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use wavescope_core::{PlotSnapshot, RenderSurface};

/// Default image dimensions.
pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 256;

const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];
const CENTER_LINE_COLOR: [u8; 3] = [200, 200, 200];
const CHANNEL_COLORS: [[u8; 3]; 2] = [
    [0, 0, 255], // channel 0: blue
    [255, 0, 0], // channel 1: red
];
const MARKER_COLOR: [u8; 3] = [139, 0, 0]; // dark red

/// Min/max amplitude in one pixel column, normalized to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnData {
    min: f64,
    max: f64,
}

/// Surface that rasterizes into an RGB buffer and encodes it as PNG.
#[derive(Debug)]
pub struct PngSurface {
    width: u32,
    height: u32,
    png_data: Option<Vec<u8>>,
}

impl PngSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(2),
            png_data: None,
        }
    }

    /// Image width in pixels, after clamping.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels, after clamping.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded PNG of the last render.
    pub fn png_data(&self) -> Option<&[u8]> {
        self.png_data.as_deref()
    }

    /// Takes the encoded PNG of the last render.
    pub fn into_png_data(self) -> Option<Vec<u8>> {
        self.png_data
    }
}

impl Default for PngSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl RenderSurface for PngSurface {
    type Error = png::EncodingError;

    fn render(&mut self, snapshot: &PlotSnapshot<'_>) -> Result<(), Self::Error> {
        let rgb = rasterize(snapshot, self.width, self.height);
        let mut buffer = Vec::new();
        encode_png_to_writer(&rgb, self.width, self.height, &mut buffer)?;
        self.png_data = Some(buffer);
        Ok(())
    }
}

fn rasterize(snapshot: &PlotSnapshot<'_>, width: u32, height: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let mut buffer = BACKGROUND_COLOR.repeat(w * h);

    let center_y = h / 2;
    for x in 0..w {
        put_pixel(&mut buffer, w, x, center_y, CENTER_LINE_COLOR);
    }

    for view in snapshot.visible_series() {
        let color = CHANNEL_COLORS[view.index % CHANNEL_COLORS.len()];
        let columns = compute_column_data(
            view.series.points(),
            snapshot.span,
            snapshot.full_scale,
            w,
        );
        for (x, column) in columns.iter().enumerate() {
            let Some(column) = column else { continue };
            let top = amplitude_to_y(column.max, h);
            let bottom = amplitude_to_y(column.min, h);
            for y in top.min(bottom)..=top.max(bottom) {
                put_pixel(&mut buffer, w, x, y, color);
            }
        }
    }

    if let Some(x) = snapshot
        .marker
        .and_then(|m| time_to_x(m, snapshot.span, w))
    {
        for y in 0..h {
            put_pixel(&mut buffer, w, x, y, MARKER_COLOR);
        }
    }

    buffer
}

/// Buckets points into `num_columns` by time. Columns with no points are `None`.
fn compute_column_data(
    points: impl Iterator<Item = (f64, f64)>,
    span: f64,
    full_scale: f64,
    num_columns: usize,
) -> Vec<Option<ColumnData>> {
    let mut columns: Vec<Option<ColumnData>> = vec![None; num_columns];
    for (time, amplitude) in points {
        let Some(x) = time_to_x(time, span, num_columns) else {
            continue;
        };
        let value = amplitude / full_scale;
        let column = columns[x].get_or_insert(ColumnData {
            min: value,
            max: value,
        });
        column.min = column.min.min(value);
        column.max = column.max.max(value);
    }
    columns
}

/// Maps a time in axis units to a column, or `None` when outside the plot.
fn time_to_x(time: f64, span: f64, width: usize) -> Option<usize> {
    if span <= 0.0 || !(0.0..=span).contains(&time) {
        return None;
    }
    let x = (time / span * width as f64).floor() as usize;
    Some(x.min(width - 1))
}

/// Converts amplitude [-1, 1] to y pixel coordinate [0, height-1].
/// y=0 is the top of the image, so positive amplitude maps to lower y values.
fn amplitude_to_y(amplitude: f64, height: usize) -> usize {
    let clamped = amplitude.clamp(-1.0, 1.0);
    let normalized = (-clamped + 1.0) / 2.0;
    let y = (normalized * (height - 1) as f64).round() as usize;
    y.min(height - 1)
}

fn put_pixel(buffer: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 3]) {
    let idx = (y * width + x) * 3;
    buffer[idx..idx + 3].copy_from_slice(&color);
}

/// Encodes RGB buffer as PNG to a writer.
fn encode_png_to_writer<W: Write>(
    rgb_data: &[u8],
    width: u32,
    height: u32,
    writer: W,
) -> Result<(), png::EncodingError> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(Compression::Default);
    encoder.set_filter(FilterType::NoFilter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(rgb_data)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wavescope_core::{LoadLimits, TimeUnit, WaveformViewer};

    fn stereo_wav(frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 1000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..frames {
                writer.write_sample(16000i16).unwrap();
                writer.write_sample(if i % 2 == 0 { -16000i16 } else { 0 }).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn pixel(png_bytes: &[u8], x: usize, y: usize) -> [u8; 3] {
        let decoder = png::Decoder::new(png_bytes);
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        let idx = (y * info.width as usize + x) * 3;
        [buf[idx], buf[idx + 1], buf[idx + 2]]
    }

    #[test]
    fn test_new_clamps_dimensions() {
        let surface = PngSurface::new(0, 0);
        assert_eq!((surface.width(), surface.height()), (1, 2));

        let surface = PngSurface::new(640, 120);
        assert_eq!((surface.width(), surface.height()), (640, 120));
    }

    #[test]
    fn test_amplitude_to_y() {
        assert_eq!(amplitude_to_y(1.0, 101), 0);
        assert_eq!(amplitude_to_y(0.0, 101), 50);
        assert_eq!(amplitude_to_y(-1.0, 101), 100);
        assert_eq!(amplitude_to_y(5.0, 101), 0);
    }

    #[test]
    fn test_time_to_x() {
        assert_eq!(time_to_x(0.0, 10.0, 100), Some(0));
        assert_eq!(time_to_x(5.0, 10.0, 100), Some(50));
        assert_eq!(time_to_x(10.0, 10.0, 100), Some(99));
        assert_eq!(time_to_x(-1.0, 10.0, 100), None);
        assert_eq!(time_to_x(11.0, 10.0, 100), None);
        assert_eq!(time_to_x(1.0, 0.0, 100), None);
    }

    #[test]
    fn test_compute_column_data_buckets_by_time() {
        let points = vec![(0.0, 100.0), (0.4, -50.0), (1.5, 25.0)];
        let columns = compute_column_data(points.into_iter(), 2.0, 100.0, 2);
        assert_eq!(
            columns,
            vec![
                Some(ColumnData { min: -0.5, max: 1.0 }),
                Some(ColumnData { min: 0.25, max: 0.25 }),
            ]
        );
    }

    #[test]
    fn test_render_draws_channels_and_marker() {
        let mut viewer = WaveformViewer::new(LoadLimits::default());
        viewer.load_file(&stereo_wav(500)).unwrap();
        viewer.set_display_unit(TimeUnit::Milliseconds);
        viewer.set_marker_text("250");

        let mut surface = PngSurface::new(100, 51);
        assert!(viewer.present(&mut surface).unwrap());
        let png_bytes = surface.png_data().unwrap();
        assert_eq!(&png_bytes[1..4], b"PNG");

        // Marker at 250 ms of a 500 ms axis sits in column 50.
        assert_eq!(pixel(png_bytes, 50, 0), MARKER_COLOR);
        // Channel 0 holds +0.49 full scale: blue above center.
        assert_eq!(pixel(png_bytes, 10, 13), CHANNEL_COLORS[0]);
        // Channel 1 dips to -0.49: red below center.
        assert_eq!(pixel(png_bytes, 10, 37), CHANNEL_COLORS[1]);
    }

    #[test]
    fn test_hidden_channel_is_not_drawn() {
        let mut viewer = WaveformViewer::new(LoadLimits::default());
        viewer.load_file(&stereo_wav(500)).unwrap();
        viewer.channel_visible(1, false);

        let mut surface = PngSurface::new(100, 51);
        viewer.present(&mut surface).unwrap();
        let png_bytes = surface.into_png_data().unwrap();

        assert_eq!(pixel(&png_bytes, 10, 13), CHANNEL_COLORS[0]);
        assert_eq!(pixel(&png_bytes, 10, 37), BACKGROUND_COLOR);
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut viewer = WaveformViewer::new(LoadLimits::default());
        viewer.load_file(&stereo_wav(64)).unwrap();

        let mut a = PngSurface::default();
        let mut b = PngSurface::default();
        viewer.present(&mut a).unwrap();
        viewer.present(&mut b).unwrap();
        assert_eq!(a.png_data(), b.png_data());
    }
}
