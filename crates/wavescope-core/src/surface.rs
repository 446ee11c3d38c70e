//! The hand-off to whatever draws the plot.

use crate::series::ChannelSeries;
use crate::units::TimeUnit;

/// Vertical axis label.
pub const Y_LABEL: &str = "Y";

/// One channel as the surface should draw it.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    /// Channel index in the file (0 = left/mono, 1 = right).
    pub index: usize,
    pub series: &'a ChannelSeries,
    pub visible: bool,
}

/// Everything a surface needs for one redraw.
#[derive(Debug, Clone)]
pub struct PlotSnapshot<'a> {
    pub time_unit: TimeUnit,
    pub x_label: String,
    pub y_label: &'static str,
    /// Axis extent in `time_unit`.
    pub span: f64,
    /// Full-scale amplitude of the source bit depth.
    pub full_scale: f64,
    pub series: Vec<SeriesView<'a>>,
    /// Marker position in `time_unit`.
    pub marker: Option<f64>,
}

impl<'a> PlotSnapshot<'a> {
    /// Series that should be drawn.
    pub fn visible_series(&self) -> impl Iterator<Item = &SeriesView<'a>> + '_ {
        self.series.iter().filter(|s| s.visible)
    }
}

/// A plotting backend.
///
/// Pixel drawing, zoom and refresh belong to the implementor; the core only
/// supplies numbers.
pub trait RenderSurface {
    type Error;

    /// Redraws the plot from scratch.
    fn render(&mut self, snapshot: &PlotSnapshot<'_>) -> Result<(), Self::Error>;
}
