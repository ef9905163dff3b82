//! Render an annotated mass spectrum chart from a file or in-memory arrays.
//!
//! [`SpectrumPlotter`] is the entry point. It memoizes file loads behind a
//! small cache and drives the full pipeline: optional processing callback,
//! cropping, relative scaling, rendering with peak annotation, and
//! integration over a sub-range of the raw signal.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arrayops::{minmax, trapz, ArrayPair};
use crate::text::{self, TextError};
use crate::transform::{self, TransformError};

/// How many points on either side of a sample must not exceed it for the
/// sample to count as a local peak
pub const ANNOTATION_WINDOW: usize = 10;

const DEFAULT_CACHE_SIZE: usize = 4;

/// All the ways spectrum plotting can fail
#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Load(#[from] TextError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("cannot plot an empty spectrum")]
    EmptyData,
    #[error("the x and y arrays do not match in length")]
    LengthMismatch,
    #[error("failed to render chart: {0}")]
    Render(String),
}

fn render_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Render(e.to_string())
}

/// Find the points worth labeling on a spectrum.
///
/// A sample is a peak when its y value is greater than or equal to every
/// y value within [`ANNOTATION_WINDOW`] indices on either side (saturating
/// at the array edges) and strictly exceeds `threshold_fraction` of the
/// global maximum. An exact x value is reported at most once.
pub fn find_annotation_peaks(xs: &[f64], ys: &[f64], threshold_fraction: f64) -> Vec<(f64, f64)> {
    let n = ys.len();
    if n == 0 {
        return Vec::new();
    }
    let (_, max_y) = minmax(ys);
    let thresh = threshold_fraction * max_y;
    let mut visited: Vec<f64> = Vec::new();
    let mut peaks = Vec::new();
    for (i, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        let lo = i.saturating_sub(ANNOTATION_WINDOW);
        let hi = (i + 1 + ANNOTATION_WINDOW).min(n);
        let is_local_max = ys[lo..i]
            .iter()
            .chain(ys[i + 1..hi].iter())
            .all(|other| y >= *other);
        if is_local_max && y > thresh && !visited.iter().any(|v| *v == x) {
            visited.push(x);
            peaks.push((x, y));
        }
    }
    peaks
}

/// Configuration for one spectrum rendering
#[derive(Debug, Clone)]
pub struct SpectrumPlot {
    /// Crop the spectrum to `start..end` before scaling. Cropping only
    /// applies when both bounds are set.
    pub start: Option<f64>,
    pub end: Option<f64>,
    /// The fraction of the global maximum a peak must exceed to be labeled
    pub intensity_threshold: f64,
    /// Vertical label offset as a fraction of the maximum y value
    pub margin_y: f64,
    /// Decimal places in peak labels; `None` prints the full value
    pub decimal_places: Option<usize>,
    /// Min-max normalize the signal and scale it to 0..100
    pub scale_relative: bool,
    /// Label local maxima with their x coordinate
    pub annotate: bool,
    pub title: Option<String>,
    /// Integrate the *unprocessed* signal over this x window
    pub integrate: Option<(f64, f64)>,
    /// Output image dimensions in pixels
    pub size: (u32, u32),
    /// Render target; the `svg` extension selects the SVG backend,
    /// anything else is rendered as a bitmap. `None` skips rendering.
    pub save_as: Option<PathBuf>,
    /// Transformation applied to the arrays before cropping and scaling
    pub process: Option<fn(&mut Vec<f64>, &mut Vec<f64>)>,
}

impl Default for SpectrumPlot {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            intensity_threshold: 0.5,
            margin_y: 0.05,
            decimal_places: Some(1),
            scale_relative: true,
            annotate: true,
            title: None,
            integrate: None,
            size: (640, 480),
            save_as: None,
            process: None,
        }
    }
}

impl SpectrumPlot {
    pub fn builder() -> SpectrumPlotBuilder {
        SpectrumPlotBuilder::new()
    }
}

/// A builder for configuring [`SpectrumPlot`]
#[derive(Debug, Clone, Default)]
pub struct SpectrumPlotBuilder {
    config: SpectrumPlot,
}

impl SpectrumPlotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(mut self, start: f64, end: f64) -> Self {
        self.config.start = Some(start);
        self.config.end = Some(end);
        self
    }

    pub fn intensity_threshold(mut self, intensity_threshold: f64) -> Self {
        self.config.intensity_threshold = intensity_threshold;
        self
    }

    pub fn margin_y(mut self, margin_y: f64) -> Self {
        self.config.margin_y = margin_y;
        self
    }

    pub fn decimal_places(mut self, decimal_places: Option<usize>) -> Self {
        self.config.decimal_places = decimal_places;
        self
    }

    pub fn scale_relative(mut self, scale_relative: bool) -> Self {
        self.config.scale_relative = scale_relative;
        self
    }

    pub fn annotate(mut self, annotate: bool) -> Self {
        self.config.annotate = annotate;
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn integrate(mut self, from: f64, to: f64) -> Self {
        self.config.integrate = Some((from, to));
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.size = (width, height);
        self
    }

    pub fn save_as<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.save_as = Some(path.into());
        self
    }

    pub fn process(mut self, process: fn(&mut Vec<f64>, &mut Vec<f64>)) -> Self {
        self.config.process = Some(process);
        self
    }

    pub fn build(self) -> SpectrumPlot {
        self.config
    }
}

impl From<SpectrumPlotBuilder> for SpectrumPlot {
    fn from(value: SpectrumPlotBuilder) -> Self {
        value.build()
    }
}

/// The processed arrays and any integral produced by a plotting run
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotData {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub integral: Option<f64>,
}

/// Plots spectra, memoizing file loads behind a small cache.
///
/// The cache is flushed entirely once it grows past its capacity, mirroring
/// the access pattern of plotting a handful of samples repeatedly with
/// varying configurations.
#[derive(Debug, Clone)]
pub struct SpectrumPlotter {
    cache: HashMap<PathBuf, ArrayPair<'static>>,
    cache_size: usize,
}

impl Default for SpectrumPlotter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectrumPlotter {
    pub fn new() -> Self {
        Self::with_cache_size(DEFAULT_CACHE_SIZE)
    }

    pub fn with_cache_size(cache_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            cache_size,
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Load `path`, trying the comma convention first and falling back to
    /// tab separation, memoizing the result
    fn load(&mut self, path: &Path) -> Result<ArrayPair<'static>, PlotError> {
        if let Some(pair) = self.cache.get(path) {
            debug!("cache hit for {}", path.display());
            return Ok(pair.clone());
        }
        if self.cache.len() > self.cache_size {
            debug!("flushing spectrum cache of {} entries", self.cache.len());
            self.cache.clear();
        }
        let pair = text::load_ms(path, ',').or_else(|_| text::load_ms(path, '\t'))?;
        self.cache.insert(path.to_path_buf(), pair.clone());
        Ok(pair)
    }

    /// Load a spectrum from `path` and run the full plotting pipeline on it
    pub fn plot_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &SpectrumPlot,
    ) -> Result<PlotData, PlotError> {
        let pair = self.load(path.as_ref())?;
        self.plot_arrays(&pair.xs, &pair.ys, config)
    }

    /// Run the full plotting pipeline over in-memory arrays
    pub fn plot_arrays(
        &self,
        xs: &[f64],
        ys: &[f64],
        config: &SpectrumPlot,
    ) -> Result<PlotData, PlotError> {
        if xs.len() != ys.len() {
            return Err(PlotError::LengthMismatch);
        }
        if xs.is_empty() {
            return Err(PlotError::EmptyData);
        }

        let mut work_xs = xs.to_vec();
        let mut work_ys = ys.to_vec();

        if let Some(process) = config.process {
            process(&mut work_xs, &mut work_ys);
            if work_xs.len() != work_ys.len() {
                return Err(PlotError::LengthMismatch);
            }
        }

        if let (Some(start), Some(end)) = (config.start, config.end) {
            (work_xs, work_ys) = transform::cut_xy(&work_xs, &work_ys, start, end)?;
        }

        if config.scale_relative {
            work_ys = transform::scale(&transform::norm(&work_ys)?, 100.0);
        }

        if let Some(target) = &config.save_as {
            let pair = ArrayPair::wrap(&work_xs, &work_ys);
            let is_svg = target
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
            if is_svg {
                draw_svg_file(&pair, config, target)?;
            } else {
                draw_png_file(&pair, config, target)?;
            }
        }

        // The integral is taken over the raw signal, not the rendered one
        let integral = match config.integrate {
            Some((from, to)) => {
                let (int_xs, int_ys) = transform::cut_xy(xs, ys, from, to)?;
                Some(trapz(&int_xs, &int_ys))
            }
            None => None,
        };

        Ok(PlotData {
            xs: work_xs,
            ys: work_ys,
            integral,
        })
    }
}

/// Render a configured spectrum chart to an SVG file
pub fn draw_svg_file<P: AsRef<Path>>(
    data: &ArrayPair<'_>,
    config: &SpectrumPlot,
    path: P,
) -> Result<(), PlotError> {
    let backend = SVGBackend::new(&path, config.size);
    render_spectrum(data, config, &backend.into_drawing_area())
}

/// Render a configured spectrum chart to a bitmap file
pub fn draw_png_file<P: AsRef<Path>>(
    data: &ArrayPair<'_>,
    config: &SpectrumPlot,
    path: P,
) -> Result<(), PlotError> {
    let backend = BitMapBackend::new(&path, config.size);
    render_spectrum(data, config, &backend.into_drawing_area())
}

fn render_spectrum<DB: DrawingBackend>(
    data: &ArrayPair<'_>,
    config: &SpectrumPlot,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), PlotError> {
    if data.is_empty() {
        return Err(PlotError::EmptyData);
    }
    let (xmin, xmax) = data.x_bounds();
    let xmin = config.start.unwrap_or(xmin);
    let xmax = config.end.unwrap_or(xmax);
    // The crop window accepts bounds in either order; the axis must too
    let (xmin, xmax) = if xmin <= xmax {
        (xmin, xmax)
    } else {
        (xmax, xmin)
    };
    let max_y = data.max_y();
    let ymax = if config.scale_relative {
        105.0
    } else {
        max_y * 1.05
    };

    root.fill(&WHITE).map_err(render_err)?;
    let mut builder = ChartBuilder::on(root);
    builder.margin(15).x_label_area_size(40).y_label_area_size(60);
    if let Some(title) = &config.title {
        builder.caption(title, ("sans-serif", 20).into_font());
    }
    let mut chart = builder
        .build_cartesian_2d(xmin..xmax, 0.0..ymax)
        .map_err(render_err)?;

    let y_desc = if config.scale_relative {
        "rel. intensity / %"
    } else {
        "arb. intensity / counts"
    };
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("m / z")
        .axis_desc_style(("sans-serif", 16).into_font())
        .y_desc(y_desc)
        .draw()
        .map_err(render_err)?;

    let series = LineSeries::new(
        data.iter(),
        ShapeStyle {
            color: BLACK.mix(1.0),
            filled: false,
            stroke_width: 1,
        },
    );
    chart.draw_series(series).map_err(render_err)?;

    if config.annotate {
        let peaks = find_annotation_peaks(&data.xs, &data.ys, config.intensity_threshold);
        let style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let offset = config.margin_y * max_y;
        chart
            .draw_series(peaks.iter().map(|(x, y)| {
                let label = match config.decimal_places {
                    Some(places) => format!("{:.*}", places, x),
                    None => format!("{}", x),
                };
                Text::new(label, (*x, *y + offset), style.clone())
            }))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}
