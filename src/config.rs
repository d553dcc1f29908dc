//! Configuration for layout and export.

use std::path::PathBuf;

/// Environment variable that overrides [`ExportConfig::output_dir`].
pub const EXPORT_DIR_ENV: &str = "FNPLOT_EXPORT_DIR";

/// Geometry of the plot canvas and the layout heuristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Side of the square canvas, in pixel units.
    pub canvas_size: f64,

    /// Margin on every side between the canvas edge and the plotted domain.
    pub margin: f64,

    /// Data units added beyond the furthest sample point.
    pub domain_padding: f64,

    /// Spacing of the dense curve samples, in data units.
    pub sample_step: f64,

    /// Extra inset inside the margins a sample must respect to carry the label.
    pub label_inset: f64,

    /// How far in from the rightmost visible sample the label anchor sits,
    /// as a fraction of the visible sample count.
    pub label_anchor_fraction: f64,

    /// Approximate number of grid lines per axis.
    pub grid_target_ticks: f64,

    /// Upper bound on the dense curve samples of one plan. Inputs whose
    /// domain would need more are rejected.
    pub max_curve_samples: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_size: 600.0,
            margin: 40.0,
            domain_padding: 2.0,
            sample_step: 0.1,
            label_inset: 20.0,
            label_anchor_fraction: 0.1,
            grid_target_ticks: 10.0,
            max_curve_samples: 100_000,
        }
    }
}

impl LayoutConfig {
    pub fn with_canvas_size(mut self, size: f64) -> Self {
        self.canvas_size = size.max(1.0);
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin.clamp(0.0, (self.canvas_size / 2.0 - 1.0).max(0.0));
        self
    }

    pub fn with_domain_padding(mut self, padding: f64) -> Self {
        self.domain_padding = padding.max(f64::EPSILON);
        self
    }

    pub fn with_sample_step(mut self, step: f64) -> Self {
        self.sample_step = step.max(1e-4);
        self
    }

    pub fn with_label_inset(mut self, inset: f64) -> Self {
        self.label_inset = inset.max(0.0);
        self
    }

    pub fn with_label_anchor_fraction(mut self, fraction: f64) -> Self {
        self.label_anchor_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_grid_target_ticks(mut self, ticks: f64) -> Self {
        self.grid_target_ticks = ticks.max(1.0);
        self
    }

    pub fn with_max_curve_samples(mut self, samples: usize) -> Self {
        self.max_curve_samples = samples.max(1);
        self
    }

    /// Dense samples needed for a domain of half-extent `m`: `ceil(2m / step)`.
    pub fn curve_samples_for(&self, half_extent: f64) -> f64 {
        (2.0 * half_extent / self.sample_step).ceil().max(0.0)
    }

    /// Whether a domain of half-extent `m` stays within [`Self::max_curve_samples`].
    pub fn fits_sample_budget(&self, half_extent: f64) -> bool {
        self.curve_samples_for(half_extent) <= self.max_curve_samples as f64
    }

    /// Pixel interval the domain is mapped onto: `[margin, size - margin]`.
    pub fn plot_range(&self) -> (f64, f64) {
        (self.margin, self.canvas_size - self.margin)
    }

    /// Pixel interval a sample's y must fall in to anchor the label.
    pub fn label_window(&self) -> (f64, f64) {
        let (lo, hi) = self.plot_range();
        (lo + self.label_inset, hi - self.label_inset)
    }
}

/// What the exported Word document looks like and where it lands.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Side of the embedded square plot image, in pixels.
    pub image_size: u32,
    /// Directory the document is written to.
    pub output_dir: PathBuf,
    pub file_name: String,
    pub heading: String,
    pub table_caption: String,
    pub graph_caption: String,
    pub footer: String,
    /// Decimal places of the y-values in the document table.
    pub table_precision: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            image_size: 500,
            output_dir: PathBuf::from("."),
            file_name: "DoThiHamSo.docx".to_owned(),
            heading: "BÀI TẬP VẼ ĐỒ THỊ HÀM SỐ".to_owned(),
            table_caption: "1. Bảng giá trị:".to_owned(),
            graph_caption: "2. Đồ thị hàm số:".to_owned(),
            footer: "Được tạo tự động bởi ứng dụng GraphToán THCS.".to_owned(),
            table_precision: 2,
        }
    }
}

impl ExportConfig {
    /// Defaults, with the output directory taken from `FNPLOT_EXPORT_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(EXPORT_DIR_ENV).filter(|d| !d.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.file_name = name;
        }
        self
    }

    pub fn with_image_size(mut self, size: u32) -> Self {
        self.image_size = size.max(16);
        self
    }

    /// Full path of the document.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_geometry() {
        let config = LayoutConfig::default();
        assert_eq!(config.plot_range(), (40.0, 560.0));
        assert_eq!(config.label_window(), (60.0, 540.0));
    }

    #[test]
    fn setters_clamp() {
        let config = LayoutConfig::default()
            .with_label_anchor_fraction(3.0)
            .with_sample_step(0.0)
            .with_domain_padding(-1.0);
        assert_eq!(config.label_anchor_fraction, 1.0);
        assert!(config.sample_step > 0.0);
        assert!(config.domain_padding > 0.0);
    }

    #[test]
    fn sample_budget() {
        let config = LayoutConfig::default();
        assert_eq!(config.curve_samples_for(8.0), 160.0);
        assert!(config.fits_sample_budget(4_999.0));
        assert!(!config.fits_sample_budget(5_000.1));
        assert!(!config.fits_sample_budget(1e10));
        assert_eq!(
            LayoutConfig::default().with_max_curve_samples(0).max_curve_samples,
            1
        );
    }

    #[test]
    fn export_path() {
        let config = ExportConfig::default()
            .with_output_dir("/tmp/out")
            .with_file_name("");
        assert_eq!(config.output_path(), PathBuf::from("/tmp/out/DoThiHamSo.docx"));
        assert_eq!(config.image_size, 500);
    }
}
