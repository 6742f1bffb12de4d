//! Raster output with tiny-skia and resvg.
//!
//! `Canvas` draws points straight onto a pixmap, which lets playback and
//! frame export add only the newly revealed points each tick.
//! `svg_to_png` rasterizes a finished SVG document with resvg.

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use resvg::usvg;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use phyllo::svg::OUTLINE_WIDTH;
use phyllo::{ColorScheme, Params, PointRecord, Reveal};

use super::error::CliError;

/// Largest raster, in pixels, that `Canvas` and `svg_to_png` will allocate.
pub const MAX_PIXELS: u64 = 1 << 27;

/// Pixel dimensions of the canvas at `scale`, refused when over `MAX_PIXELS`.
pub fn pixel_size(params: &Params, scale: f32) -> Result<(u32, u32), CliError> {
    let width = (params.width * scale as f64).ceil().max(1.0);
    let height = (params.height * scale as f64).ceil().max(1.0);
    if width * height > MAX_PIXELS as f64 {
        return Err(CliError::Render(format!(
            "{}x{} canvas at scale {} exceeds the {} pixel limit",
            params.width, params.height, scale, MAX_PIXELS
        )));
    }
    Ok((width as u32, height as u32))
}

/// A black pixmap sized to the canvas, with points drawn onto it.
pub struct Canvas {
    pixmap: Pixmap,
    transform: Transform,
    scheme: ColorScheme,
}

impl Canvas {
    /// Create a canvas of `params.width × params.height` times `scale` pixels.
    pub fn new(params: &Params, scale: f32) -> Result<Self, CliError> {
        let (width, height) = pixel_size(params, scale)?;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            CliError::Render(format!("could not create {}x{} pixmap", width, height))
        })?;
        pixmap.fill(Color::BLACK);

        Ok(Self {
            pixmap,
            transform: Transform::from_scale(scale, scale),
            scheme: params.colors,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Change the fill mapping for subsequent draws.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    /// Wipe back to the background.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::BLACK);
    }

    /// Draw one filled ellipse with its outline.
    pub fn draw(&mut self, point: &PointRecord) {
        let Some(path) = PathBuilder::from_circle(point.x as f32, point.y as f32, point.size as f32)
        else {
            return;
        };

        let color = self.scheme.color(point);
        let mut fill = Paint::default();
        fill.set_color_rgba8(color.r, color.g, color.b, 255);
        fill.anti_alias = true;
        self.pixmap.fill_path(&path, &fill, FillRule::Winding, self.transform, None);

        let mut outline = Paint::default();
        outline.set_color_rgba8(0, 0, 0, 255);
        outline.anti_alias = true;
        let stroke = Stroke {
            width: OUTLINE_WIDTH as f32,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(&path, &outline, &stroke, self.transform, None);
    }

    /// Draw a run of reveals in order.
    pub fn draw_reveals(&mut self, reveals: &[Reveal]) {
        for reveal in reveals {
            self.draw(&reveal.point);
        }
    }

    /// RGBA value of a pixel, `None` when out of bounds.
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap
            .pixel(x, y)
            .map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
    }

    /// Copy into an `image` buffer for terminal display.
    pub fn to_image(&self) -> Result<DynamicImage, CliError> {
        // Every pixel is opaque, so premultiplied data equals straight RGBA.
        let rgba = RgbaImage::from_raw(self.width(), self.height(), self.pixmap.data().to_vec())
            .ok_or_else(|| CliError::Render("pixmap size does not match buffer".to_string()))?;
        Ok(DynamicImage::ImageRgba8(rgba))
    }

    pub fn save_png(&self, path: &Path) -> Result<(), CliError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| CliError::Render(format!("failed to write {}: {}", path.display(), e)))
    }
}

/// Rasterize an SVG document to a PNG file using resvg.
pub fn svg_to_png(
    svg_content: &str,
    png_path: &Path,
    params: &Params,
    scale: f32,
) -> Result<(u32, u32), CliError> {
    let (width, height) = pixel_size(params, scale)?;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| CliError::Render(e.to_string()))?;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        CliError::Render(format!("could not create {}x{} pixmap", width, height))
    })?;
    pixmap.fill(Color::BLACK);

    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .map_err(|e| CliError::Render(format!("failed to write {}: {}", png_path.display(), e)))?;

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyllo::{generate_point, RevealSchedule};

    #[test]
    fn canvas_starts_black() {
        let canvas = Canvas::new(&Params::default(), 1.0).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (800, 800));
        assert_eq!(canvas.pixel(400, 400), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(800, 0), None);
        assert_eq!(canvas.pixel(0, 800), None);
        assert_eq!(canvas.pixel(799, 799), Some([0, 0, 0, 255]));
    }

    #[test]
    fn oversized_canvas_is_refused() {
        let params = Params { width: 100_000.0, height: 100_000.0, ..Params::default() };
        assert!(matches!(Canvas::new(&params, 1.0), Err(CliError::Render(_))));
        // Within budget at 1x, over it once scaled
        let params = Params { width: 10_000.0, height: 10_000.0, ..Params::default() };
        assert!(pixel_size(&params, 1.0).is_ok());
        assert!(pixel_size(&params, 4.0).is_err());
    }

    #[test]
    fn oversized_png_is_refused_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let params = Params { count: 1, width: 100_000.0, height: 100_000.0, ..Params::default() };
        let svg = phyllo::render_svg(phyllo::generate(&params), &params).unwrap();

        let err = svg_to_png(&svg, &path, &params, 1.0).unwrap_err();
        assert!(err.to_string().contains("pixel limit"), "{}", err);
        assert!(!path.exists());
    }

    #[test]
    fn first_point_paints_center_red() {
        let params = Params::default();
        let mut canvas = Canvas::new(&params, 1.0).unwrap();
        canvas.draw(&generate_point(0, &params));

        assert_eq!(canvas.pixel(400, 400), Some([255, 0, 0, 255]));
        // Well outside the 6-unit radius stays black
        assert_eq!(canvas.pixel(420, 400), Some([0, 0, 0, 255]));
    }

    #[test]
    fn scale_enlarges_canvas() {
        let params = Params { width: 100.0, height: 50.0, ..Params::default() };
        let canvas = Canvas::new(&params, 2.0).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (200, 100));
    }

    #[test]
    fn clear_resets_pixels() {
        let params = Params { count: 20, ..Params::default() };
        let schedule = RevealSchedule::from_params(&params).unwrap();
        let mut canvas = Canvas::new(&params, 1.0).unwrap();

        canvas.draw_reveals(schedule.as_slice());
        assert_ne!(canvas.pixel(400, 400), Some([0, 0, 0, 255]));

        canvas.clear();
        assert_eq!(canvas.pixel(400, 400), Some([0, 0, 0, 255]));
    }

    #[test]
    fn image_matches_canvas_size() {
        let canvas = Canvas::new(&Params { width: 64.0, height: 32.0, ..Params::default() }, 1.0).unwrap();
        let image = canvas.to_image().unwrap();
        assert_eq!((image.width(), image.height()), (64, 32));
    }
}
