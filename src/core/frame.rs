//! Fit-to-box scaling of decoded frames for display.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Frame prepared for the display viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    /// Frame index the image was decoded from.
    pub index: u64,
    pub image: RgbaImage,
}

impl DisplayFrame {
    /// Scale `image` to fit inside `max_width` x `max_height`, preserving aspect ratio.
    pub fn fit(index: u64, image: RgbaImage, max_width: u32, max_height: u32) -> Self {
        let (width, height) = fit_to_box(image.width(), image.height(), max_width, max_height);
        let image = if (width, height) == image.dimensions() {
            image
        } else {
            imageops::resize(&image, width, height, FilterType::Triangle)
        };
        Self { index, image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Aspect-preserving size inside a box. The constrained axis matches the box,
/// the other axis is derived from the aspect ratio and rounded down.
pub fn fit_to_box(src_width: u32, src_height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let src_width = u64::from(src_width.max(1));
    let src_height = u64::from(src_height.max(1));
    let max_width = u64::from(max_width.max(1));
    let max_height = u64::from(max_height.max(1));

    // Integer cross-multiplication keeps the floor exact.
    if max_width * src_height > src_width * max_height {
        let width = (max_height * src_width / src_height).max(1);
        (width as u32, max_height as u32)
    } else {
        let height = (max_width * src_height / src_width).max(1);
        (max_width as u32, height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_source() {
        assert_eq!(fit_to_box(1920, 1080, 640, 480), (640, 360));
    }

    #[test]
    fn test_fit_tall_source() {
        assert_eq!(fit_to_box(1080, 1920, 640, 480), (270, 480));
    }

    #[test]
    fn test_fit_rounds_down() {
        // The wider-than-box source is width constrained.
        assert_eq!(fit_to_box(1000, 700, 640, 480), (640, 448));
        // 480 * (700 / 1000) = 336
        assert_eq!(fit_to_box(700, 1000, 640, 480), (336, 480));
        assert_eq!(fit_to_box(333, 1000, 640, 480), (159, 480));
    }

    #[test]
    fn test_fit_upscales_small_sources() {
        assert_eq!(fit_to_box(320, 240, 640, 480), (640, 480));
    }

    #[test]
    fn test_display_frame_resizes() {
        let image = RgbaImage::from_pixel(1920, 1080, image::Rgba([10, 20, 30, 255]));
        let frame = DisplayFrame::fit(7, image, 640, 480);
        assert_eq!((frame.width(), frame.height()), (640, 360));
        assert_eq!(frame.index, 7);
        assert_eq!(frame.image.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }
}
