use clickframe_grid::{GridError, GridSize, SampleGrid};
use image::imageops::{self, FilterType};
use image::{Pixel, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Which value of a downsampled pixel is used as its brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
    Luma,
}

impl Channel {
    pub fn sample(self, pixel: &Rgb<u8>) -> u8 {
        match self {
            Self::Red => pixel.0[0],
            Self::Green => pixel.0[1],
            Self::Blue => pixel.0[2],
            Self::Luma => pixel.to_luma().0[0],
        }
    }
}

/// How a frame is shrunk to grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resample {
    /// Bilinear over the 2x2 source neighbourhood of each pixel center, the
    /// way OpenCV's `INTER_LINEAR` shrinks an image.
    #[default]
    Linear,
    /// `image`'s triangle filter, which averages the whole covered area.
    Triangle,
}

/// Shrinks `frame` to one pixel per grid cell and reads `channel` from each.
pub fn downsample(
    frame: &RgbImage,
    size: GridSize,
    channel: Channel,
    resample: Resample,
) -> Result<SampleGrid, GridError> {
    size.validate()?;

    let resized = if frame.dimensions() == (size.width, size.height) {
        frame.clone()
    } else {
        match resample {
            Resample::Linear => resize_linear(frame, size.width, size.height),
            Resample::Triangle => {
                imageops::resize(frame, size.width, size.height, FilterType::Triangle)
            }
        }
    };

    let samples = resized.pixels().map(|pixel| channel.sample(pixel)).collect();
    SampleGrid::new(size, samples)
}

/// Source coordinate pair and weight of the second one, for one output index.
fn source_span(index: u32, src_len: u32, dst_len: u32) -> (u32, u32, f32) {
    let scale = src_len as f32 / dst_len as f32;
    let center = ((index as f32 + 0.5) * scale - 0.5).max(0.0);
    let low = (center.floor() as u32).min(src_len - 1);
    let high = (low + 1).min(src_len - 1);
    (low, high, center - low as f32)
}

fn resize_linear(frame: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_width, src_height) = frame.dimensions();
    if src_width == 0 || src_height == 0 {
        return RgbImage::new(width, height);
    }

    RgbImage::from_fn(width, height, |x, y| {
        let (x0, x1, fx) = source_span(x, src_width, width);
        let (y0, y1, fy) = source_span(y, src_height, height);
        let corners = [
            frame.get_pixel(x0, y0),
            frame.get_pixel(x1, y0),
            frame.get_pixel(x0, y1),
            frame.get_pixel(x1, y1),
        ];
        let weights = [(1.0 - fx) * (1.0 - fy), fx * (1.0 - fy), (1.0 - fx) * fy, fx * fy];

        let mut out = [0u8; 3];
        for (c, value) in out.iter_mut().enumerate() {
            let blended: f32 =
                corners.iter().zip(weights).map(|(pixel, w)| pixel.0[c] as f32 * w).sum();
            *value = blended.round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_pick_expected_component() {
        let pixel = Rgb([10, 20, 30]);
        assert_eq!(Channel::Red.sample(&pixel), 10);
        assert_eq!(Channel::Green.sample(&pixel), 20);
        assert_eq!(Channel::Blue.sample(&pixel), 30);
    }

    #[test]
    fn luma_of_grey_is_grey() {
        assert_eq!(Channel::Luma.sample(&Rgb([0, 0, 0])), 0);
        assert_eq!(Channel::Luma.sample(&Rgb([255, 255, 255])), 255);
    }

    #[test]
    fn frame_at_grid_size_is_read_directly() {
        let mut frame = RgbImage::new(2, 1);
        frame.put_pixel(0, 0, Rgb([12, 200, 0]));
        frame.put_pixel(1, 0, Rgb([250, 0, 0]));

        let size = GridSize::new(2, 1).unwrap();
        let samples = downsample(&frame, size, Channel::Red, Resample::Linear).unwrap();

        assert_eq!(samples.as_slice(), &[12, 250]);
    }

    #[test]
    fn solid_frame_downsamples_to_solid_grid() {
        let frame = RgbImage::from_pixel(64, 32, Rgb([255, 255, 255]));

        let size = GridSize::new(8, 4).unwrap();
        let samples = downsample(&frame, size, Channel::Red, Resample::Linear).unwrap();

        assert_eq!(samples.size(), size);
        assert!(samples.as_slice().iter().all(|sample| *sample == 255));
    }

    #[test]
    fn dark_side_stays_darker_after_resize() {
        let frame = RgbImage::from_fn(40, 10, |x, _| {
            if x < 20 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });

        let size = GridSize::new(2, 1).unwrap();
        let samples = downsample(&frame, size, Channel::Red, Resample::Linear).unwrap();

        assert!(samples.as_slice()[0] < 100, "left sample {}", samples.as_slice()[0]);
        assert!(samples.as_slice()[1] > 150, "right sample {}", samples.as_slice()[1]);
    }

    #[test]
    fn linear_reads_the_two_nearest_source_pixels() {
        let values = [0u8, 100, 200, 255];
        let frame = RgbImage::from_fn(4, 1, |x, _| Rgb([values[x as usize], 0, 0]));

        let size = GridSize::new(2, 1).unwrap();
        let samples = downsample(&frame, size, Channel::Red, Resample::Linear).unwrap();

        // Centers land at source x 0.5 and 2.5.
        assert_eq!(samples.as_slice(), &[50, 228]);
    }

    #[test]
    fn linear_ignores_pixels_outside_the_neighbourhood() {
        // A bright stripe between two sample points averages into the
        // triangle filter but never reaches the 2x2 bilinear taps.
        let frame = RgbImage::from_fn(10, 1, |x, _| {
            if x == 5 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let size = GridSize::new(2, 1).unwrap();

        let linear = downsample(&frame, size, Channel::Red, Resample::Linear).unwrap();
        let triangle = downsample(&frame, size, Channel::Red, Resample::Triangle).unwrap();

        assert_eq!(linear.as_slice(), &[0, 0]);
        assert!(triangle.as_slice()[0] > 0 || triangle.as_slice()[1] > 0);
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        let frame = RgbImage::new(4, 4);
        let size = GridSize { width: 0, height: 1 };
        assert!(downsample(&frame, size, Channel::Red, Resample::Linear).is_err());
    }
}
