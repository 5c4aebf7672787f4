//! Cover-crop scaling of the background image.

use image::DynamicImage;
use image::imageops::FilterType;

/// Scale `image` so it fully covers a `size`×`size` square, then crop the
/// overflow equally from both ends of the longer side.
///
/// Small images are scaled up. The result is always exactly `size`×`size`.
pub fn cover_crop(image: &DynamicImage, size: u32) -> DynamicImage {
    image.resize_to_fill(size, size, FilterType::Lanczos3)
}
