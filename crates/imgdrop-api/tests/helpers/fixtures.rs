//! Test fixtures: small images in each format the service sees.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn sample(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbaImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgba([(x * 8) as u8, (y * 8) as u8, 96, 255]);
    }
    DynamicImage::ImageRgba8(img)
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn jpeg() -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(sample(24, 16).to_rgb8()), ImageFormat::Jpeg)
}

pub fn png() -> Vec<u8> {
    encode(sample(24, 16), ImageFormat::Png)
}

pub fn gif() -> Vec<u8> {
    encode(sample(8, 8), ImageFormat::Gif)
}

pub fn webp() -> Vec<u8> {
    encode(sample(16, 16), ImageFormat::WebP)
}

pub fn svg() -> Vec<u8> {
    br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="red"/></svg>"#.to_vec()
}
