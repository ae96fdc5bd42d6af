use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use gl_kit::texture::{PixelFormat, Texture2D, TextureError};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not open image {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode image")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported pixel format {color:?} at {depth:?} bit depth")]
    Unsupported {
        color: png::ColorType,
        depth: png::BitDepth,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

/// A decoded 8-bit image. Dimensions and channel count come from the
/// file itself; any decode problem is a hard error, never a silent
/// empty buffer.
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub pixels: Vec<u8>,
}

impl Image {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ImageError::Io {
            path: path.to_owned(),
            source,
        })?;

        Self::decode(file)
    }

    pub fn decode<R: Read>(reader: R) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::normalize_to_color8());

        let mut reader = decoder.read_info()?;
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels)?;

        let channels = match (info.color_type, info.bit_depth) {
            (png::ColorType::Rgb, png::BitDepth::Eight) => Channels::Rgb,
            (png::ColorType::Rgba, png::BitDepth::Eight) => Channels::Rgba,
            (color, depth) => return Err(ImageError::Unsupported { color, depth }),
        };

        pixels.truncate(info.buffer_size());

        Ok(Self {
            width: info.width,
            height: info.height,
            channels,
            pixels,
        })
    }
}

#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Decodes a PNG and uploads it as a 2D texture, picking the GL format
/// from the detected channel count.
pub fn load_texture<P: AsRef<Path>>(path: P) -> Result<Texture2D, TextureLoadError> {
    let image = Image::open(path)?;

    let format = match image.channels {
        Channels::Rgb => PixelFormat::Rgb8,
        Channels::Rgba => PixelFormat::Rgba8,
    };

    let texture = Texture2D::new(image.width, image.height, &image.pixels, format)?;

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }

        bytes
    }

    #[test]
    fn decodes_rgba() {
        let data = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            0, 0, 0, 128,
        ];
        let bytes = encode_png(2, 2, png::ColorType::Rgba, &data);

        let image = Image::decode(bytes.as_slice()).unwrap();

        assert_eq!(image.width, 2);
        assert_eq!(image.height, 2);
        assert_eq!(image.channels, Channels::Rgba);
        assert_eq!(image.pixels, data);
    }

    #[test]
    fn decodes_rgb() {
        let data = [10, 20, 30, 40, 50, 60];
        let bytes = encode_png(2, 1, png::ColorType::Rgb, &data);

        let image = Image::decode(bytes.as_slice()).unwrap();

        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.channels, Channels::Rgb);
        assert_eq!(image.pixels, data);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let result = Image::decode(&b"definitely not a png"[..]);

        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn grayscale_is_unsupported() {
        let bytes = encode_png(1, 1, png::ColorType::Grayscale, &[128]);

        let result = Image::decode(bytes.as_slice());

        assert!(matches!(result, Err(ImageError::Unsupported { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Image::open("/nonexistent/texture.png");

        assert!(matches!(result, Err(ImageError::Io { .. })));
    }
}
