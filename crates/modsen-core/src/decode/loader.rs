use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, Orientation};
use crate::raster::RasterImage;

/// Decode an image from bytes.
///
/// When `apply_exif_orientation` is set, the EXIF orientation tag (if any) is
/// applied so the result is upright.
///
/// # Errors
///
/// `DecodeError::InvalidFormat` if the format is not recognized or not
/// compiled in, `DecodeError::CorruptedFile` if decoding fails part way.
pub fn decode_bytes(
    bytes: &[u8],
    apply_exif_orientation: bool,
) -> Result<RasterImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;
    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;
    log::debug!(
        "decoded {format:?} {}x{} {:?}",
        img.width(),
        img.height(),
        img.color()
    );

    let img = if apply_exif_orientation {
        apply_orientation(img, get_orientation(bytes))
    } else {
        img
    };
    Ok(RasterImage::from_dynamic(img))
}

/// Read and decode an image file.
pub fn decode_file(
    path: impl AsRef<Path>,
    apply_exif_orientation: bool,
) -> Result<RasterImage, DecodeError> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| DecodeError::Io(e.to_string()))?;
    decode_bytes(&bytes, apply_exif_orientation)
}

/// EXIF orientation of an encoded image; `Orientation::Normal` when there is
/// no EXIF block or no orientation tag.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Undo an EXIF orientation so the image displays upright.
pub fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
