//! Single-page PDF with the captured bitmap as its only content.

use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};

use crate::export::raster::Bitmap;
use crate::export::{ExportError, FitTransform, PageSize};

const IMAGE_NAME: Name<'static> = Name(b"Im1");
/// zlib level for the image stream.
const COMPRESSION_LEVEL: u8 = 6;

/// Writes a one-page document of size `page` with `bitmap` drawn at `placement`.
pub fn embed_single_page(
    bitmap: &Bitmap,
    placement: &FitTransform,
    page: PageSize,
    title: &str,
) -> Result<Vec<u8>, ExportError> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(ExportError::EmbedFailed("bitmap is empty".to_string()));
    }
    let expected_len = bitmap.width as usize * bitmap.height as usize * 4;
    if bitmap.data.len() != expected_len {
        return Err(ExportError::EmbedFailed(format!(
            "bitmap data is {} bytes, expected {expected_len}",
            bitmap.data.len()
        )));
    }
    if !placement.is_finite() {
        return Err(ExportError::EmbedFailed(format!(
            "placement is not finite: {placement:?}"
        )));
    }
    let width = i32::try_from(bitmap.width)
        .map_err(|_| ExportError::EmbedFailed("bitmap too wide".to_string()))?;
    let height = i32::try_from(bitmap.height)
        .map_err(|_| ExportError::EmbedFailed("bitmap too tall".to_string()))?;

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&bitmap.to_rgb(), COMPRESSION_LEVEL);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let info_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page_writer = pdf.page(page_id);
    page_writer
        .media_box(Rect::new(0.0, 0.0, page.width, page.height))
        .parent(page_tree_id)
        .contents(content_id);
    page_writer.resources().x_objects().pair(IMAGE_NAME, image_id);
    page_writer.finish();

    let mut image = pdf.image_xobject(image_id, &compressed);
    image.filter(Filter::FlateDecode);
    image.width(width);
    image.height(height);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    // PDF user space has its origin at the bottom-left corner.
    let bottom = page.height - placement.y - placement.height;
    let mut content = Content::new();
    content.save_state();
    content.transform([
        placement.width,
        0.0,
        0.0,
        placement.height,
        placement.x,
        bottom,
    ]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.document_info(info_id).title(TextStr(title));

    Ok(pdf.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::PageFormat;

    fn white(width: u32, height: u32) -> Bitmap {
        Bitmap {
            width,
            height,
            data: vec![255; (width * height * 4) as usize],
        }
    }

    fn placement(bitmap: &Bitmap) -> FitTransform {
        FitTransform::compute(
            bitmap.width as f32,
            bitmap.height as f32,
            PageFormat::A4.size(),
            20.0,
        )
    }

    #[test]
    fn test_embed_writes_one_page_with_image() {
        let bitmap = white(40, 60);
        let bytes =
            embed_single_page(&bitmap, &placement(&bitmap), PageFormat::A4.size(), "CV").unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/Subtype /Image"));
        assert!(text.contains("/FlateDecode"));
        assert!(text.contains("/Im1 Do"));
        assert!(text.contains("(CV)"));
    }

    #[test]
    fn test_embed_rejects_empty_bitmap() {
        let bitmap = white(0, 0);
        let result = embed_single_page(
            &bitmap,
            &FitTransform {
                ratio: 1.0,
                width: 1.0,
                height: 1.0,
                x: 0.0,
                y: 0.0,
            },
            PageFormat::A4.size(),
            "CV",
        );
        assert!(matches!(result, Err(ExportError::EmbedFailed(_))));
    }

    #[test]
    fn test_embed_rejects_truncated_bitmap() {
        let mut bitmap = white(10, 10);
        bitmap.data.truncate(10);
        let result = embed_single_page(
            &bitmap,
            &placement(&white(10, 10)),
            PageFormat::A4.size(),
            "CV",
        );
        assert!(matches!(result, Err(ExportError::EmbedFailed(_))));
    }
}
