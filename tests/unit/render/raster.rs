use super::*;

const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect x="0" y="0" width="5" height="10" fill="#ff0000"/></svg>"##;

fn size(w: u32, h: u32) -> PixelSize {
    PixelSize::new(w, h).unwrap()
}

#[test]
fn renders_scaled_to_requested_size() {
    let frame = SvgRasterizer::without_fonts()
        .render(SQUARE, size(20, 20))
        .unwrap();
    assert_eq!((frame.width, frame.height), (20, 20));
    assert_eq!(frame.data.len(), 20 * 20 * 4);
    assert_eq!(frame.pixel(2, 10), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(17, 10), Some([0, 0, 0, 0]));
}

#[test]
fn rejects_broken_markup() {
    let err = SvgRasterizer::without_fonts()
        .render("<svg", size(4, 4))
        .unwrap_err();
    assert!(matches!(err, HitsujunError::Parse(_)));
}

#[test]
fn composite_over_blends_premultiplied() {
    let mut base = FrameRGBA::solid(size(2, 1), Rgba8::rgb(255, 255, 255));
    let mut top = FrameRGBA::transparent(size(2, 1));
    top.data[..4].copy_from_slice(&[0, 0, 128, 128]);
    base.composite_over(&top).unwrap();
    assert_eq!(base.pixel(0, 0), Some([127, 127, 255, 255]));
    assert_eq!(base.pixel(1, 0), Some([255, 255, 255, 255]));

    let wrong = FrameRGBA::transparent(size(1, 1));
    assert!(base.composite_over(&wrong).is_err());
}

#[test]
fn to_image_unpremultiplies() {
    let mut frame = FrameRGBA::transparent(size(1, 1));
    frame.data.copy_from_slice(&[64, 0, 0, 128]);
    let img = frame.to_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
}
