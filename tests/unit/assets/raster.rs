use super::*;

fn raster_with(width: u32, height: u32, opaque: &[(u32, u32)]) -> RasterImage {
    let mut data = vec![0u8; (width * height * 4) as usize];
    for &(x, y) in opaque {
        let i = ((y * width + x) * 4) as usize;
        data[i..i + 4].copy_from_slice(&[200, 10, 10, 255]);
    }
    RasterImage::from_rgba8(width, height, data).unwrap()
}

#[test]
fn rejects_mismatched_buffer_length() {
    assert!(RasterImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(RasterImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn zero_sized_raster_has_no_bounds() {
    let r = RasterImage::from_rgba8(0, 0, vec![]).unwrap();
    assert_eq!(r.opaque_bounds(), None);
    assert_eq!(r.opaque_pixel_count(), 0);
}

#[test]
fn bounds_are_tight() {
    let r = raster_with(8, 8, &[(2, 3), (5, 1), (4, 6)]);
    assert_eq!(r.opaque_bounds(), Some(PixelRect::new(2, 1, 4, 6)));
    assert_eq!(r.opaque_pixel_count(), 3);
}

#[test]
fn alpha_threshold_separates_background() {
    let mut data = vec![0u8; 3 * 4];
    data[3] = ALPHA_THRESHOLD - 1;
    data[7] = ALPHA_THRESHOLD;
    data[11] = 255;
    let r = RasterImage::from_rgba8(3, 1, data).unwrap();
    assert!(!r.is_opaque(0, 0));
    assert!(r.is_opaque(1, 0));
    assert!(r.is_opaque(2, 0));
}

#[test]
fn fingerprint_tracks_content_and_shape() {
    let a = raster_with(4, 4, &[(1, 1)]);
    let b = raster_with(4, 4, &[(1, 1)]);
    let c = raster_with(4, 4, &[(2, 1)]);
    let d = RasterImage::transparent(8, 2).unwrap();
    let e = RasterImage::transparent(2, 8).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_ne!(d.fingerprint(), e.fingerprint());
}
