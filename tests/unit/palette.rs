use super::*;

const RED: Rgb = Rgb::new(255, 0, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

fn raster_from_rows(rows: &[&[Option<Rgb>]]) -> RasterImage {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for row in rows {
        for px in *row {
            match px {
                Some(c) => data.extend_from_slice(&c.to_rgba8()),
                None => data.extend_from_slice(&[9, 9, 9, 0]),
            }
        }
    }
    RasterImage::from_rgba8(width, height, data).unwrap()
}

#[test]
fn ranks_by_descending_frequency() {
    let r = raster_from_rows(&[
        &[Some(RED), Some(BLUE), Some(BLUE)],
        &[Some(BLUE), Some(GREEN), Some(GREEN)],
    ]);
    let (palette, index) = extract_palette(&r);
    assert_eq!(palette.colors(), &[BLUE, GREEN, RED]);
    assert_eq!(index.get(BLUE), Some(0));
    assert_eq!(index.get(GREEN), Some(1));
    assert_eq!(index.get(RED), Some(2));
}

#[test]
fn ties_break_by_first_seen_order() {
    let r = raster_from_rows(&[&[Some(GREEN), Some(RED), Some(BLUE)], &[
        Some(BLUE),
        Some(RED),
        Some(GREEN),
    ]]);
    let (palette, _) = extract_palette(&r);
    assert_eq!(palette.colors(), &[GREEN, RED, BLUE]);
}

#[test]
fn transparent_pixels_are_not_colors() {
    let r = raster_from_rows(&[&[None, Some(RED), None]]);
    let (palette, index) = extract_palette(&r);
    assert_eq!(palette.len(), 1);
    assert_eq!(index.get(Rgb::new(9, 9, 9)), None);
}

#[test]
fn fully_transparent_raster_yields_empty_palette() {
    let r = RasterImage::transparent(6, 4).unwrap();
    let (palette, index) = extract_palette(&r);
    assert!(palette.is_empty());
    assert!(index.is_empty());
}

#[test]
fn extraction_is_deterministic() {
    let mut rows = Vec::new();
    for y in 0..12u8 {
        let row: Vec<Option<Rgb>> = (0..12u8)
            .map(|x| Some(Rgb::new((x * 7 + y) % 5, y % 3, 0)))
            .collect();
        rows.push(row);
    }
    let borrowed: Vec<&[Option<Rgb>]> = rows.iter().map(|r| r.as_slice()).collect();
    let r = raster_from_rows(&borrowed);
    let (a, _) = extract_palette(&r);
    let (b, _) = extract_palette(&r);
    assert_eq!(a, b);
}

#[test]
fn histogram_counts_match_pixels() {
    let r = raster_from_rows(&[&[Some(RED), Some(RED), Some(BLUE)]]);
    let hist = color_histogram(&r);
    assert_eq!(hist, vec![
        ColorCount {
            color: RED,
            pixels: 2
        },
        ColorCount {
            color: BLUE,
            pixels: 1
        },
    ]);
}

#[test]
fn authored_palette_rejects_duplicates() {
    assert!(Palette::from_colors(vec![RED, BLUE]).is_ok());
    assert!(Palette::from_colors(vec![RED, BLUE, RED]).is_err());
}
