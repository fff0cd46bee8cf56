use super::*;
use crate::{
    fixtures,
    palette::extract_palette,
    segment::{bands::SegmentBands, segmenter::segment},
};

fn compress_with(raster: &RasterImage, bands: &SegmentBands) -> (Palette, PartMap, PartCommands) {
    let (palette, index) = extract_palette(raster);
    let map = segment(raster, bands).unwrap();
    let commands = compress_parts(raster, &map, &index).unwrap();
    (palette, map, commands)
}

fn assert_round_trip(raster: &RasterImage, palette: &Palette, map: &PartMap, cmds: &PartCommands) {
    for (part, list) in cmds.iter() {
        let replayed = replay_commands(list, palette, raster.width(), raster.height()).unwrap();
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                let expected = map.get(x, y) == Some(part);
                assert_eq!(
                    replayed.is_opaque(x, y),
                    expected,
                    "{part} coverage at ({x}, {y})"
                );
                if expected {
                    assert_eq!(replayed.rgb(x, y), raster.rgb(x, y), "{part} color at ({x}, {y})");
                }
            }
        }
    }
}

fn assert_disjoint(raster: &RasterImage, cmds: &PartCommands) {
    let mut hits = vec![0u32; (raster.width() * raster.height()) as usize];
    for (_, list) in cmds.iter() {
        for c in list {
            for y in c.y..c.y + c.height {
                for x in c.x..c.x + c.width {
                    hits[(y * raster.width() + x) as usize] += 1;
                }
            }
        }
    }
    assert!(hits.iter().all(|&n| n <= 1), "some pixel is covered twice");
    let covered = hits.iter().filter(|&&n| n == 1).count();
    assert_eq!(covered, raster.opaque_pixel_count());
}

#[test]
fn torso_square_compresses_to_one_command() {
    let raster = fixtures::solid(10, 10, fixtures::SHIRT);
    let bands = SegmentBands {
        head_line: 0.0,
        hip_line: 1.0,
        knee_line: 1.0,
        arm_margin: 0.5,
        ..SegmentBands::default()
    };
    let (_, _, cmds) = compress_with(&raster, &bands);
    assert_eq!(cmds.get(PartId::Torso), &[DrawCommand::new(0, 0, 0, 10, 10)]);
    for part in PartId::ALL {
        if part != PartId::Torso {
            assert!(cmds.get(part).is_empty(), "{part}");
        }
    }
}

#[test]
fn humanoid_parts_are_single_rectangles_where_possible() {
    let raster = fixtures::humanoid();
    let (palette, map, cmds) = compress_with(&raster, &SegmentBands::default());

    let shirt = palette.index().get(fixtures::SHIRT).unwrap();
    assert_eq!(cmds.get(PartId::Torso), &[DrawCommand::new(shirt, 5, 9, 6, 10)]);
    assert_eq!(cmds.get(PartId::LeftArm).len(), 1);
    // head block plus neck stub
    assert_eq!(cmds.get(PartId::Head).len(), 2);
    // pants rows 19..26 cross the knee line at row 25
    let left_shin = cmds.get(PartId::LeftShin);
    assert_eq!(left_shin.len(), 2);
    assert_eq!(left_shin[0].rect(), PixelRect::new(5, 25, 3, 1));
    assert_eq!(left_shin[1].rect(), PixelRect::new(5, 26, 3, 6));

    assert_round_trip(&raster, &palette, &map, &cmds);
    assert_disjoint(&raster, &cmds);
}

#[test]
fn speckled_rasters_round_trip_and_stay_disjoint() {
    for seed in 0..16 {
        let raster = fixtures::speckled(19, 27, seed);
        let (palette, map, cmds) = compress_with(&raster, &SegmentBands::default());
        assert_round_trip(&raster, &palette, &map, &cmds);
        assert_disjoint(&raster, &cmds);
    }
}

#[test]
fn commands_are_ordered_by_top_left() {
    let raster = fixtures::speckled(23, 23, 5);
    let (_, _, cmds) = compress_with(&raster, &SegmentBands::default());
    for (_, list) in cmds.iter() {
        assert!(list.windows(2).all(|w| (w[0].y, w[0].x) < (w[1].y, w[1].x)));
    }
}

#[test]
fn merge_only_joins_touching_identical_spans() {
    let runs = [
        DrawCommand::new(0, 2, 0, 3, 1),
        DrawCommand::new(0, 2, 1, 3, 1),
        DrawCommand::new(0, 2, 2, 4, 1),
        DrawCommand::new(1, 2, 3, 3, 1),
        DrawCommand::new(0, 2, 5, 3, 1),
    ];
    let merged = merge_vertical(&runs);
    assert_eq!(merged, vec![
        DrawCommand::new(0, 2, 0, 3, 2),
        DrawCommand::new(0, 2, 2, 4, 1),
        DrawCommand::new(1, 2, 3, 3, 1),
        DrawCommand::new(0, 2, 5, 3, 1),
    ]);
}

#[test]
fn transparent_raster_compresses_to_nothing() {
    let raster = RasterImage::transparent(5, 5).unwrap();
    let (palette, _, cmds) = compress_with(&raster, &SegmentBands::default());
    assert!(palette.is_empty());
    assert!(cmds.is_empty());
}

#[test]
fn mismatched_map_is_rejected() {
    let a = fixtures::solid(4, 4, fixtures::SKIN);
    let b = fixtures::solid(5, 4, fixtures::SKIN);
    let (_, index) = extract_palette(&a);
    let map = segment(&b, &SegmentBands::default()).unwrap();
    assert!(compress_parts(&a, &map, &index).is_err());
}

#[test]
fn stats_sum_pixels_and_commands() {
    let raster = fixtures::humanoid();
    let (_, _, cmds) = compress_with(&raster, &SegmentBands::default());
    let total = cmds
        .iter()
        .map(|(_, l)| CompressionStats::of(l))
        .fold(CompressionStats::default(), |a, b| a + b);
    assert_eq!(total.pixels, raster.opaque_pixel_count() as u64);
    assert_eq!(total.commands, cmds.total() as u64);
    assert!(total.pixels_per_command() > 1.0);
}

#[test]
fn draw_command_serializes_as_array() {
    let c = DrawCommand::new(2, 3, 4, 5, 6);
    assert_eq!(serde_json::to_string(&c).unwrap(), "[2,3,4,5,6]");
    let back: DrawCommand = serde_json::from_str("[2,3,4,5,6]").unwrap();
    assert_eq!(back, c);
}

#[test]
fn replay_rejects_out_of_bounds_and_unknown_colors() {
    let palette = Palette::from_colors(vec![fixtures::SKIN]).unwrap();
    assert!(replay_commands(&[DrawCommand::new(0, 3, 3, 2, 2)], &palette, 4, 4).is_err());
    assert!(replay_commands(&[DrawCommand::new(1, 0, 0, 1, 1)], &palette, 4, 4).is_err());
}
