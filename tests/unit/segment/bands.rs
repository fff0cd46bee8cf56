use super::*;

#[test]
fn defaults_validate() {
    SegmentBands::default().validate().unwrap();
}

#[test]
fn rejects_out_of_order_lines() {
    let bands = SegmentBands {
        head_line: 0.6,
        hip_line: 0.5,
        ..SegmentBands::default()
    };
    assert!(bands.validate().is_err());

    let bands = SegmentBands {
        knee_line: 1.2,
        ..SegmentBands::default()
    };
    assert!(bands.validate().is_err());
}

#[test]
fn rejects_negative_and_non_finite() {
    let bands = SegmentBands {
        arm_margin: -0.1,
        ..SegmentBands::default()
    };
    assert!(bands.validate().is_err());

    let bands = SegmentBands {
        hip_spread: f64::NAN,
        ..SegmentBands::default()
    };
    assert!(bands.validate().is_err());
}

#[test]
fn resolve_scales_by_bounding_box() {
    let bands = SegmentBands {
        head_line: 0.25,
        hip_line: 0.5,
        knee_line: 0.75,
        center: 0.5,
        arm_margin: 0.1,
        shoulder_spread: 0.2,
        hip_spread: 0.1,
    };
    let lines = bands.resolve(PixelRect::new(10, 20, 20, 40));
    assert_eq!(lines.head_y, 30.0);
    assert_eq!(lines.hip_y, 40.0);
    assert_eq!(lines.knee_y, 50.0);
    assert_eq!(lines.center_x, 20.0);
    assert_eq!(lines.arm_margin, 2.0);
    assert_eq!(lines.shoulder_spread, 4.0);
    assert_eq!(lines.hip_spread, 2.0);
}

#[test]
fn partial_json_fills_defaults() {
    let bands: SegmentBands = serde_json::from_str(r#"{ "headLine": 0.1 }"#).unwrap();
    assert_eq!(bands.head_line, 0.1);
    assert_eq!(bands.hip_line, SegmentBands::default().hip_line);
}
