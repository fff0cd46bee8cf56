use super::*;
use crate::fixtures;

fn humanoid_model() -> CharacterModel {
    CharacterModel::from_raster(&fixtures::humanoid(), &SegmentBands::default()).unwrap()
}

#[test]
fn empty_object_is_the_default_config() {
    let config = CharacterConfig::from_json_str("{}").unwrap();
    assert_eq!(config, CharacterConfig::default());
    assert_eq!(config.clips().len(), 3);
}

#[test]
fn partial_sections_keep_their_defaults() {
    let config = CharacterConfig::from_json_str(
        r#"{
            "bands": { "headLine": 0.3 },
            "scale": 2,
            "padding": 4,
            "layout": { "columns": 4 },
            "threading": { "parallel": true, "threads": 2 },
            "clips": [
                {
                    "name": "wave",
                    "rate": 6,
                    "loop": true,
                    "poses": [{}, { "rightShoulder": -1.2 }]
                }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(config.bands.head_line, 0.3);
    assert_eq!(config.bands.hip_line, SegmentBands::default().hip_line);
    assert_eq!(config.layout.columns, 4);
    assert!(config.threading.parallel);
    assert!(config.threading.static_frame_elision);
    assert_eq!(config.clips().len(), 1);
    assert_eq!(config.clips()[0].name, "wave");
}

#[test]
fn padding_and_scale_size_the_frame() {
    let config = CharacterConfig {
        scale: 2.0,
        padding: 4,
        ..CharacterConfig::default()
    };
    let s = config.render_settings(&humanoid_model());
    assert_eq!((s.frame_width, s.frame_height), (48, 80));
    assert_eq!(s.origin, Vec2::new(4.0, 4.0));
    assert_eq!(s.scale, 2.0);
}

#[test]
fn explicit_render_settings_win() {
    let explicit = RenderSettings::fit(10, 10, 3.0);
    let config = CharacterConfig {
        render: Some(explicit.clone()),
        padding: 9,
        ..CharacterConfig::default()
    };
    assert_eq!(config.render_settings(&humanoid_model()), explicit);
}

#[test]
fn invalid_sections_are_rejected() {
    for json in [
        r#"{ "scale": 0 }"#,
        r#"{ "bands": { "headLine": 0.9 } }"#,
        r#"{ "layout": { "columns": 0 } }"#,
        r#"{ "threading": { "threads": 0 } }"#,
        r#"{ "render": { "frameWidth": 0, "frameHeight": 4 } }"#,
        r#"{ "clips": [{ "name": "a", "rate": 1, "poses": [] }] }"#,
    ] {
        assert!(
            matches!(CharacterConfig::from_json_str(json), Err(RigError::Validation(_))),
            "{json}"
        );
    }
    assert!(matches!(
        CharacterConfig::from_json_str(r#"{ "scale": "big" }"#),
        Err(RigError::Serde(_))
    ));
}

#[test]
fn missing_file_reports_the_path() {
    let err = CharacterConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.json"));
}
