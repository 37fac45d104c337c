use super::*;

#[test]
fn dark24_is_24_distinct_colors_in_documented_order() {
    let colors = resolve_colors(&ColorSpec::default(), 3).unwrap();
    assert_eq!(colors.len(), 24);
    let hexes: Vec<String> = colors.iter().map(|c| c.to_hex()).collect();
    assert_eq!(hexes[0], "#2E91E5");
    assert_eq!(hexes[3], "#FB0D0D");
    assert_eq!(hexes[23], "#AF0038");
    for (i, a) in hexes.iter().enumerate() {
        assert!(!hexes[i + 1..].contains(a), "duplicate color {a}");
    }
}

#[test]
fn palette_names_are_case_insensitive() {
    let colors = resolve_colors(&"Tab10".into(), 1).unwrap();
    assert_eq!(colors.len(), 10);
    assert_eq!(colors[0].to_hex(), "#1F77B4");
}

#[test]
fn colormap_is_sampled_end_to_end() {
    let colors = resolve_colors(&"viridis".into(), 2).unwrap();
    assert_eq!(colors.len(), COLORMAP_SAMPLES);
    assert_eq!(colors[0].to_hex(), "#440154");
    assert_eq!(colors[COLORMAP_SAMPLES - 1].to_hex(), "#FDE725");
}

#[test]
fn single_color_repeats_per_series() {
    let colors = resolve_colors(&"red".into(), 3).unwrap();
    assert_eq!(colors.len(), 3);
    assert!(colors.iter().all(|c| c.to_hex() == "#FF0000"));
}

#[test]
fn explicit_list_keeps_order() {
    let spec = ColorSpec::List(vec!["#000000".into(), "white".into()]);
    let colors = resolve_colors(&spec, 2).unwrap();
    assert_eq!(
        colors.iter().map(|c| c.to_hex()).collect::<Vec<_>>(),
        vec!["#000000", "#FFFFFF"]
    );
}

#[test]
fn unresolvable_specs_are_config_errors() {
    let err = resolve_colors(&"no-such-map".into(), 1).unwrap_err();
    assert!(matches!(err, ChartError::Config(_)));
    assert!(err.to_string().contains("no-such-map"));

    assert!(resolve_colors(&ColorSpec::List(vec![]), 1).is_err());
    assert!(resolve_colors(&ColorSpec::List(vec!["#00ff00".into(), "??".into()]), 2).is_err());
}

#[test]
fn spec_deserializes_from_string_or_list() {
    let s: ColorSpec = serde_json::from_str("\"dark24\"").unwrap();
    assert_eq!(s, ColorSpec::Named("dark24".into()));
    let s: ColorSpec = serde_json::from_str("[\"red\", \"#00ff00\"]").unwrap();
    assert_eq!(s, ColorSpec::List(vec!["red".into(), "#00ff00".into()]));
}

#[test]
fn sample_colormap_edges() {
    let stops = [Color::rgb8(0, 0, 0), Color::rgb8(255, 255, 255)];
    assert!(sample_colormap(&stops, 0).is_empty());
    assert_eq!(sample_colormap(&stops, 1), vec![stops[0]]);
    let three = sample_colormap(&stops, 3);
    assert_eq!(three[1].to_rgba8(), [128, 128, 128, 255]);
}
