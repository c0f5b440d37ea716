//! End-to-end pipeline tests over a temporary icon source tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use iconsmith::theme::builtin_themes;
use iconsmith::{Error, IconSpec, Kind, PipelineConfig, RunError, Style, Theme, run};

fn icon_svg() -> String {
    r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M4 4h16v16H4z"/><circle cx="12" cy="12" r="3" fill="currentColor"/></svg>"##
        .to_string()
}

/// A complete theme whose 11 kinds each map to a distinct slug and color.
fn test_theme() -> Theme {
    Theme::from_entries(
        "testtheme",
        Kind::ALL.iter().enumerate().map(|(i, kind)| {
            let color: iconsmith::HexColor = format!("#{:02x}00{:02x}", i * 20, 255 - i * 20)
                .parse()
                .unwrap();
            (*kind, IconSpec::new(format!("slug-{i}"), color))
        }),
    )
}

/// Writes one SVG per test-theme slug under the given style directory.
fn write_sources(icons_dir: &Path, style: Style) {
    let dir = icons_dir.join(style.as_str());
    fs::create_dir_all(&dir).unwrap();
    for i in 0..Kind::ALL.len() {
        fs::write(dir.join(format!("slug-{i}.svg")), icon_svg()).unwrap();
    }
}

fn config(icons_dir: &Path, out_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        icons_dir: icons_dir.to_path_buf(),
        out_dir: out_dir.to_path_buf(),
        size_px: 16,
        padding: 2,
        fallback_color: "#231f20".parse().unwrap(),
    }
}

#[test]
fn end_to_end_produces_all_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let icons_dir = tmp.path().join("icons");
    let out_dir = tmp.path().join("out");
    write_sources(&icons_dir, Style::Outline);
    write_sources(&icons_dir, Style::Filled);

    let summary = run(&config(&icons_dir, &out_dir), &[test_theme()]).unwrap();
    assert!(summary.is_success(), "errors: {:?}", summary.errors);
    assert_eq!(summary.atlases_built, 2); // one per style

    for style in Style::ALL {
        let dir = out_dir.join(format!("testtheme_{}", style.as_str()));

        for kind in Kind::ALL {
            let rgba = fs::read(dir.join(format!("{kind}.rgba"))).unwrap();
            assert_eq!(rgba.len(), 16 * 16 * 4);
        }

        let atlas = image::open(dir.join("atlas.png")).unwrap().to_rgba8();
        assert_eq!(atlas.width(), 11 * 16 + 10 * 2);
        assert_eq!(atlas.height(), 16);

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("atlas.json")).unwrap()).unwrap();
        assert_eq!(index["image"], "atlas.png");
        assert_eq!(index["size"], 16);
        assert_eq!(index["padding"], 2);
        let map = index["map"].as_object().unwrap();
        assert_eq!(map.len(), 11);
        for (i, kind) in Kind::ALL.iter().enumerate() {
            let slot = &map[kind.as_str()];
            assert_eq!(slot["x"], (i * 18) as u64);
            assert_eq!(slot["y"], 0);
            assert_eq!(slot["w"], 16);
            assert_eq!(slot["h"], 16);
            assert_eq!(slot["index"], i as u64);
        }
    }

    assert_eq!(
        summary.preview.as_deref(),
        Some(out_dir.join("all_themes_combined.png").as_path())
    );
    assert!(out_dir.join("all_themes_combined.png").is_file());
}

#[test]
fn filled_style_falls_back_to_outline_sources() {
    let tmp = tempfile::tempdir().unwrap();
    let icons_dir = tmp.path().join("icons");
    let out_dir = tmp.path().join("out");
    // sources exist only under outline/
    write_sources(&icons_dir, Style::Outline);
    fs::create_dir_all(icons_dir.join(Style::Filled.as_str())).unwrap();

    let summary = run(&config(&icons_dir, &out_dir), &[test_theme()]).unwrap();
    assert!(summary.is_success(), "errors: {:?}", summary.errors);

    let filled = out_dir.join("testtheme_filled");
    assert!(filled.join("atlas.png").is_file());
    let rgba = fs::read(filled.join("Field.rgba")).unwrap();
    assert_eq!(rgba.len(), 16 * 16 * 4);
}

#[test]
fn incomplete_theme_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let icons_dir = tmp.path().join("icons");
    let out_dir = tmp.path().join("out");
    write_sources(&icons_dir, Style::Outline);
    write_sources(&icons_dir, Style::Filled);

    let partial = Theme::from_entries(
        "partial",
        [(
            Kind::Field,
            IconSpec::new("slug-0", "#102030".parse().unwrap()),
        )],
    );

    let summary = run(&config(&icons_dir, &out_dir), &[partial]).unwrap();
    assert_eq!(summary.errors.len(), 2); // one per style
    for err in &summary.errors {
        assert!(matches!(
            err,
            RunError::Atlas {
                source: Error::IncompleteTheme { .. },
                ..
            }
        ));
    }
    // fail-fast: not even the theme directory exists
    assert!(!out_dir.join("partial_outline").exists());
    assert!(!out_dir.join("partial_filled").exists());
}

#[test]
fn missing_slug_fails_that_atlas_but_not_siblings() {
    let tmp = tempfile::tempdir().unwrap();
    let icons_dir = tmp.path().join("icons");
    let out_dir = tmp.path().join("out");
    write_sources(&icons_dir, Style::Outline);

    let mut entries: BTreeMap<Kind, IconSpec> = Kind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| (*kind, IconSpec::new(format!("slug-{i}"), "#334455".parse().unwrap())))
        .collect();
    entries.insert(
        Kind::Property,
        IconSpec::new("does-not-exist", "#334455".parse().unwrap()),
    );
    let broken = Theme::from_entries("broken", entries);

    let summary = run(&config(&icons_dir, &out_dir), &[test_theme(), broken]).unwrap();

    // the broken theme fails under both styles, the good one succeeds
    assert_eq!(summary.atlases_built, 2);
    assert_eq!(summary.errors.len(), 2);
    for err in &summary.errors {
        match err {
            RunError::Icon {
                theme,
                kind,
                slug,
                source,
                ..
            } => {
                assert_eq!(theme, "broken");
                assert_eq!(*kind, Kind::Property);
                assert_eq!(slug, "does-not-exist");
                assert!(matches!(source, Error::MissingSource { .. }));
            }
            other => panic!("expected per-icon error, got {other}"),
        }
    }

    // a failed unit must not leave a shrunk or placeholder atlas behind
    assert!(!out_dir.join("broken_outline").join("atlas.png").exists());
    assert!(!out_dir.join("broken_outline").join("atlas.json").exists());
    assert!(out_dir.join("testtheme_outline").join("atlas.png").is_file());
}

#[test]
fn builtin_sweep_over_generated_sources() {
    let tmp = tempfile::tempdir().unwrap();
    let icons_dir = tmp.path().join("icons");
    let out_dir = tmp.path().join("out");

    // every slug any built-in theme references, under both styles
    let themes = builtin_themes();
    for style in Style::ALL {
        let dir = icons_dir.join(style.as_str());
        fs::create_dir_all(&dir).unwrap();
        for theme in &themes {
            for kind in Kind::ALL {
                let slug = &theme.get(kind).unwrap().slug;
                fs::write(dir.join(format!("{slug}.svg")), icon_svg()).unwrap();
            }
        }
    }

    let summary = run(&config(&icons_dir, &out_dir), &themes).unwrap();
    assert!(summary.is_success(), "errors: {:?}", summary.errors);
    assert_eq!(summary.atlases_built, themes.len() * 2);
    assert!(summary.preview.is_some());
}
