// Display list, lyrics and slur geometry against a measured layout

use jianpu_wasm::diagnostics::collect_diagnostics;
use jianpu_wasm::html_layout::{LayoutEngine, RenderItem, RenderMeasure};
use jianpu_wasm::models::{NoteId, Score, ScoreConfig, ScoreHeader};
use jianpu_wasm::parse::parse_score;
use jianpu_wasm::slurs::{compute_geometry, MeasuredLayout, Rect, SlurShape};
use jianpu_wasm::JianpuError;

/// Lay every note out on a 30px grid, one row every 100px
fn grid_layout(score: &Score) -> MeasuredLayout {
    let mut layout = MeasuredLayout::new();
    for row in &score.rows {
        let top = 100.0 * row.index as f32;
        layout = layout.with_row(row.index, Rect::new(0.0, top, 600.0, 80.0));
        for (col, note) in row.notes().enumerate() {
            layout = layout.with_note(note.id, Rect::new(30.0 * col as f32, top + 40.0, 12.0, 20.0));
        }
    }
    layout
}

fn lyrics_of(measure: &RenderMeasure) -> Vec<Vec<String>> {
    measure
        .items
        .iter()
        .filter_map(|item| match item {
            RenderItem::Group(group) => Some(group.lyrics.clone()),
            RenderItem::Dash(_) => None,
        })
        .collect()
}

#[test]
fn test_lyric_lines_attach_to_groups() {
    let source = "1 q2q3 4 -\n## la -- mi\n## do re\n5 6 7 1";
    let score = parse_score(source, &ScoreConfig::default());
    assert_eq!(score.rows.len(), 2, "lyric lines must not become music");

    let display = LayoutEngine::new().compute_layout(&score);
    let lyrics = lyrics_of(&display.rows[0].measures[0]);
    assert_eq!(
        lyrics,
        vec![
            vec!["la".to_string(), "do".to_string()],
            vec!["\u{00A0}".to_string(), "re".to_string()],
            vec!["mi".to_string(), "\u{00A0}".to_string()],
        ]
    );

    // the second music line has no lyric block
    assert!(lyrics_of(&display.rows[1].measures[0]).iter().all(Vec::is_empty));
}

#[test]
fn test_orphan_lyric_line_is_ignored() {
    let score = parse_score("## stray words\n1 2 3 4", &ScoreConfig::default());
    assert_eq!(score.rows.len(), 1);
    assert!(score.rows[0].notes().all(|n| n.pitch != jianpu_wasm::Pitch::Unknown));

    // a blank line ends the lyric block
    let score = parse_score("1 2 3 4\n\n## late", &ScoreConfig::default());
    let display = LayoutEngine::new().compute_layout(&score);
    assert!(lyrics_of(&display.rows[0].measures[0]).iter().all(Vec::is_empty));
}

#[test]
fn test_header_and_meta() {
    let config = ScoreConfig {
        beats_per_bar: 3.0,
        key_signature: "G".to_string(),
        header: ScoreHeader {
            title: Some("Little Star".to_string()),
            subtitle: Some("   ".to_string()),
            ..ScoreHeader::default()
        },
        ..ScoreConfig::default()
    };
    let display = LayoutEngine::new().compute_layout(&parse_score("1 1 5", &config));
    assert_eq!(display.header.title.as_deref(), Some("Little Star"));
    assert_eq!(display.header.subtitle, None);
    assert_eq!(display.header.meta, "1=G 3/4");
}

#[test]
fn test_error_classes_render_flagged() {
    let score = parse_score("1~ 2 3", &ScoreConfig::default());
    let display = LayoutEngine::new().compute_layout(&score);
    let measure = &display.rows[0].measures[0];
    assert!(measure.inner_classes.contains(&"measure-error".to_string()));

    let flagged: Vec<bool> = display
        .notes()
        .map(|n| n.classes.contains(&"error-syntax".to_string()))
        .collect();
    assert_eq!(flagged, vec![true, false, false]);

    let diagnostics = collect_diagnostics(&score);
    assert_eq!(diagnostics.count_kind("token_syntax_error"), 1);
    assert_eq!(diagnostics.count_kind("measure_duration_mismatch"), 1);
}

#[test]
fn test_same_row_geometry() {
    let score = parse_score("1~> 2 3<~ 4", &ScoreConfig::default());
    let geometry = compute_geometry(&score, &grid_layout(&score)).unwrap();
    assert_eq!(geometry.len(), 1);
    assert_eq!(geometry[0].shape, SlurShape::SameRow);

    let ribbon = geometry[0].ribbons[0];
    let scale = score.config.scale;
    // top center of the glyph, lifted by 1.5 x scale
    assert!((ribbon.start.x - 6.0).abs() < 1e-4);
    assert!((ribbon.start.y - (40.0 - 1.5 * scale)).abs() < 1e-4);
    assert!((ribbon.end.x - 66.0).abs() < 1e-4);
    assert!(ribbon.control.y < ribbon.start.y);
    assert_eq!(geometry[0].svg_paths().len(), 1);
    assert!(geometry[0].svg_paths()[0].starts_with("M "));
}

#[test]
fn test_cross_row_geometry() {
    let config = ScoreConfig {
        measures_per_row: 1,
        ..ScoreConfig::default()
    };
    let score = parse_score("1 2 3 4~> | 5<~ 6 7 1", &config);
    let geometry = compute_geometry(&score, &grid_layout(&score)).unwrap();
    assert_eq!(geometry.len(), 1);
    assert_eq!(geometry[0].shape, SlurShape::CrossRow);

    let outgoing = geometry[0].ribbons[0];
    let incoming = geometry[0].ribbons[1];
    assert!((outgoing.end.x - 590.0).abs() < 1e-4);
    assert!((incoming.start.x - 10.0).abs() < 1e-4);
    // the outgoing arc stays on the first row, the incoming one on the second
    assert!(outgoing.start.y < 100.0);
    assert!(incoming.end.y > 100.0);
}

#[test]
fn test_unmeasured_note_defers() {
    let score = parse_score("1~> 2 3<~ 4", &ScoreConfig::default());
    let partial = MeasuredLayout::new().with_note(NoteId(0), Rect::new(0.0, 0.0, 10.0, 10.0));
    let err = compute_geometry(&score, &partial).unwrap_err();
    assert!(err.is_deferral());
    assert_eq!(err, JianpuError::NoteNotMeasured(NoteId(2)));
}

#[test]
fn test_layout_report_wire_shape() {
    let json = r#"{
        "notes": [
            { "note": 0, "rect": { "left": 0, "top": 40, "width": 12, "height": 20 } },
            { "note": 2, "rect": { "left": 60, "top": 40, "width": 12, "height": 20 } }
        ],
        "rows": [ { "row": 0, "rect": { "left": 0, "top": 0, "width": 600, "height": 80 } } ]
    }"#;
    let layout: MeasuredLayout = serde_json::from_str(json).unwrap();
    let score = parse_score("1~> 2 3<~ 4", &ScoreConfig::default());
    assert_eq!(compute_geometry(&score, &layout).unwrap().len(), 1);
}
