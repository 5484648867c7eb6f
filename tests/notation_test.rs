// Parsing scenarios: measures, beams, slur pairing, row packing

use jianpu_wasm::beams::{beam_spans, BeamSpan};
use jianpu_wasm::models::{parse_trace, ContentItem, Duration, Measure, Note, Rhythm, Score, ScoreConfig};
use jianpu_wasm::parse::{parse_score, parse_token};

fn config(beats: f64) -> ScoreConfig {
    ScoreConfig {
        beats_per_bar: beats,
        ..ScoreConfig::default()
    }
}

fn only_measure(score: &Score) -> &Measure {
    let measures: Vec<&Measure> = score.measures().collect();
    assert_eq!(measures.len(), 1, "expected exactly one measure");
    measures[0]
}

fn note_by_source<'a>(score: &'a Score, source: &str) -> &'a Note {
    score
        .notes_with_rows()
        .map(|(_, note)| note)
        .find(|note| note.source == source)
        .unwrap_or_else(|| panic!("no note '{}'", source))
}

#[test]
fn test_four_quarters() {
    let score = parse_score("1 2 3 4", &config(4.0));
    let measure = only_measure(&score);
    assert!(measure.is_valid);
    let notes: Vec<&Note> = measure.notes().collect();
    assert_eq!(notes.len(), 4);
    assert!(notes.iter().all(|n| n.duration == Duration::beat()));
    assert!(notes.iter().all(|n| beam_spans(std::slice::from_ref(*n)).is_empty()));
}

#[test]
fn test_eighth_pairs() {
    let score = parse_score("q1q2 q3q4", &config(4.0));
    let measure = only_measure(&score);
    assert_eq!(measure.content.len(), 2);
    for item in &measure.content {
        let group = item.as_group().unwrap();
        assert_eq!(group.duration(), Duration::beat());
        assert_eq!(beam_spans(&group.notes), vec![BeamSpan { level: 1, start: 0, end: 1 }]);
    }
    // two beats against a four-beat bar
    assert_eq!(measure.duration, Duration::from_ratio(2, 1));
    assert!(!measure.is_valid);

    let two_four = parse_score("q1q2 q3q4", &config(2.0));
    assert!(only_measure(&two_four).is_valid);
}

#[test]
fn test_sixteenth_run() {
    let score = parse_score("s1s2s3s4", &config(1.0));
    let measure = only_measure(&score);
    assert!(measure.is_valid);
    assert_eq!(measure.content.len(), 1);

    let group = measure.content[0].as_group().unwrap();
    assert!(group.notes.iter().all(|n| n.rhythm == Rhythm::Sixteenth));
    assert_eq!(
        beam_spans(&group.notes),
        vec![
            BeamSpan { level: 1, start: 0, end: 3 },
            BeamSpan { level: 2, start: 0, end: 3 },
        ]
    );
}

#[test]
fn test_simple_slur() {
    let score = parse_score("1~> 2 3<~", &config(3.0));
    assert!(only_measure(&score).is_valid);
    assert_eq!(score.slurs.len(), 1);

    let link = score.slurs[0];
    assert_eq!(link.start.note, note_by_source(&score, "1~>").id);
    assert_eq!(link.end.note, note_by_source(&score, "3<~").id);
    assert!(link.is_same_row());
}

#[test]
fn test_unmatched_tilde() {
    let score = parse_score("1~", &config(1.0));
    let measure = only_measure(&score);
    assert!(measure.is_valid);
    let note = measure.notes().next().unwrap();
    assert!(note.syntax_error);
    assert!(score.slurs.is_empty());
}

#[test]
fn test_nested_slurs_pair_lifo() {
    let score = parse_score("s1~> s2~> s3<~ s4<~", &config(1.0));
    let pairs: Vec<(String, String)> = score
        .slurs
        .iter()
        .map(|link| {
            let start = score.find_note(link.start.note).unwrap();
            let end = score.find_note(link.end.note).unwrap();
            (start.source.clone(), end.source.clone())
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("s2~>".to_string(), "s3<~".to_string()),
            ("s1~>".to_string(), "s4<~".to_string()),
        ]
    );
}

#[test]
fn test_tilde_count_decides_error_flag() {
    for (token, flagged) in [
        ("1~>", false),
        ("<~1", false),
        ("<~1~>", false),
        ("1~>~", true),
        ("~1", true),
        ("q1~q2", true),
        ("q1q2", false),
    ] {
        let parsed = parse_token(token);
        assert_eq!(parsed.has_syntax_error, flagged, "token {}", token);
        assert!(parsed.notes.iter().all(|n| n.syntax_error == flagged), "token {}", token);
    }
}

#[test]
fn test_rows_keep_measure_order() {
    let source = "1 2 3 4 | 2 2 2 2 | 3 3 3 3 | 4 4 4 4 | 5 5 5 5 | 6 6 6 6";
    let score = parse_score(
        source,
        &ScoreConfig {
            measures_per_row: 4,
            ..ScoreConfig::default()
        },
    );
    assert_eq!(score.rows.len(), 2);
    assert_eq!(score.rows[1].fillers, 2);

    let firsts: Vec<String> = score
        .rows
        .iter()
        .flat_map(|row| row.measures.iter())
        .map(|m| m.notes().next().unwrap().source.clone())
        .collect();
    assert_eq!(firsts, vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn test_lines_do_not_share_rows() {
    let score = parse_score("1 2 3 4\n\n5 6 7 1'", &ScoreConfig::default());
    assert_eq!(score.rows.len(), 2);
    assert!(score.rows.iter().all(|row| row.measures.len() == 1 && row.fillers == 3));
}

#[test]
fn test_slur_across_rows() {
    let score = parse_score(
        "1 2 3 4~> | 5<~ 6 7 1",
        &ScoreConfig {
            measures_per_row: 1,
            ..ScoreConfig::default()
        },
    );
    assert_eq!(score.slurs.len(), 1);
    let link = score.slurs[0];
    assert_eq!((link.start.row, link.end.row), (0, 1));
    assert!(!link.is_same_row());
}

#[test]
fn test_trace_matches_validity() {
    let source = "1 q2. s3 - | q1q2q3 s4s5 -- | 1. q2 3 4 | 5";
    let score = parse_score(source, &config(4.0));
    for measure in score.measures() {
        let total = parse_trace(&measure.trace).unwrap();
        assert_eq!(total, measure.duration, "trace '{}'", measure.trace);
        let valid = (total.as_f64() - 4.0).abs() < 0.01;
        assert_eq!(valid, measure.is_valid, "trace '{}'", measure.trace);
    }
}

#[test]
fn test_dash_runs_extend_measure() {
    let score = parse_score("1 ---", &config(4.0));
    let measure = only_measure(&score);
    assert!(measure.is_valid);
    assert_eq!(
        measure.content.iter().filter(|item| matches!(item, ContentItem::Dash)).count(),
        3
    );
}

#[test]
fn test_beam_grouping_idempotent() {
    let notes = parse_token("q1s2s3q4").notes;
    assert_eq!(beam_spans(&notes), beam_spans(&notes));
}
