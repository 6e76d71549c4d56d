//! Integration tests for input resolution and end-to-end runs.

use quarry_core::{
    OutputPlacer, PathQuery, PatternVisitor, QuarryError, ResultsFormat, Runner, VisitableKind,
    XPathVisitor,
};
use quarry_extractors::VisitableInput;
use std::fs;
use std::path::{Component, PathBuf};
use tempfile::TempDir;

/// Corpus:
/// a.html, b.html, c.svg, notes.txt, broken.xml, sub/d.html
fn corpus() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.html"), "<html><body><p>Grown in E. coli</p></body></html>").unwrap();
    fs::write(
        root.join("b.html"),
        "<html><body><p>B. subtilis</p><p>none</p></body></html>",
    )
    .unwrap();
    fs::write(root.join("c.svg"), "<svg><text x=\"0\">E. coli curve</text></svg>").unwrap();
    fs::write(root.join("notes.txt"), "ignored").unwrap();
    fs::write(root.join("broken.xml"), "<doc><unclosed></doc>").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("d.html"), "<p>deep</p>").unwrap();
    dir
}

fn resolve(input: VisitableInput) -> Vec<(VisitableKind, usize)> {
    input
        .resolve()
        .unwrap()
        .iter()
        .map(|v| (v.kind(), v.files().len()))
        .collect()
}

#[test]
fn test_directory_groups_by_format() {
    let dir = corpus();
    let found = resolve(VisitableInput::new(vec![dir.path().to_path_buf()]));
    // broken.xml is skipped, notes.txt has no loader, sub/ is not entered.
    assert_eq!(found, vec![(VisitableKind::Html, 2), (VisitableKind::Svg, 1)]);
}

#[test]
fn test_recursive_directory() {
    let dir = corpus();
    let found = resolve(VisitableInput::new(vec![dir.path().to_path_buf()]).recursive(true));
    assert_eq!(found, vec![(VisitableKind::Html, 3), (VisitableKind::Svg, 1)]);
}

#[test]
fn test_extension_filter() {
    let dir = corpus();
    let input = VisitableInput::new(vec![dir.path().to_path_buf()]).with_extensions(["svg"]);
    let found = resolve(input);
    assert_eq!(found, vec![(VisitableKind::Svg, 1)]);
}

#[test]
fn test_file_inputs_stay_separate() {
    let dir = corpus();
    let found = resolve(VisitableInput::new(vec![
        dir.path().join("c.svg"),
        dir.path().join("a.html"),
    ]));
    assert_eq!(found, vec![(VisitableKind::Svg, 1), (VisitableKind::Html, 1)]);
}

#[test]
fn test_forcing_an_unloadable_format() {
    let dir = corpus();
    let input =
        VisitableInput::new(vec![dir.path().join("a.html")]).with_kind(VisitableKind::Table);
    assert!(matches!(input.resolve(), Err(QuarryError::MalformedVisitable(_))));
}

#[test]
fn test_directory_run_mirrors_sources() {
    let dir = corpus();
    let out = tempfile::tempdir().unwrap();
    let visitables = VisitableInput::new(vec![dir.path().to_path_buf()]).resolve().unwrap();

    let runner = Runner::new(
        XPathVisitor::new(PathQuery::parse("//p | //text").unwrap()),
        OutputPlacer::new(out.path(), ResultsFormat::Xml),
    );
    let summary = runner.run(&visitables).unwrap();
    assert_eq!(summary.match_count(), 4);

    // Two HTML files are mirrored; the single SVG goes to results.xml.
    let relative: PathBuf = dir
        .path()
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    for name in ["a.html", "b.html"] {
        let mirror = out.path().join(&relative).join(name);
        assert!(mirror.join("about.txt").is_file(), "missing marker for {name}");
        let copy = fs::read_to_string(mirror.join("results.xml")).unwrap();
        assert!(copy.contains("B. subtilis"));
    }
    let single = fs::read_to_string(out.path().join("results.xml")).unwrap();
    assert!(single.contains("E. coli curve"));
}

#[test]
fn test_pattern_run_over_directory() {
    let dir = corpus();
    let out = tempfile::tempdir().unwrap();
    let visitables = VisitableInput::new(vec![dir.path().to_path_buf()])
        .with_extensions(["html"])
        .resolve()
        .unwrap();

    let runner = Runner::new(
        PatternVisitor::from_pattern(r"[A-Z]\. [a-z]+").unwrap(),
        OutputPlacer::new(out.path(), ResultsFormat::Json),
    );
    let summary = runner.run(&visitables).unwrap();

    let values: Vec<_> = summary
        .aggregate
        .root()
        .unwrap()
        .children()
        .iter()
        .flat_map(|list| list.children())
        .map(|m| m.value().unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["E. coli", "B. subtilis"]);
    assert!(!out.path().join("results.json").exists());
}
