//! Integration tests for running visitors and placing their results.

use quarry_core::types::{
    Element, HtmlContainer, PdfContainer, ResultNode, ResultsTree, Visitable,
};
use quarry_core::{
    OutputPlacer, PathQuery, PatternVisitor, QuarryError, ResultKind, ResultsFormat, Runner,
    XPathVisitor,
};
use std::fs;
use std::path::{Path, PathBuf};

fn page(source: &str, paragraphs: &[&str]) -> HtmlContainer {
    let mut body = Element::new("body");
    for text in paragraphs {
        body = body.with_child(Element::new("p").with_text(*text));
    }
    HtmlContainer::new(Some(source.into()), Element::new("html").with_child(body))
}

fn xpath_runner(out: &Path, format: ResultsFormat) -> Runner<XPathVisitor> {
    Runner::new(
        XPathVisitor::new(PathQuery::parse("//p").unwrap()),
        OutputPlacer::new(out, format),
    )
}

/// One backing file: a single artifact holding the whole tree.
#[test]
fn test_single_file_writes_one_artifact() {
    let out = tempfile::tempdir().unwrap();
    let runner = xpath_runner(out.path(), ResultsFormat::Xml);

    let summary = runner
        .run(&[Visitable::html(vec![page("a.html", &["alpha", "beta"])])])
        .unwrap();

    assert_eq!(summary.written_count(), 1);
    let written = fs::read_to_string(out.path().join("results.xml")).unwrap();
    assert!(written.contains("<list source=\"a.html\" format=\"html\">"));
    assert!(written.contains(">alpha</result>"));
    assert!(written.contains(">beta</result>"));
    assert!(!out.path().join("about.txt").exists());
}

/// Two or more backing files: one mirrored directory per file, each with a
/// marker and an identical copy of the tree.
#[test]
fn test_multiple_files_are_mirrored() {
    let out = tempfile::tempdir().unwrap();
    let runner = xpath_runner(out.path(), ResultsFormat::Xml);
    let visitable = Visitable::html(vec![
        page("papers/a.html", &["one"]),
        page("papers/b.html", &["two"]),
        page("papers/c.html", &[]),
    ]);

    let summary = runner.run(&[visitable]).unwrap();
    assert_eq!(summary.written_count(), 6);

    let mut copies = Vec::new();
    for name in ["a.html", "b.html", "c.html"] {
        let dir = out.path().join("papers").join(name);
        assert_eq!(fs::read_to_string(dir.join("about.txt")).unwrap(), "created");
        copies.push(fs::read_to_string(dir.join("results.xml")).unwrap());
    }
    assert!(copies.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(copies[0].contains(">one</result>") && copies[0].contains(">two</result>"));
}

/// Each visitable gets its own tree; the aggregate sees all of them.
#[test]
fn test_visitables_are_isolated() {
    let out = tempfile::tempdir().unwrap();
    let runner = xpath_runner(out.path(), ResultsFormat::Json);
    let first = Visitable::html(vec![page("first.html", &["x"])]);
    let second = Visitable::html(vec![page("second.html", &["y", "z"])]);

    let summary = runner.run(&[first, second]).unwrap();

    let aggregate = summary.aggregate.root().unwrap();
    assert_eq!(aggregate.kind(), ResultKind::Root);
    let counts: Vec<_> = aggregate.children().iter().map(|c| c.match_count()).collect();
    assert_eq!(counts, vec![1, 2]);

    // Both single-file placements target the same path; the last one wins
    // and holds only its own visitable's results.
    let written = fs::read_to_string(out.path().join("results.json")).unwrap();
    assert!(written.contains("second.html"));
    assert!(!written.contains("first.html"));
    assert_eq!(summary.placements.len(), 2);
}

#[test]
fn test_empty_input_is_not_an_error() {
    let out = tempfile::tempdir().unwrap();
    let summary = xpath_runner(out.path(), ResultsFormat::Xml).run(&[]).unwrap();
    assert_eq!(summary.visited, 0);
    assert!(summary.aggregate.is_empty());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_visitable_without_containers_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let summary = xpath_runner(out.path(), ResultsFormat::Xml)
        .run(&[Visitable::html(Vec::new())])
        .unwrap();
    assert!(summary.placements[0].missing_results);
    assert_eq!(summary.written_count(), 0);
}

#[test]
fn test_pdf_with_only_derived_html() {
    let out = tempfile::tempdir().unwrap();
    let html = page("report.pdf", &["derived text"]);
    let pdf = PdfContainer::with_derived(Some("report.pdf".into()), Some(html), None);

    let summary = xpath_runner(out.path(), ResultsFormat::Xml)
        .run(&[Visitable::pdf(vec![pdf])])
        .unwrap();

    assert_eq!(summary.match_count(), 1);
    let written = fs::read_to_string(out.path().join("results.xml")).unwrap();
    assert!(written.contains("format=\"html\""));
    assert!(!written.contains("format=\"svg\""));
}

#[test]
fn test_dispatch_errors_end_the_run() {
    let out = tempfile::tempdir().unwrap();
    let runner = Runner::new(
        PatternVisitor::from_pattern("[0-9]+").unwrap(),
        OutputPlacer::new(out.path(), ResultsFormat::Xml),
    );
    let image = Visitable::image(vec![quarry_core::types::ImageContainer::new(
        Some("fig.png".into()),
        Element::new("image"),
    )]);

    let err = runner
        .run(&[Visitable::html(vec![page("a.html", &["42"])]), image])
        .unwrap_err();
    assert!(matches!(err, QuarryError::NotApplicable { .. }));
    // The visitable before the failure was already placed.
    assert!(out.path().join("results.xml").exists());
}

#[test]
fn test_unwritable_output_is_recorded() {
    let out = tempfile::tempdir().unwrap();
    let blocker = out.path().join("blocked");
    fs::write(&blocker, "not a directory").unwrap();

    let summary = xpath_runner(&blocker, ResultsFormat::Xml)
        .run(&[Visitable::html(vec![page("a.html", &["x"])])])
        .unwrap();

    assert_eq!(summary.failure_count(), 1);
    assert!(matches!(
        summary.placements[0].failures[0],
        QuarryError::ArtifactWrite { .. }
    ));
}

#[test]
fn test_failed_mirror_does_not_stop_the_pass() {
    let out = tempfile::tempdir().unwrap();
    fs::create_dir_all(out.path().join("in")).unwrap();
    fs::write(out.path().join("in").join("a.html"), "occupied").unwrap();

    let mut list = ResultNode::container_results(Some("in/a.html".to_string()), "html");
    list.append_child(ResultNode::matched("x", "/p[1]"));
    let mut tree = ResultsTree::new();
    tree.append(list);

    let placer = OutputPlacer::new(out.path(), ResultsFormat::Xml);
    let files = vec![PathBuf::from("in/a.html"), PathBuf::from("in/b.html")];
    let report = placer.place(&tree, &files).unwrap();

    assert!(!report.is_clean());
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.written.len(), 2);
    let mirror = out.path().join("in").join("b.html");
    assert!(mirror.join("about.txt").is_file());
    assert!(fs::read_to_string(mirror.join("results.xml")).unwrap().contains(">x</result>"));
}
