//! quarry-core - Core library for quarry.
//!
//! This crate provides the visitable and container types, the path-query
//! engine, the dispatcher that routes each visitable to a visitor, results
//! aggregation and output placement.
//!
//! # Example
//!
//! ```
//! use quarry_core::{OutputPlacer, PathQuery, ResultsFormat, Runner, XPathVisitor};
//! use quarry_core::types::{Element, HtmlContainer, Visitable};
//!
//! let page = HtmlContainer::new(
//!     Some("paper.html".into()),
//!     Element::new("html").with_child(Element::new("title").with_text("Results")),
//! );
//! let out = std::env::temp_dir().join("quarry-doc-example");
//! let runner = Runner::new(
//!     XPathVisitor::new(PathQuery::parse("//title").unwrap()),
//!     OutputPlacer::new(&out, ResultsFormat::Xml),
//! );
//! let summary = runner.run(&[Visitable::html(vec![page])]).unwrap();
//! assert_eq!(summary.match_count(), 1);
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod query;
pub mod runner;
pub mod search;
pub mod traits;
pub mod types;
pub mod visitor;

// Re-export commonly used types
pub use config::QuarryConfig;
pub use error::{ErrorCode, QuarryError, QuarryResult};
pub use output::{OutputPlacer, OutputTarget, PlacementReport, ResultsFormat};
pub use query::{PathQuery, QueryMatch};
pub use runner::{RunSummary, Runner};
pub use search::PathSearcher;
pub use traits::{PdfConverter, Searcher};
pub use types::{
    Container, ContentNode, Element, ResultKind, ResultNode, ResultsTree, Visitable, VisitableKind,
};
pub use visitor::{Dispatcher, HandlerTable, Handling, PatternVisitor, Visitor, XPathVisitor};
