//! # oxidized-registry
//!
//! Validation for a registry of contributor profiles and infrastructure
//! resources (Terraform modules and templates).
//!
//! `oxidized-registry` walks a registry directory, reads every `README.md`,
//! splits it into YAML-style frontmatter and a markdown body, and reports
//! every layout, metadata, and body violation it finds. It is meant to run
//! once per CI build and produces reports in human-readable, JSON, or
//! [SARIF] formats.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use oxidized_registry::{config::Config, output, pipeline};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let report = pipeline::run_validation(&config).expect("registry root is unreadable");
//!
//! if report.passed {
//!     println!("Registry is valid!");
//! } else {
//!     let text = output::format_report(&report, &output::OutputFormat::Pretty);
//!     print!("{text}");
//! }
//! ```
//!
//! ## Architecture
//!
//! Validation is a sequence of phases, each gating the next:
//!
//! | Phase | Module | Checks |
//! |-------|--------|--------|
//! | structure | [`structure`] | namespace and resource directory layout |
//! | file-load | [`loader`] | every README can be read |
//! | parse | [`document`], [`frontmatter`], [`entity`] | frontmatter fences, syntax, schema keys, unique identities |
//! | field-validation | [`validators`] | field contents and markdown body structure |
//! | cross-reference | [`crossref`] | employer references, relative avatars and icons |
//!
//! [`pipeline`] runs the phases; [`finding`] holds the report types and
//! [`output`] renders them.
//!
//! [SARIF]: https://sarifweb.azurewebsites.net/

pub mod config;
pub mod crossref;
pub mod document;
pub mod entity;
pub mod error;
pub mod finding;
pub mod frontmatter;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod structure;
pub mod validators;
