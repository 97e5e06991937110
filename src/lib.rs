// veille - personal data exposure scanner
// Copyright (c) 2025 Veille Contributors
// Licensed under the MIT License

//! # veille - personal data exposure scanner
//!
//! Veille scans extracted document text for personal data relevant to
//! data-protection compliance (France-oriented: NIR social security numbers,
//! SIRET registration numbers, `+33` phone forms, French postal addresses)
//! and scores each file's exposure risk.
//!
//! ## Overview
//!
//! The pipeline for one document:
//!
//! 1. **Pattern extraction** locates candidates (emails, phones, dates,
//!    national ids, business ids, postal addresses, IP addresses)
//! 2. **Structural validation** drops syntactically implausible candidates
//!    (checksums, calendar rules, normal forms)
//! 3. **Contextual classification** separates genuine person references
//!    from organizational noise and flags template documents
//! 4. **Confidence scoring** assigns a 0-1 confidence per detection and
//!    applies per-type acceptance thresholds
//! 5. **Risk aggregation** folds per-file detections into corpus risk tiers
//!
//! Person-name candidates come from an external named-entity recognizer
//! behind the [`detection::ner::NameRecognizer`] trait; everything else is
//! self-contained.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detection`] - Patterns, validators, contextual classifier, scorer
//! - [`risk`] - Per-file risk records and the corpus risk report
//! - [`scan`] - Batch scanning over text sources with progress reporting
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Exclusion lists and scan configuration
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use veille::config::ExclusionConfig;
//! use veille::detection::ner::{NoopRecognizer, RecognizerHandle};
//! use veille::detection::DetectionEngine;
//! use veille::domain::DataType;
//!
//! let engine = DetectionEngine::new(
//!     ExclusionConfig::default(),
//!     RecognizerHandle::from_recognizer(Arc::new(NoopRecognizer)),
//! );
//!
//! let detections = engine.detect("Contact: jean.dupont@example.com", "note.txt");
//! assert_eq!(detections.of(DataType::Email).len(), 1);
//! ```
//!
//! ## Error Handling
//!
//! Detection itself never fails: malformed candidates are dropped, empty
//! text is a zero-detection outcome, and a recognizer failure degrades the
//! document to its pattern-based detections (see
//! [`domain::DetectOutcome`]). Infrastructure errors use
//! [`domain::VeilleError`].

pub mod cli;
pub mod config;
pub mod detection;
pub mod domain;
pub mod logging;
pub mod risk;
pub mod scan;
