//! # fixture-watch
//!
//! Polls the Premier League content API for fixture news and raises a
//! desktop notification (plus an optional email) when a new article
//! appears.
//!
//! ## Architecture
//!
//! ```text
//! Poller → Fetcher → change detection → Notifier → desktop / email
//! ```
//!
//! Everything runs sequentially on a single thread; the only state is the
//! id of the last article seen, kept in memory.
//!
//! ## Quick Start
//!
//! ```bash
//! # Desktop notifications, checking every 30 minutes
//! fixture-watch
//!
//! # Check every 10 minutes and also send email
//! fixture-watch -e -p 10
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the fetcher and notifier together.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Command-line [`Config`](config::Config) and file-backed
/// [`Settings`](config::Settings).
pub mod config;

/// Core domain models: [`ContentItem`](domain::ContentItem) and
/// [`PollState`](domain::PollState).
pub mod domain;

/// HTTP fetching of the latest content item.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Timestamped log output.
pub mod logging;

/// Desktop and email notification sinks.
pub mod notifier;

/// The poll loop with change detection and retry backoff.
pub mod poller;
