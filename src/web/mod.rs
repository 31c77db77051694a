//! Web server for browser-based chord lookup.
//!
//! This module provides the HTTP interface using Axum. Pages are rendered
//! server-side; every result list is also available as JSON.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! chord-search serve
//!
//! # Custom port and auto-open browser
//! chord-search serve --port 3000 --open
//!
//! # Bind to all interfaces behind a public host name
//! chord-search serve --address 0.0.0.0 --base-url https://chords.example.org
//! ```
//!
//! ## Endpoints
//!
//! - `GET /` - Instrument list
//! - `GET /{instrument}` - Redirects to `/{instrument}/`
//! - `GET /{instrument}/` - Empty search page (unknown instrument redirects to `/`)
//! - `GET /{instrument}/{query}` - Ranked chords as HTML
//! - `GET /{instrument}/{query}.json` - Ranked chords as JSON
//! - `GET /api/instruments` - Registered instruments with strings and modifiers

pub mod render;
pub mod server;
