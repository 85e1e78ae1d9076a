// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Particle-based text morphing.
//!
//! A string is sampled into a cloud of glyph-coverage points and drawn as
//! particles. Toggling to a second string dissolves the particles into a
//! scatter cloud and reforms them on the new glyphs; changing a string in
//! place snaps the particles onto the new text without the dissolve.
//!
//! # Key entry points
//!
//! - [`engine::MorphEngine`] - per-frame orchestration; call
//!   [`frame`](engine::MorphEngine::frame) once per display frame
//! - [`engine::FrameLoop`] - start/stop wrapper over a host
//!   [`FrameScheduler`](engine::FrameScheduler)
//! - [`options::Options`] - timing, sampling and per-style tuning, loadable
//!   from TOML presets
//! - [`sampler::FontRasterizer`] - `cosmic-text` glyph coverage source
//!
//! # Frame flow
//!
//! Each frame the engine resamples whichever sides changed text or size,
//! lazily creates the particle pool, starts a transition if the active side
//! or its text changed, advances the [`animation::TransitionController`],
//! and repaints the overlay [`renderer::Surface`] with the style's
//! [`renderer::DrawTreatment`].

pub mod animation;
pub mod color;
pub mod engine;
pub mod error;
pub mod options;
pub mod particles;
pub mod renderer;
pub mod sampler;
pub mod util;
