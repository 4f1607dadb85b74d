// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
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
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]

//! Box-part assembly viewer with ray and drag-rectangle part selection.
//!
//! An assembly is a flat list of rigid, axis-aligned box parts. Users
//! toggle parts in and out of the selection by clicking them (ray pick)
//! or by holding Shift and dragging a rectangle over them (area pick).
//! While Shift is held the orbit camera is disabled so the drag selects
//! instead of rotating the view.
//!
//! # Key entry points
//!
//! - [`engine::AssemblyView`] - owns scene, camera, and selection state and
//!   consumes [`input::InputEvent`]s
//! - [`selection::SelectionEngine`] - the Shift/drag state machine and the
//!   per-part toggle rule
//! - [`scene::Scene`] - registration-ordered registry of pickable parts
//! - [`host::mount`] - attaches a view to an [`host::EventDispatcher`] and
//!   returns a guard that tears everything down on drop
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything outside the `viewer` feature is GPU-free. Input events flow
//! through a single-threaded dispatcher into the view; the selection engine
//! reads part geometry from the scene, toggles the camera controller's
//! enable switch, and flips per-part highlight flags. The frame driver
//! ticks the camera and hands a read-only [`host::FrameView`] to whichever
//! render collaborator is attached (the bundled wgpu renderer when
//! `viewer` is enabled).

pub mod camera;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod options;
pub mod part;
pub mod scene;
pub mod selection;
pub mod util;

#[cfg(feature = "viewer")]
pub mod gpu;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::AssemblyView;
pub use error::PartPickError;
pub use input::{InputEvent, Key, MouseButton};
pub use part::{PartId, PartRecord};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
