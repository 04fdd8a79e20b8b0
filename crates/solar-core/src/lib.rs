//! Hardware-independent core library for the solar e-paper dashboard
//!
//! This crate contains all platform-agnostic logic of the dashboard: the data
//! model, the aggregation of raw portal time series into screen records, the
//! rendering of the four status screens onto 264x176 e-paper canvases, the
//! explicit screen cache, and the button-driven dashboard controller.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).
//! Everything that talks to the outside world (portal login, HTTP, display
//! hardware, files) is reached through the traits in [`collaborators`].

#![no_std]

extern crate alloc;

pub mod aggregator;
pub mod cache;
pub mod canvas;
pub mod collaborators;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod pages;
pub mod render;
pub mod snapshot;
pub mod ui;
