//! tripcop: ELD trip planner client
//!
//! Posts trip parameters to the planning API and renders the returned route
//! as a map scene and each day's hours-of-service log as an SVG timeline.

pub mod api;
pub mod config;
pub mod controller;
pub mod eld_log;
pub mod error;
pub mod haversine;
pub mod map_view;
pub mod markup;
pub mod model;
pub mod polyline;
pub mod report;
pub mod timeline;
pub mod traits;
