//! Generates the Superstore sales final report.
//!
//! The pipeline is linear: [`dataset`] loads the cleaned CSV into a
//! dataframe, [`insights`] reduces it to the aggregate scalars, [`narrative`]
//! composes the scalars (plus the externally supplied [`metrics`]) into the
//! four-section report model, and [`builder`] renders the model to a PDF.

pub mod builder;
pub mod dataset;
pub mod error;
pub mod fonts;
pub mod insights;
pub mod metrics;
pub mod model;
pub mod narrative;
pub mod richtext;
