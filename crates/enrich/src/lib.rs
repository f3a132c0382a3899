pub mod client;
pub mod pipeline;

pub use client::{ClassifyError, DemographicsClient, DemographicsConfig};
pub use pipeline::{enrich, Classifier, Dimension, EnrichError};
