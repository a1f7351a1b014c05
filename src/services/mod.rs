pub mod conversion_pipeline;

pub use conversion_pipeline::{
    default_destination, output_name, suggested_output_name, ConversionPipeline, ConversionReport,
};
