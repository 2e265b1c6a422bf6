mod params_translator;
mod params_validator;

pub use params_translator::ParamsTranslator;
pub use params_validator::{ParamsValidator, RawAssembleFlags};
