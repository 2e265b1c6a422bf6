/// Assembler adapters performing the actual SBOM merge
mod sbomasm_engine;

pub use sbomasm_engine::{SbomasmConfig, SbomasmEngine};
