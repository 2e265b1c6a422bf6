use async_trait::async_trait;
use dtassemble::prelude::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Mock AssemblyEngine producing a small flat CycloneDX document
///
/// Each input becomes one component named after its project, so tests can
/// check that order and metadata made it through the pipeline.
#[derive(Default, Clone)]
pub struct MockAssemblyEngine {
    fail_populate: Option<String>,
    pub configs: Arc<Mutex<Vec<AssembleParams>>>,
    pub assemble_calls: Arc<Mutex<usize>>,
}

impl MockAssemblyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_populate(message: &str) -> Self {
        Self {
            fail_populate: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn assemble_count(&self) -> usize {
        *self.assemble_calls.lock().unwrap()
    }
}

#[async_trait]
impl AssemblyEngine for MockAssemblyEngine {
    type Config = AssembleParams;

    fn populate_config(&self, params: &AssembleParams) -> Result<AssembleParams> {
        self.configs.lock().unwrap().push(params.clone());
        if let Some(message) = &self.fail_populate {
            return Err(AssembleError::assembly(message.clone()).into());
        }
        Ok(params.clone())
    }

    async fn assemble(&self, config: AssembleParams) -> Result<String> {
        *self.assemble_calls.lock().unwrap() += 1;

        let components: Vec<_> = config
            .input
            .iter()
            .map(|sbom| json!({ "name": sbom.project_id.to_string(), "type": "application" }))
            .collect();
        let mut document = json!({
            "bomFormat": "CycloneDX",
            "specVersion": config.output_spec_version.as_deref().unwrap_or("1.6"),
            "components": components,
        });
        if let Some(metadata) = &config.metadata {
            document["metadata"] = json!({
                "component": {
                    "name": metadata.name,
                    "version": metadata.version,
                    "type": metadata.component_type.as_str(),
                }
            });
        }

        Ok(serde_json::to_string_pretty(&document)?)
    }
}
