use crate::assembly::domain::{AssembleParams, DtAssembleParams};

/// ParamsTranslator projects Dependency-Track parameters onto the generic
/// assembly parameters
///
/// Server credentials and the raw project identifiers are dropped; every
/// other field, including the fetched input documents, is copied as-is.
/// The projection is pure and deterministic.
pub struct ParamsTranslator;

impl ParamsTranslator {
    pub fn translate(params: &DtAssembleParams) -> AssembleParams {
        params.assemble.clone()
    }

    /// Consuming variant used by the use case once fetching is done
    pub fn into_assemble_params(params: DtAssembleParams) -> AssembleParams {
        params.assemble
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::domain::{
        ComponentMetadata, ComponentType, FetchedSbom, MergeMode, OutputFormat, OutputSpec,
        ProjectIds, ServerCredentials,
    };
    use std::path::PathBuf;
    use uuid::Uuid;

    fn sample_params() -> DtAssembleParams {
        let first = Uuid::parse_str("11903ba9-a585-4dfb-9a0c-f348345a5473").unwrap();
        let second = Uuid::parse_str("34103ba2-0e63-4a2f-9a8b-a62526162620").unwrap();
        let mut params = DtAssembleParams::new(
            Some(ServerCredentials::new(
                "http://localhost:8080".to_string(),
                "odt_key".to_string(),
            )),
            ProjectIds::new(vec![first, second]).unwrap(),
            AssembleParams {
                output: Some(PathBuf::from("finalsbom.json")),
                metadata: Some(ComponentMetadata::new(
                    "mega-app".to_string(),
                    "1.0.0".to_string(),
                    ComponentType::Application,
                )),
                merge_mode: MergeMode::Assembly,
                output_spec: OutputSpec::Spdx,
                output_spec_version: Some("2.3".to_string()),
                output_format: OutputFormat::Xml,
                input: Vec::new(),
            },
        );
        params.set_input(vec![
            FetchedSbom::new(first, r#"{"bomFormat":"CycloneDX","components":[]}"#.to_string()),
            FetchedSbom::new(second, r#"{"bomFormat":"CycloneDX"}"#.to_string()),
        ]);
        params
    }

    #[test]
    fn test_translate_copies_every_shared_field() {
        let params = sample_params();
        let translated = ParamsTranslator::translate(&params);

        assert_eq!(translated.output, params.assemble.output);
        assert_eq!(translated.metadata, params.assemble.metadata);
        assert_eq!(translated.merge_mode, MergeMode::Assembly);
        assert_eq!(translated.output_spec, OutputSpec::Spdx);
        assert_eq!(translated.output_spec_version.as_deref(), Some("2.3"));
        assert_eq!(translated.output_format, OutputFormat::Xml);
        assert_eq!(translated.input, params.assemble.input);
        assert_eq!(
            translated.input[0].content.as_bytes(),
            params.assemble.input[0].content.as_bytes()
        );
    }

    #[test]
    fn test_translate_is_deterministic() {
        let params = sample_params();
        let first = ParamsTranslator::translate(&params);
        let second = ParamsTranslator::translate(&params);
        assert_eq!(first, second);
    }

    #[test]
    fn test_translate_keeps_input_order() {
        let params = sample_params();
        let translated = ParamsTranslator::translate(&params);
        let order: Vec<Uuid> = translated.input.iter().map(|s| s.project_id).collect();
        assert_eq!(order, params.project_ids.as_slice());
    }

    #[test]
    fn test_translate_keeps_unset_fields_unset() {
        let ids = ProjectIds::new(vec![Uuid::new_v4()]).unwrap();
        let params = DtAssembleParams::new(None, ids, AssembleParams::new());
        let translated = ParamsTranslator::translate(&params);
        assert_eq!(translated, AssembleParams::new());
    }

    #[test]
    fn test_into_assemble_params_matches_translate() {
        let params = sample_params();
        let borrowed = ParamsTranslator::translate(&params);
        let owned = ParamsTranslator::into_assemble_params(params);
        assert_eq!(borrowed, owned);
    }
}
