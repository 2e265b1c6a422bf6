use crate::application::dto::AssembleResponse;
use crate::assembly::domain::{DtAssembleParams, FetchedSbom, ProjectIds, ServerCredentials};
use crate::assembly::services::ParamsTranslator;
use crate::ports::outbound::{AssemblyEngine, ProgressReporter, SbomFetcher};
use crate::shared::error::{AssembleError, FetchFailure};
use crate::shared::Result;

/// DtAssembleUseCase - Assembles the SBOMs of Dependency-Track projects
///
/// Runs the pipeline strictly in order: fetch every project SBOM, translate
/// the parameters, populate the engine configuration, assemble. Any failing
/// step ends the run; later steps are never attempted.
///
/// # Type Parameters
/// * `F` - SbomFetcher implementation
/// * `E` - AssemblyEngine implementation
/// * `PR` - ProgressReporter implementation
pub struct DtAssembleUseCase<F, E, PR> {
    fetcher: F,
    engine: E,
    progress_reporter: PR,
}

impl<F, E, PR> DtAssembleUseCase<F, E, PR>
where
    F: SbomFetcher,
    E: AssemblyEngine,
    PR: ProgressReporter,
{
    /// Creates a new DtAssembleUseCase with injected dependencies
    pub fn new(fetcher: F, engine: E, progress_reporter: PR) -> Self {
        Self {
            fetcher,
            engine,
            progress_reporter,
        }
    }

    /// Executes the assembly use case
    ///
    /// # Arguments
    /// * `params` - Validated parameters; `input` is filled in here
    ///
    /// # Returns
    /// AssembleResponse containing the merged document
    pub async fn execute(&self, mut params: DtAssembleParams) -> Result<AssembleResponse> {
        // Step 1: Fetch one SBOM per project
        let input = self.fetch_inputs(&params).await?;
        params.set_input(input);

        // Step 2: Drop the Dependency-Track specifics
        let assemble_params = ParamsTranslator::into_assemble_params(params);

        // Step 3: Build the engine configuration; failure here is fatal
        let config = self.engine.populate_config(&assemble_params).map_err(|e| {
            self.progress_reporter
                .report_error("❌ Failed to populate the assembly configuration");
            e
        })?;

        // Step 4: Merge
        self.progress_reporter.start_activity(&format!(
            "🔧 Assembling {} SBOM(s) ({} merge)...",
            assemble_params.input.len(),
            assemble_params.merge_mode
        ));
        let assembled = self.engine.assemble(config).await;
        self.progress_reporter.finish_activity();
        let document = assembled?;

        let response = AssembleResponse {
            document,
            output: assemble_params.output,
            input_count: assemble_params.input.len(),
            merge_mode: assemble_params.merge_mode,
            output_spec: assemble_params.output_spec,
            output_format: assemble_params.output_format,
        };
        self.progress_reporter
            .report_completion(&format!("✅ {}", response.summary()));

        Ok(response)
    }

    /// Fetches the project SBOMs and checks the fetcher honoured its contract
    async fn fetch_inputs(&self, params: &DtAssembleParams) -> Result<Vec<FetchedSbom>> {
        let server = Self::require_server(params)?;
        let project_ids = &params.project_ids;

        self.progress_reporter.start_activity(&format!(
            "📥 Fetching {} project SBOM(s) from {}...",
            project_ids.len(),
            server.url()
        ));
        let fetched = self.fetcher.fetch_all(server, project_ids).await;
        self.progress_reporter.finish_activity();
        let input = fetched?;

        Self::verify_inputs(project_ids, &input)?;

        self.progress_reporter
            .report(&format!("✅ Fetched {} project SBOM(s)", input.len()));
        Ok(input)
    }

    fn require_server(params: &DtAssembleParams) -> Result<&ServerCredentials> {
        params.server.as_ref().ok_or_else(|| {
            AssembleError::configuration(
                "a Dependency-Track url and api key are required to fetch project SBOMs (use --url/--api-key or the config file)",
            )
            .into()
        })
    }

    /// Rejects a short, long or reordered input list
    fn verify_inputs(project_ids: &ProjectIds, input: &[FetchedSbom]) -> Result<()> {
        let mut failures: Vec<FetchFailure> = project_ids
            .iter()
            .enumerate()
            .filter(|(index, id)| input.get(*index).map(|sbom| &sbom.project_id) != Some(*id))
            .map(|(_, id)| FetchFailure {
                project_id: *id,
                reason: "no matching document returned by the fetcher".to_string(),
            })
            .collect();

        failures.extend(input.iter().skip(project_ids.len()).map(|sbom| FetchFailure {
            project_id: sbom.project_id,
            reason: "unexpected extra document returned by the fetcher".to_string(),
        }));

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AssembleError::Fetch {
                requested: project_ids.len(),
                failures,
            }
            .into())
        }
    }
}
