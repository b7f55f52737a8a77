use tokio::time::Instant;
use tracing::debug;

use crate::client::Client;
use crate::errors::{MediaError, Result};
use crate::lro::{self, PollOptions};
use crate::models::{Job, JobInput, JobOutput, JobState, Transform};
use crate::paging::{ListOptions, Page};
use crate::validation::{self, MAX_DESCRIPTION_LEN};

const TRANSFORMS: &str = "transforms";
const JOBS: &str = "jobs";

fn check_transform(name: &str, transform: &Transform) -> Result<()> {
    validation::entity_name("transformName", name)?;
    validation::description(
        "description",
        transform.properties.description.as_deref(),
        MAX_DESCRIPTION_LEN,
    )?;
    validation::non_empty_list("outputs", &transform.properties.outputs)
}

fn check_job_input(input: &JobInput) -> Result<()> {
    match input {
        JobInput::Asset { asset_name, .. } => validation::entity_name("input.assetName", asset_name),
        JobInput::Http { base_uri, files, .. } => {
            if base_uri.as_deref().map_or(true, str::is_empty) && files.is_empty() {
                return Err(MediaError::validation(
                    "input",
                    "an HTTP input needs a base URI or at least one file",
                ));
            }
            Ok(())
        }
        JobInput::Inputs { inputs } => {
            validation::non_empty_list("input.inputs", inputs)?;
            inputs.iter().try_for_each(check_job_input)
        }
    }
}

fn check_job(name: &str, job: &Job) -> Result<()> {
    validation::entity_name("jobName", name)?;
    validation::description(
        "description",
        job.properties.description.as_deref(),
        MAX_DESCRIPTION_LEN,
    )?;
    check_job_input(&job.properties.input)?;
    validation::non_empty_list("outputs", &job.properties.outputs)?;
    job.properties.outputs.iter().try_for_each(|o| match o {
        JobOutput::Asset(asset) => validation::entity_name("outputs.assetName", &asset.asset_name),
    })
}

impl Client {
    // -----------------------------------------------------------------------
    // Transforms
    // -----------------------------------------------------------------------

    /// Fetch a transform.
    pub async fn get_transform(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
    ) -> Result<Transform> {
        validation::entity_name("transformName", transform_name)?;
        let url = self.account_url(resource_group, account_name, &[TRANSFORMS, transform_name])?;
        self.get(url).await
    }

    /// Create or replace a transform. At least one output is required.
    pub async fn create_or_update_transform(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        transform: &Transform,
    ) -> Result<Transform> {
        check_transform(transform_name, transform)?;
        let url = self.account_url(resource_group, account_name, &[TRANSFORMS, transform_name])?;
        self.put(url, transform).await
    }

    /// Patch a transform. Jobs already submitted keep their original outputs.
    pub async fn update_transform(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        transform: &Transform,
    ) -> Result<Transform> {
        check_transform(transform_name, transform)?;
        let url = self.account_url(resource_group, account_name, &[TRANSFORMS, transform_name])?;
        self.patch(url, transform).await
    }

    /// Delete a transform and the jobs under it.
    pub async fn delete_transform(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
    ) -> Result<()> {
        validation::entity_name("transformName", transform_name)?;
        let url = self.account_url(resource_group, account_name, &[TRANSFORMS, transform_name])?;
        self.delete(url).await
    }

    /// List transforms; `options` narrows and orders the first page.
    pub async fn list_transforms(
        &self,
        resource_group: &str,
        account_name: &str,
        options: Option<&ListOptions>,
    ) -> Result<Page<Transform>> {
        let url = self.account_url(resource_group, account_name, &[TRANSFORMS])?;
        self.list_page(url, options).await
    }

    // -----------------------------------------------------------------------
    // Jobs
    // -----------------------------------------------------------------------

    /// Fetch the current state of a job.
    pub async fn get_job(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        job_name: &str,
    ) -> Result<Job> {
        validation::entity_name("transformName", transform_name)?;
        validation::entity_name("jobName", job_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[TRANSFORMS, transform_name, JOBS, job_name],
        )?;
        self.get(url).await
    }

    /// Submit a job. It starts out `Queued`; use [`wait_for_job`](Self::wait_for_job)
    /// to block until it settles.
    pub async fn create_job(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        job_name: &str,
        job: &Job,
    ) -> Result<Job> {
        validation::entity_name("transformName", transform_name)?;
        check_job(job_name, job)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[TRANSFORMS, transform_name, JOBS, job_name],
        )?;
        self.put(url, job).await
    }

    /// Patch a job; only `description` and `priority` can change.
    pub async fn update_job(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        job_name: &str,
        job: &Job,
    ) -> Result<Job> {
        validation::entity_name("transformName", transform_name)?;
        validation::entity_name("jobName", job_name)?;
        validation::description(
            "description",
            job.properties.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[TRANSFORMS, transform_name, JOBS, job_name],
        )?;
        self.patch(url, job).await
    }

    /// Delete a finished job. Its output assets are kept.
    pub async fn delete_job(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        job_name: &str,
    ) -> Result<()> {
        validation::entity_name("transformName", transform_name)?;
        validation::entity_name("jobName", job_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[TRANSFORMS, transform_name, JOBS, job_name],
        )?;
        self.delete(url).await
    }

    /// First page of jobs under a transform; supports `$filter` and `$orderby`.
    pub async fn list_jobs(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        options: Option<&ListOptions>,
    ) -> Result<Page<Job>> {
        validation::entity_name("transformName", transform_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[TRANSFORMS, transform_name, JOBS],
        )?;
        self.list_page(url, options).await
    }

    /// Ask the service to cancel a running job. The job moves through
    /// `Canceling` to `Canceled`.
    pub async fn cancel_job(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        job_name: &str,
    ) -> Result<()> {
        validation::entity_name("transformName", transform_name)?;
        validation::entity_name("jobName", job_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[TRANSFORMS, transform_name, JOBS, job_name, "cancelJob"],
        )?;
        self.post::<Option<serde_json::Value>>(url, None).await?;
        Ok(())
    }

    /// Poll a job until it reaches a terminal state or the timeout is exceeded.
    ///
    /// Without `opts`, the client's poll interval and timeout apply.
    ///
    /// # Errors
    ///
    /// - [`MediaError::JobFailed`] if the job ends in `Error` or `Canceled`.
    /// - [`MediaError::Timeout`] if polling exceeds the timeout.
    pub async fn wait_for_job(
        &self,
        resource_group: &str,
        account_name: &str,
        transform_name: &str,
        job_name: &str,
        opts: Option<PollOptions<Job>>,
    ) -> Result<Job> {
        let opts = opts.unwrap_or_else(|| PollOptions::new(self.poll_interval, self.poll_timeout));
        let deadline = Instant::now() + opts.timeout;

        loop {
            let job = self
                .get_job(resource_group, account_name, transform_name, job_name)
                .await?;

            if let Some(ref cb) = opts.on_progress {
                cb(&job);
            }

            let state = job.properties.state.unwrap_or(JobState::Unknown);
            debug!(job = job_name, ?state, "polled job");

            if state.is_failed() {
                let message = job
                    .properties
                    .first_error()
                    .and_then(|e| e.message.clone())
                    .unwrap_or_else(|| "no error details".to_string());
                return Err(MediaError::JobFailed {
                    name: job_name.to_string(),
                    state,
                    message,
                });
            }

            if state == JobState::Finished {
                return Ok(job);
            }

            lro::pause(deadline, opts.interval, opts.timeout).await?;
        }
    }
}
