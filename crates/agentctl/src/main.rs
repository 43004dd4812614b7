#![forbid(unsafe_code)]

//! agentctl: drive individual agent job API calls from a shell.

use std::time::Duration;

use agent_api_client::{ClientConfig, Job, JobClient, Response};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "agentctl", version, about = "Call the agent job API by hand")]
struct Args {
    /// Agent API base URL, e.g. https://agent.example.com/v3
    #[arg(long, default_value = "http://127.0.0.1:8080/v3")]
    endpoint: String,

    /// Agent access token.
    #[arg(long)]
    token: Option<String>,

    /// Per-request timeout. 0 disables it.
    #[arg(long, default_value_t = 60)]
    timeout_seconds: u64,

    /// Log level (env-filter syntax).
    #[arg(long, default_value = "info")]
    log: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the current state of a job.
    State { id: String },
    /// Claim an unassigned job.
    Acquire { id: String },
    /// Accept a claimed job and print it with its final environment.
    Accept { id: String },
    /// Mark a job as started.
    Start {
        id: String,
        /// Defaults to now.
        #[arg(long)]
        started_at: Option<String>,
    },
    /// Mark a job as finished.
    Finish {
        id: String,
        #[arg(long)]
        exit_status: String,
        #[arg(long)]
        signal: Option<String>,
        #[arg(long)]
        signal_reason: Option<String>,
        /// Defaults to now.
        #[arg(long)]
        finished_at: Option<String>,
        #[arg(long, default_value_t = 0)]
        chunks_failed_count: u64,
    },
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        let timeout = (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds));
        let mut cfg = ClientConfig::new(self.endpoint.clone()).with_timeout(timeout);
        if let Some(token) = &self.token {
            cfg = cfg.with_token(token.clone());
        }
        cfg
    }
}

fn job_ref(id: String) -> Job {
    Job {
        id: Some(id),
        ..Default::default()
    }
}

fn start_job(id: String, started_at: Option<String>) -> Job {
    Job {
        started_at: Some(started_at.unwrap_or_else(agent_api_core::now_rfc3339)),
        ..job_ref(id)
    }
}

fn finish_job(
    id: String,
    exit_status: String,
    signal: Option<String>,
    signal_reason: Option<String>,
    finished_at: Option<String>,
    chunks_failed_count: u64,
) -> Job {
    Job {
        exit_status: Some(exit_status),
        signal,
        signal_reason,
        finished_at: Some(finished_at.unwrap_or_else(agent_api_core::now_rfc3339)),
        chunks_failed_count: Some(chunks_failed_count),
        ..job_ref(id)
    }
}

#[derive(Serialize)]
struct StatusOnly {
    status: u16,
}

impl From<&Response> for StatusOnly {
    fn from(resp: &Response) -> Self {
        Self {
            status: resp.status.as_u16(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = JobClient::new(&args.client_config()).context("build client")?;
    tracing::debug!(endpoint = %args.endpoint, "client ready");

    match args.cmd {
        Cmd::State { id } => {
            let (state, _) = client.get_job_state(&id).await.context("get job state")?;
            print_json(&state)?;
        }
        Cmd::Acquire { id } => {
            let (job, _) = client.acquire_job(&id).await.context("acquire job")?;
            tracing::info!(job_id = %id, state = ?job.state, "acquired job");
            print_json(&job)?;
        }
        Cmd::Accept { id } => {
            let (job, _) = client
                .accept_job(&job_ref(id.clone()))
                .await
                .context("accept job")?;
            tracing::info!(job_id = %id, env_vars = job.env.len(), "accepted job");
            print_json(&job)?;
        }
        Cmd::Start { id, started_at } => {
            let job = start_job(id, started_at);
            let resp = client.start_job(&job).await.context("start job")?;
            tracing::info!(job_id = %job.id_or_empty(), status = %resp.status, "started job");
            print_json(&StatusOnly::from(&resp))?;
        }
        Cmd::Finish {
            id,
            exit_status,
            signal,
            signal_reason,
            finished_at,
            chunks_failed_count,
        } => {
            let job = finish_job(
                id,
                exit_status,
                signal,
                signal_reason,
                finished_at,
                chunks_failed_count,
            );
            let resp = client.finish_job(&job).await.context("finish job")?;
            tracing::info!(job_id = %job.id_or_empty(), status = %resp.status, "finished job");
            print_json(&StatusOnly::from(&resp))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_finish_with_defaults() {
        let args = Args::try_parse_from(["agentctl", "finish", "abc", "--exit-status", "0"]).unwrap();
        let Cmd::Finish {
            id,
            exit_status,
            signal,
            chunks_failed_count,
            finished_at,
            ..
        } = args.cmd
        else {
            panic!("expected finish");
        };
        assert_eq!(id, "abc");
        assert_eq!(exit_status, "0");
        assert_eq!(signal, None);
        assert_eq!(finished_at, None);
        assert_eq!(chunks_failed_count, 0);
    }

    #[test]
    fn finish_job_fills_timestamp_and_count() {
        let job = finish_job("abc".into(), "1".into(), None, None, None, 0);
        assert_eq!(job.id.as_deref(), Some("abc"));
        assert_eq!(job.chunks_failed_count, Some(0));
        assert!(job.finished_at.is_some_and(|ts| ts.ends_with('Z')));
    }

    #[test]
    fn start_job_keeps_explicit_timestamp() {
        let job = start_job("abc".into(), Some("2024-05-01T12:00:00.000Z".into()));
        assert_eq!(job.started_at.as_deref(), Some("2024-05-01T12:00:00.000Z"));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let args = Args::try_parse_from(["agentctl", "--timeout-seconds", "0", "state", "abc"]).unwrap();
        assert_eq!(args.client_config().timeout, None);

        let args = Args::try_parse_from(["agentctl", "--token", "t", "state", "abc"]).unwrap();
        let cfg = args.client_config();
        assert_eq!(cfg.timeout, Some(Duration::from_secs(60)));
        assert_eq!(cfg.token.as_deref(), Some("t"));
    }
}
