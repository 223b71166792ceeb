use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use log::{debug, info, warn};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{Availability, BackendError, BackendResult, PartialPlanStream, PlanBackend};
use crate::models::{DailyPlan, PartialDailyPlan};

/// Default time budget for one generation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Backend that delegates generation to an external command.
///
/// The prompt, followed by the JSON schema, is written to the command's
/// stdin. In synchronous mode the command prints one JSON plan to stdout. In
/// streaming mode it prints one cumulative JSON snapshot per line.
///
/// Any LLM CLI that can be scripted this way works, e.g.
/// `["llm", "--no-stream"]` or a small wrapper script.
pub struct CommandBackend {
    command: Vec<String>,
    timeout: Duration,
}

impl CommandBackend {
    /// Create a backend for `command` (program followed by its arguments).
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-generation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn(&self, streaming: bool) -> BackendResult<Child> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(BackendError::Unavailable(
                "no backend command is configured".to_string(),
            ));
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .env("TEMPO_STREAM", if streaming { "1" } else { "0" })
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd.spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                BackendError::Unavailable(format!("'{program}' was not found on PATH"))
            } else {
                BackendError::Failed(format!("failed to start '{program}': {e}"))
            }
        })
    }

    async fn send_prompt(child: &mut Child, prompt: &str, schema: &Value) -> BackendResult<()> {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BackendError::Failed("backend stdin unavailable".to_string()))?;
        let request = format!(
            "{prompt}\n\nRespond only with JSON matching this schema:\n{}\n",
            serde_json::to_string_pretty(schema)
                .map_err(|e| BackendError::Failed(e.to_string()))?
        );
        stdin
            .write_all(request.as_bytes())
            .await
            .map_err(|e| BackendError::Failed(format!("failed to write prompt: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl PlanBackend for CommandBackend {
    fn name(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or("command")
    }

    fn availability(&self) -> Availability {
        if self.command.is_empty() {
            Availability::Unavailable(
                "No plan generation command is configured. Set backend.command in the config \
                 file or pass --backend-command."
                    .to_string(),
            )
        } else {
            Availability::Available
        }
    }

    async fn generate(&self, prompt: &str, schema: &Value) -> BackendResult<DailyPlan> {
        let mut child = self.spawn(false)?;
        Self::send_prompt(&mut child, prompt, schema).await?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| BackendError::Failed(format!("timed out after {:?}", self.timeout)))?
            .map_err(|e| BackendError::Failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("{}: exited with {}", self.name(), output.status);
            return Err(BackendError::Failed(format!(
                "command exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        info!("{}: received {} bytes", self.name(), stdout.len());
        serde_json::from_str(strip_code_fence(&stdout))
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }

    async fn generate_stream(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> BackendResult<PartialPlanStream> {
        let mut child = self.spawn(true)?;
        Self::send_prompt(&mut child, prompt, schema).await?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BackendError::Failed("backend stdout unavailable".to_string()))?;

        let stderr = child.stderr.take().map(drain_stderr);

        let state = SnapshotReader {
            lines: BufReader::new(stdout).lines(),
            stderr,
            child,
            deadline: Instant::now() + self.timeout,
            done: false,
        };
        Ok(stream::unfold(state, SnapshotReader::next).boxed())
    }
}

/// Reads newline-delimited snapshots from a running backend process.
struct SnapshotReader {
    lines: Lines<BufReader<ChildStdout>>,
    /// Collects stderr while stdout is read so the process never blocks on it
    stderr: Option<JoinHandle<String>>,
    child: Child,
    deadline: Instant,
    done: bool,
}

impl SnapshotReader {
    async fn next(mut self) -> Option<(BackendResult<PartialDailyPlan>, Self)> {
        if self.done {
            return None;
        }
        loop {
            let line = match tokio::time::timeout_at(self.deadline, self.lines.next_line()).await {
                Err(_) => {
                    self.done = true;
                    let _ = self.child.start_kill();
                    return Some((Err(BackendError::Failed("stream timed out".to_string())), self));
                }
                Ok(Err(e)) => {
                    self.done = true;
                    return Some((Err(BackendError::Failed(e.to_string())), self));
                }
                Ok(Ok(Some(line))) => line,
                Ok(Ok(None)) => {
                    self.done = true;
                    return match self.child.wait().await {
                        Ok(status) if status.success() => None,
                        Ok(status) => {
                            let stderr = self.collected_stderr().await;
                            Some((
                                Err(BackendError::Failed(format!(
                                    "command exited with {status}: {}",
                                    stderr.trim()
                                ))),
                                self,
                            ))
                        }
                        Err(e) => Some((Err(BackendError::Failed(e.to_string())), self)),
                    };
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<PartialDailyPlan>(line) {
                Ok(snapshot) => return Some((Ok(snapshot), self)),
                Err(e) => debug!("skipping unparsable snapshot line: {e}"),
            }
        }
    }
}

impl SnapshotReader {
    async fn collected_stderr(&mut self) -> String {
        match self.stderr.take() {
            Some(handle) => handle.await.unwrap_or_default(),
            None => String::new(),
        }
    }
}

/// Reads a child's stderr to the end on its own task.
fn drain_stderr(mut stderr: ChildStderr) -> JoinHandle<String> {
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Err(e) = stderr.read_to_end(&mut buf).await {
            debug!("failed to read backend stderr: {e}");
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Removes a surrounding markdown code fence, which many models add.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_unavailable() {
        let backend = CommandBackend::new(Vec::new());
        assert!(!backend.availability().is_available());
        assert_eq!(backend.name(), "command");
    }

    #[test]
    fn name_is_program() {
        let backend = CommandBackend::new(vec!["llm".into(), "-m".into(), "local".into()]);
        assert_eq!(backend.name(), "llm");
        assert!(backend.availability().is_available());
    }

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[tokio::test]
    async fn missing_program_reports_unavailable() {
        let backend = CommandBackend::new(vec!["tempo-definitely-not-installed".into()]);
        let result = backend.generate("prompt", &Value::Null).await;
        assert!(matches!(result, Err(BackendError::Unavailable(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn parses_plan_from_stdout() {
        let backend = CommandBackend::new(vec![
            "sh".into(),
            "-c".into(),
            r#"cat > /dev/null; echo '{"sessions": [], "overallStrategy": "rest"}'"#.into(),
        ]);
        let plan = backend
            .generate("prompt", &Value::Null)
            .await
            .expect("plan should parse");
        assert!(plan.sessions.is_empty());
        assert_eq!(plan.overall_strategy.as_deref(), Some("rest"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_json_output_is_malformed() {
        let backend = CommandBackend::new(vec![
            "sh".into(),
            "-c".into(),
            "cat > /dev/null; echo 'sure, here is your plan'".into(),
        ]);
        let result = backend.generate("prompt", &Value::Null).await;
        assert!(matches!(result, Err(BackendError::Malformed(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn streams_line_delimited_snapshots() {
        let script = r#"cat > /dev/null
echo '{"overallStrategy": "a"}'
echo 'not json'
echo ''
echo '{"overallStrategy": "b"}'"#;
        let backend = CommandBackend::new(vec!["sh".into(), "-c".into(), script.into()]);
        let items: Vec<_> = backend
            .generate_stream("prompt", &Value::Null)
            .await
            .expect("stream")
            .collect()
            .await;
        let strategies: Vec<_> = items
            .into_iter()
            .map(|item| item.expect("snapshot").overall_strategy)
            .collect();
        assert_eq!(strategies, vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_command_reports_failure() {
        let backend = CommandBackend::new(vec![
            "sh".into(),
            "-c".into(),
            "cat > /dev/null; echo nope >&2; exit 3".into(),
        ]);
        let result = backend.generate("prompt", &Value::Null).await;
        match result {
            Err(BackendError::Failed(message)) => assert!(message.contains("nope")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn noisy_stderr_does_not_stall_stream() {
        let script = r#"cat > /dev/null
head -c 200000 /dev/zero | tr '\0' 'x' >&2
echo '{"overallStrategy": "done"}'"#;
        let backend = CommandBackend::new(vec!["sh".into(), "-c".into(), script.into()])
            .with_timeout(Duration::from_secs(10));
        let items: Vec<_> = backend
            .generate_stream("prompt", &Value::Null)
            .await
            .expect("stream")
            .collect()
            .await;
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].as_ref().expect("snapshot").overall_strategy.as_deref(),
            Some("done")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_stream_reports_stderr() {
        let script = "cat > /dev/null; echo '{}'; echo 'model crashed' >&2; exit 2";
        let backend = CommandBackend::new(vec!["sh".into(), "-c".into(), script.into()]);
        let items: Vec<_> = backend
            .generate_stream("prompt", &Value::Null)
            .await
            .expect("stream")
            .collect()
            .await;
        match items.last() {
            Some(Err(BackendError::Failed(message))) => {
                assert!(message.contains("model crashed"), "{message}")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
