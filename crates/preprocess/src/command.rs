use async_trait::async_trait;
use replyai_common::{AppConfig, ReplyAiError, Result};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::preprocessor_trait::TextPreprocessor;
use crate::types::PreprocessorOutput;

/// Runs `<command> <script> <input>` and reads `cleaned_text` from its JSON output
#[derive(Debug, Clone)]
pub struct CommandPreprocessor {
    command: String,
    script: String,
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl CommandPreprocessor {
    /// Create new command preprocessor
    pub fn new(
        command: impl Into<String>,
        script: impl Into<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            command: command.into(),
            script: script.into(),
            working_dir: working_dir.into(),
            timeout: None,
        }
    }

    /// Create from application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let preprocessor = Self::new(
            config.preprocessor_command.clone(),
            config.preprocessor_script.clone(),
            config.preprocessor_working_dir.clone(),
        );

        match config.preprocessor_timeout() {
            Some(timeout) => preprocessor.with_timeout(timeout),
            None => preprocessor,
        }
    }

    /// Kill the child and fail if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Working directory of the child process
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Run the script and return combined stdout/stderr with the exit status
    async fn run(&self, input: &str) -> Result<(ExitStatus, String)> {
        debug!(
            "Running preprocessor: {} {} (cwd: {}, input length: {})",
            self.command,
            self.script,
            self.working_dir.display(),
            input.chars().count()
        );

        let mut cmd = Command::new(&self.command);
        cmd.arg(&self.script)
            .arg(input)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| {
                    warn!("Preprocessor timed out after {:?}", limit);
                    ReplyAiError::preprocessor(format!(
                        "Python 전처리 시간 초과 ({}ms)",
                        limit.as_millis()
                    ))
                })?,
            None => cmd.output().await,
        }
        .map_err(|e| {
            ReplyAiError::preprocessor(format!(
                "프로세스를 실행할 수 없습니다 ({} {}, 작업 디렉터리 {}): {}",
                self.command,
                self.script,
                self.working_dir.display(),
                e
            ))
        })?;

        // stderr is appended to stdout, the way a merged stream would read
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok((output.status, combined))
    }
}

#[async_trait]
impl TextPreprocessor for CommandPreprocessor {
    async fn preprocess(&self, input: &str) -> Result<String> {
        let (status, output) = self.run(input).await?;

        debug!("Preprocessor exit status: {}, raw output: {}", status, output);

        if !status.success() {
            let exit_code = status
                .code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "signal".to_string());
            warn!("Preprocessor failed with exitCode={}", exit_code);
            return Err(ReplyAiError::preprocessor(format!(
                "Python 전처리 실패 (exitCode={}): {}",
                exit_code, output
            )));
        }

        let parsed = PreprocessorOutput::parse(&output).map_err(|e| {
            ReplyAiError::preprocessor(format!("전처리 결과를 JSON으로 해석할 수 없습니다: {}", e))
        })?;

        info!(
            "Preprocessing done - keywords: {:?}, word_count: {:?}",
            parsed.keywords, parsed.word_count
        );

        Ok(parsed.cleaned_or(input))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write `body` as `preprocess.sh` into a fresh directory
    fn script_dir(body: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("preprocess.sh"), body).unwrap();
        dir
    }

    fn sh(dir: &TempDir) -> CommandPreprocessor {
        CommandPreprocessor::new("sh", "preprocess.sh", dir.path())
    }

    #[tokio::test]
    async fn test_returns_cleaned_text() {
        let dir = script_dir(r#"printf '{"cleaned_text":"배송 지연","keywords":["배송"],"word_count":2}\n'"#);
        let result = sh(&dir).preprocess("배송이 늦어요").await.unwrap();
        assert_eq!(result, "배송 지연");
    }

    #[tokio::test]
    async fn test_mistyped_side_fields_do_not_fail() {
        let dir = script_dir(r#"printf '{"cleaned_text":"배송 지연","keywords":null,"word_count":2.5}\n'"#);
        let result = sh(&dir).preprocess("배송이 늦어요").await.unwrap();
        assert_eq!(result, "배송 지연");
    }

    #[tokio::test]
    async fn test_input_is_passed_as_single_argument() {
        let dir = script_dir(r#"printf '{"cleaned_text":"%s|%s"}' "$#" "$1""#);
        let result = sh(&dir).preprocess("두 단어 입력").await.unwrap();
        assert_eq!(result, "1|두 단어 입력");
    }

    #[tokio::test]
    async fn test_empty_cleaned_text_falls_back_to_input() {
        let dir = script_dir(r#"printf '{"cleaned_text":""}'"#);
        let result = sh(&dir).preprocess("질문입니다").await.unwrap();
        assert_eq!(result, "질문입니다");

        let dir = script_dir(r#"printf '{"summary":"요약"}'"#);
        let result = sh(&dir).preprocess("질문입니다").await.unwrap();
        assert_eq!(result, "질문입니다");
    }

    #[tokio::test]
    async fn test_non_zero_exit_reports_code_and_output() {
        let dir = script_dir("echo boom\nexit 1\n");
        let err = sh(&dir).preprocess("x").await.unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, ReplyAiError::Preprocessor(_)));
        assert!(msg.contains("exitCode=1"), "{}", msg);
        assert!(msg.contains("boom"), "{}", msg);
    }

    #[tokio::test]
    async fn test_stderr_is_captured() {
        let dir = script_dir("echo 'Traceback: kaboom' >&2\nexit 2\n");
        let msg = sh(&dir).preprocess("x").await.unwrap_err().to_string();
        assert!(msg.contains("exitCode=2"), "{}", msg);
        assert!(msg.contains("kaboom"), "{}", msg);
    }

    #[tokio::test]
    async fn test_invalid_json_fails() {
        let dir = script_dir("echo 'not json'\n");
        let err = sh(&dir).preprocess("x").await.unwrap_err();
        assert!(matches!(err, ReplyAiError::Preprocessor(_)));
        assert!(err.to_string().contains("JSON"));
    }

    #[tokio::test]
    async fn test_missing_working_dir_fails() {
        let preprocessor =
            CommandPreprocessor::new("sh", "preprocess.sh", "/nonexistent/python-preprocessing");
        let err = preprocessor.preprocess("x").await.unwrap_err();
        assert!(matches!(err, ReplyAiError::Preprocessor(_)));
    }

    #[tokio::test]
    async fn test_missing_executable_fails() {
        let dir = script_dir("");
        let preprocessor =
            CommandPreprocessor::new("replyai-no-such-interpreter", "preprocess.sh", dir.path());
        let err = preprocessor.preprocess("x").await.unwrap_err();
        assert!(matches!(err, ReplyAiError::Preprocessor(_)));
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let dir = script_dir("sleep 5\nprintf '{\"cleaned_text\":\"late\"}'\n");
        let preprocessor = sh(&dir).with_timeout(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let err = preprocessor.preprocess("x").await.unwrap_err();
        assert!(matches!(err, ReplyAiError::Preprocessor(_)));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_from_config() {
        let mut config = AppConfig::default();
        config.preprocessor_timeout_secs = Some(3);
        let preprocessor = CommandPreprocessor::from_config(&config);
        assert_eq!(preprocessor.working_dir(), Path::new("../python-preprocessing"));
        assert_eq!(preprocessor.timeout, Some(Duration::from_secs(3)));
    }
}
