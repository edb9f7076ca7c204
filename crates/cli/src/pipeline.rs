//! Pipeline for processing Solas files.
//!
//! Every command reads one source file and runs the front end. Lexical and
//! matching errors are fatal and printed as a diagnostic naming the file and
//! line. `run` then executes the lowered program; a fetch whose attempts are
//! exhausted prints a drift report and the program continues, any other
//! execution error stops it with a critical failure.

use crate::transport::HttpTransport;
use solas_codegen::LoweredProgram;
use solas_lang::config::{NetworkConfig, parse_credential_override};
use solas_lang::{ConfigError, Credentials, Diagnostic, Evaluator, ExecError, Offline, SolasConfig};
use solas_parser::helpers::token_table;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Diagnostic(Diagnostic),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Solas Critical Failure: {0}")]
    Execution(#[from] ExecError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Settings shared by every command of one invocation.
pub struct Session {
    credentials: Credentials,
    network: NetworkConfig,
    offline: bool,
}

impl Session {
    /// Load `Solas.toml` (explicit or discovered next to `file`) and apply
    /// `--credential` overrides on top.
    pub fn load(
        file: &Path,
        config: Option<&Path>,
        overrides: &[String],
        offline: bool,
    ) -> PipelineResult<Self> {
        let mut config = match config {
            Some(path) => SolasConfig::from_file(path)?,
            None => {
                let start = file
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                SolasConfig::discover(start)?
            }
        };

        for raw in overrides {
            let (name, secret) = parse_credential_override(raw)?;
            config.credentials.insert(name, secret);
        }

        Ok(Self {
            credentials: config.credentials(),
            network: config.network,
            offline,
        })
    }
}

/// Compile and run a Solas file
pub fn run_file(path: &Path, session: &Session) -> PipelineResult<()> {
    let program = compile_file(path, session)?;
    let stdout = io::stdout();

    let context = if session.offline {
        let mut evaluator = Evaluator::new(Offline, stdout.lock());
        evaluator.execute(&program)?;
        evaluator.into_context()
    } else {
        let transport = HttpTransport::new(&session.network)?;
        let mut evaluator = Evaluator::new(transport, stdout.lock());
        evaluator.execute(&program)?;
        evaluator.into_context()
    };

    tracing::debug!(drifts = context.drifts().len(), "run complete");
    Ok(())
}

/// Check a Solas file for errors
pub fn check_file(path: &Path, session: &Session) -> PipelineResult<()> {
    let program = compile_file(path, session)?;
    println!("{}: ok ({} operations)", path.display(), program.len());
    Ok(())
}

/// Print the token table of a Solas file
pub fn dump_tokens(path: &Path) -> PipelineResult<()> {
    let source = read_source(path)?;
    let stream = solas_parser::tokenize(&source)
        .map_err(|err| diagnostic_for(path, err.to_diagnostic()))?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", token_table(&stream))?;
    Ok(())
}

/// Print the lowered operations of a Solas file
pub fn print_lowered(path: &Path, session: &Session) -> PipelineResult<()> {
    let program = compile_file(path, session)?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", program)?;
    Ok(())
}

fn compile_file(path: &Path, session: &Session) -> PipelineResult<LoweredProgram> {
    let source = read_source(path)?;
    let program = solas_lang::compile(&source, &session.credentials)
        .map_err(|diagnostic| diagnostic_for(path, diagnostic))?;
    tracing::debug!(
        file = %path.display(),
        operations = program.len(),
        "compiled"
    );
    Ok(program)
}

fn read_source(path: &Path) -> PipelineResult<String> {
    fs::read_to_string(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn diagnostic_for(path: &Path, diagnostic: Diagnostic) -> PipelineError {
    PipelineError::Diagnostic(diagnostic.with_file(path.display().to_string()))
}
