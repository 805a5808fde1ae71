use std::process::ExitCode;

/// Exit status of a locscan run.
///
/// - `Success` (0): every file was extracted
/// - `Failure` (1): the run finished but at least one file could not be parsed
///   (or `init` found an existing config)
/// - `Error` (2): the run itself failed (bad config, unreadable source root, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
