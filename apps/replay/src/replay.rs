use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use docwatch_application::{ObjectNotificationService, StorageObjectNotice};
use docwatch_core::{AppError, AppResult};
use tracing::{info, warn};

/// Outcome counts of one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub replayed: usize,
    pub failed: usize,
}

impl ReplaySummary {
    pub fn into_result(self) -> AppResult<()> {
        if self.failed > 0 {
            return Err(AppError::Validation(format!(
                "{} of {} envelopes failed to replay",
                self.failed,
                self.replayed.saturating_add(self.failed)
            )));
        }

        Ok(())
    }
}

/// Decodes one envelope, handing it to the sink unless `dry_run` is set.
pub async fn replay_reader<R: Read>(
    service: &ObjectNotificationService,
    dry_run: bool,
    reader: R,
) -> AppResult<StorageObjectNotice> {
    if dry_run {
        return ObjectNotificationService::decode_notice_from_reader(reader).map_err(AppError::from);
    }

    service.handle_reader(reader).await
}

/// Replays every input, continuing past failures.
pub async fn replay_files(
    service: &ObjectNotificationService,
    dry_run: bool,
    inputs: &[PathBuf],
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for input in inputs {
        let source = input.display().to_string();
        let result = match File::open(input) {
            Ok(file) => replay_reader(service, dry_run, BufReader::new(file)).await,
            Err(error) => Err(AppError::Validation(format!(
                "failed to open '{source}': {error}"
            ))),
        };

        match result {
            Ok(notice) => {
                summary.replayed = summary.replayed.saturating_add(1);
                log_notice(source.as_str(), &notice);
            }
            Err(error) => {
                summary.failed = summary.failed.saturating_add(1);
                warn!(source = %source, error = %error, "envelope replay failed");
            }
        }
    }

    info!(
        replayed = summary.replayed,
        failed = summary.failed,
        "docwatch-replay finished"
    );

    summary
}

pub fn log_notice(source: &str, notice: &StorageObjectNotice) {
    info!(
        source = %source,
        message_id = %notice.message_id,
        bucket = notice.identity.bucket(),
        object = notice.identity.object_path(),
        key = notice.identity.key(),
        "envelope replayed"
    );
}
