// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use file_rotate::compression::Compression;
use file_rotate::TimeFrequency;
use file_rotate::{ContentLimit, FileRotate, suffix::AppendCount};
use std::fs::OpenOptions;
use std::io::{self, Write};
use timetune::{Logging, LoggingRotation};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::{EnvFilter, Registry, prelude::*};

const LOG_FILE: &str = "timetune.log";

/// Keeps the non-blocking writers flushing until dropped.
pub struct LoggingHandle {
    _vec: Vec<WorkerGuard>,
}

fn content_limit(rotation: LoggingRotation, max_size: u64) -> ContentLimit {
    match rotation {
        LoggingRotation::Size => ContentLimit::Bytes(max_size as usize),
        LoggingRotation::Hourly => ContentLimit::Time(TimeFrequency::Hourly),
        LoggingRotation::Daily => ContentLimit::Time(TimeFrequency::Daily),
        LoggingRotation::Weekly => ContentLimit::Time(TimeFrequency::Weekly),
        LoggingRotation::Monthly => ContentLimit::Time(TimeFrequency::Monthly),
        LoggingRotation::Yearly => ContentLimit::Time(TimeFrequency::Yearly),
        LoggingRotation::Never => ContentLimit::None,
    }
}

pub fn init_logging(cfg: &Logging) -> Option<LoggingHandle> {
    if !cfg.logs() {
        return None;
    }

    let Logging {
        output,
        file_path,
        rotation,
        max_size,
        max_files,
        level,
    } = cfg.clone();

    let mut guards: Vec<WorkerGuard> = Vec::new();

    let env_filter = if let Ok(env_filter) = EnvFilter::try_from_default_env() {
        env_filter
    } else {
        EnvFilter::new(level)
    };

    let stdout_layer = output.stdout.then(|| {
        let (stdout_nb, guard) = NonBlocking::new(io::stdout());
        guards.push(guard);

        let mw = {
            let nb = stdout_nb.clone();
            BoxMakeWriter::new(move || -> Box<dyn Write + Send + Sync> {
                Box::new(nb.clone())
            })
        };

        fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(mw)
    });

    let file_layer = output.file.then(|| {
        std::fs::create_dir_all(&file_path).ok();

        let mut opts = OpenOptions::new();
        opts.read(true).write(true).create(true).append(true);

        let full = format!("{}/{}", file_path, LOG_FILE);
        let fr = FileRotate::new(
            &full,
            AppendCount::new(max_files),
            content_limit(rotation, max_size),
            Compression::None,
            Some(opts),
        );

        let (file_nb, guard) = NonBlocking::new(fr);
        guards.push(guard);

        let mw = {
            let nb = file_nb.clone();
            BoxMakeWriter::new(move || -> Box<dyn Write + Send + Sync> {
                Box::new(nb.clone())
            })
        };

        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(mw)
    });

    let subscriber = Registry::default()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);

    // If a subscriber is running (e.g. tests)
    if subscriber.try_init().is_err() {
        return None;
    }

    Some(LoggingHandle { _vec: guards })
}

#[cfg(test)]
mod tests {
    use timetune::LoggingOutput;

    use super::*;

    #[test]
    fn test_disabled_logging() {
        let cfg = Logging {
            output: LoggingOutput {
                stdout: false,
                file: false,
            },
            ..Default::default()
        };
        assert!(init_logging(&cfg).is_none());
    }

    #[test]
    fn test_content_limit() {
        assert!(matches!(
            content_limit(LoggingRotation::Size, 1024),
            ContentLimit::Bytes(1024)
        ));
        assert!(matches!(
            content_limit(LoggingRotation::Daily, 1024),
            ContentLimit::Time(TimeFrequency::Daily)
        ));
        assert!(matches!(
            content_limit(LoggingRotation::Never, 1024),
            ContentLimit::None
        ));
    }
}
