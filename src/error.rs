use std::{io, path::PathBuf};

use thiserror::Error;

/// 食卓の準備・実行時のエラー
///
/// デッドロックはエラーではない。詰まった食卓は [`Table::start`](crate::table::Table::start) から返ってこないだけ
#[derive(Debug, Error)]
pub enum DiningError {
    #[error("at least one philosopher is needed")]
    NoPhilosophers,

    #[error("philosopher count must be at most {max}, got {requested}")]
    TooManyPhilosophers { requested: usize, max: usize },

    #[error("names length and actions length must be same ({philosophers} philosophers, {actions} actions)")]
    ActionCountMismatch { philosophers: usize, actions: usize },

    #[error("maximum eat duration must be greater than zero")]
    ZeroEatDuration,

    #[error("failed to read config {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config")]
    ParseConfig(#[from] toml::de::Error),

    #[error("failed to spawn philosopher {name}")]
    Spawn {
        name: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("philosopher {name} panicked before finishing")]
    PhilosopherPanicked { name: &'static str },

    #[error("dining coordinator stopped without a report")]
    CoordinatorLost,
}

pub type Result<T> = std::result::Result<T, DiningError>;
