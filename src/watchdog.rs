use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use tracing::warn;

use crate::{
    error::{DiningError, Result},
    table::{DiningReport, Table},
};

#[derive(Debug)]
pub enum Verdict {
    Finished(DiningReport),
    /// 制限時間内に終わらなかった。デッドロックしている可能性が高い
    Stalled,
}

impl Verdict {
    pub fn is_finished(&self) -> bool {
        matches!(self, Verdict::Finished(_))
    }

    pub fn report(self) -> Option<DiningReport> {
        match self {
            Verdict::Finished(report) => Some(report),
            Verdict::Stalled => None,
        }
    }
}

/// 監視役のスレッドで食事を始め、`limit` だけ待つ
///
/// 食卓そのものは止めない。時間切れになったスレッドはブロックしたまま放置される
pub fn dine_with_watchdog(table: Table, limit: Duration) -> Result<Verdict> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("dining".to_string())
        .spawn(move || {
            let _ = tx.send(table.start());
        })
        .map_err(|source| DiningError::Spawn {
            name: "dining",
            source,
        })?;

    match rx.recv_timeout(limit) {
        Ok(report) => Ok(Verdict::Finished(report?)),
        Err(RecvTimeoutError::Timeout) => {
            warn!(limit_ms = limit.as_millis() as u64, "dining did not finish in time");
            Ok(Verdict::Stalled)
        }
        Err(RecvTimeoutError::Disconnected) => Err(DiningError::CoordinatorLost),
    }
}
