//! 食事する哲学者の問題
//!
//! 円卓に N 人の哲学者と N 本の箸を並べ、4 通りのやり方で食事させる
//! - naive: 全員が右 → 左 (デッドロックする)
//! - asymmetric: 1 人だけ左 → 右
//! - admission-controlled: ウェイターが N-1 人までしか箸に触らせない
//! - monitor: モニタが両隣の食事中でない人にだけ許可を出す

pub mod config;
pub mod error;
pub mod fork;
pub mod monitor;
pub mod observer;
pub mod philosopher;
pub mod semaphore;
pub mod strategy;
pub mod table;
pub mod watchdog;

pub use config::{DiningConfig, Solution};
pub use error::{DiningError, Result};
pub use observer::{Event, EventLog, Observer, Side, Silent, Trace};
pub use strategy::Strategy;
pub use table::{setup_dining, DiningReport, Table};
pub use watchdog::{dine_with_watchdog, Verdict};
