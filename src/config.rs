use std::{fs, path::Path, time::Duration};

use clap::ValueEnum;
use serde::Deserialize;

use crate::{
    error::{DiningError, Result},
    table::PHILOSOPHER_NAMES,
};

/// 食卓の問題の解き方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Solution {
    /// 全員が右の箸から取る (デッドロックする)
    #[default]
    Naive,
    /// 1 人だけ左の箸から取る
    Asymmetric,
    /// ウェイターが同時に箸を取れる人数を制限する
    AdmissionControlled,
    /// モニタが食事を許可する
    Monitor,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiningConfig {
    /// 哲学者 (と箸) の数
    pub philosophers: usize,
    /// 1 人が食べ終わるまでの食事回数
    pub stomach: usize,
    /// 1 回の食事にかかる時間の上限 [ns]
    pub eat_ns: u64,
    pub solution: Solution,
}

impl Default for DiningConfig {
    fn default() -> Self {
        DiningConfig {
            philosophers: 5,
            stomach: 1000,
            eat_ns: 5000,
            solution: Solution::Naive,
        }
    }
}

impl DiningConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| DiningError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn max_eat(&self) -> Duration {
        Duration::from_nanos(self.eat_ns)
    }

    pub fn validate(&self) -> Result<()> {
        if self.philosophers == 0 {
            return Err(DiningError::NoPhilosophers);
        }
        if self.philosophers > PHILOSOPHER_NAMES.len() {
            return Err(DiningError::TooManyPhilosophers {
                requested: self.philosophers,
                max: PHILOSOPHER_NAMES.len(),
            });
        }
        if self.eat_ns == 0 {
            return Err(DiningError::ZeroEatDuration);
        }
        Ok(())
    }
}
