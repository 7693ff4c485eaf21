use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

const EXPECTED: &str =
    "stdout|stderr|syslog|syslog.shuffle|prelaunch.out|prelaunch.err|container-localizer-syslog";

/// Named log stream produced by a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogType {
    #[serde(rename = "stdout")]
    Stdout,
    #[serde(rename = "stderr")]
    Stderr,
    #[serde(rename = "syslog")]
    Syslog,
    #[serde(rename = "syslog.shuffle")]
    SyslogShuffle,
    #[serde(rename = "prelaunch.out")]
    PrelaunchOut,
    #[serde(rename = "prelaunch.err")]
    PrelaunchErr,
    #[serde(rename = "container-localizer-syslog")]
    ContainerLocalizerSyslog,
}

impl LogType {
    pub const ALL: [LogType; 7] = [
        LogType::Stdout,
        LogType::Stderr,
        LogType::Syslog,
        LogType::SyslogShuffle,
        LogType::PrelaunchOut,
        LogType::PrelaunchErr,
        LogType::ContainerLocalizerSyslog,
    ];

    /// File name of the stream as the log server knows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Stdout => "stdout",
            LogType::Stderr => "stderr",
            LogType::Syslog => "syslog",
            LogType::SyslogShuffle => "syslog.shuffle",
            LogType::PrelaunchOut => "prelaunch.out",
            LogType::PrelaunchErr => "prelaunch.err",
            LogType::ContainerLocalizerSyslog => "container-localizer-syslog",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim();
        LogType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(norm))
            .ok_or_else(|| ModelError::UnknownLogType(s.to_string(), EXPECTED))
    }
}
