use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Closed set of analyzers the pipeline can dispatch to. Adding a variant
/// requires a matching dispatch branch in the queue processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalyzerKind {
    #[serde(rename = "java8to21")]
    Java8To21,
    #[serde(rename = "simpler3to4")]
    Simpler3To4,
}

impl AnalyzerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::Java8To21 => "java8to21",
            AnalyzerKind::Simpler3To4 => "simpler3to4",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalyzerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java8to21" => Ok(AnalyzerKind::Java8To21),
            "simpler3to4" => Ok(AnalyzerKind::Simpler3To4),
            other => Err(format!("unknown analyzer kind '{}'", other)),
        }
    }
}
