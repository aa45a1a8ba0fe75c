use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Color, Palette};
use crate::error::{ConfigError, ReplicaError, Result};

// ---------------------------------------------------------------------------
// Option values with more than one accepted shape
// ---------------------------------------------------------------------------

/// Either a number of outputs (named `o1`..`oN`) or an explicit name list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outputs {
    Count(usize),
    Named(Vec<String>),
}

impl Outputs {
    pub fn names(&self) -> Vec<String> {
        match self {
            Outputs::Count(n) => generated_names(*n),
            Outputs::Named(names) => names.clone(),
        }
    }
}

fn generated_names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("o{i}")).collect()
}

/// Plot type as given by the caller, before validation.
///
/// `"a"` superimposes every replication, `"f"` fills the min/max envelope,
/// and an integer is a moving-average window. Integer text such as `"2"`
/// reads as a window, both from JSON and from [`FromStr`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KindSpec {
    Window(i64),
    Code(String),
}

impl Default for KindSpec {
    fn default() -> Self {
        KindSpec::Code("a".to_string())
    }
}

impl FromStr for KindSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(w) => KindSpec::Window(w),
            Err(_) => KindSpec::Code(s.to_string()),
        })
    }
}

impl<'de> Deserialize<'de> for KindSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Window(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Window(w) => KindSpec::Window(w),
            Raw::Text(text) => match text.parse() {
                Ok(kind) => kind,
                Err(never) => match never {},
            },
        })
    }
}

impl fmt::Display for KindSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindSpec::Window(w) => write!(f, "{w}"),
            KindSpec::Code(c) => write!(f, "{c}"),
        }
    }
}

/// Validated plot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// Every replication of every output drawn as its own line.
    Superimposed,
    /// Band between the per-iteration minimum and maximum over replications.
    Filled,
    /// Trailing moving average of the cross-replication mean.
    MovingAverage(usize),
}

impl TryFrom<&KindSpec> for PlotKind {
    type Error = ConfigError;

    fn try_from(kind: &KindSpec) -> std::result::Result<Self, Self::Error> {
        match kind {
            KindSpec::Code(c) if c == "a" => Ok(PlotKind::Superimposed),
            KindSpec::Code(c) if c == "f" => Ok(PlotKind::Filled),
            KindSpec::Window(w) if *w >= 0 => Ok(PlotKind::MovingAverage(*w as usize)),
            other => Err(ConfigError::UnknownType(other.to_string())),
        }
    }
}

/// A single multiplier for every output, or one per output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scale {
    Uniform(f64),
    PerOutput(Vec<f64>),
}

// ---------------------------------------------------------------------------
// PlotOptions – everything the caller may leave out
// ---------------------------------------------------------------------------

/// Optional plotting parameters. Every field falls back to a default derived
/// from the first loaded file.
///
/// ```json
/// { "outputs": ["pop", "energy"], "type": 5, "layout": [1, 1], "scale": 0.5 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub outputs: Option<Outputs>,
    #[serde(rename = "type")]
    pub kind: Option<KindSpec>,
    pub layout: Option<Vec<usize>>,
    pub scale: Option<Scale>,
    /// Number of iterations to use; `0` means all rows of the first file.
    pub iters: Option<usize>,
    pub colors: Option<Vec<Color>>,
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ReplicaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_outputs(mut self, outputs: Outputs) -> Self {
        self.outputs = Some(outputs);
        self
    }

    pub fn with_kind(mut self, kind: KindSpec) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_layout(mut self, layout: Vec<usize>) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_iters(mut self, iters: usize) -> Self {
        self.iters = Some(iters);
        self
    }

    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Fill in defaults from the first file's shape (`rows` × `columns`) and
    /// check the parameters against each other.
    ///
    /// The plot type is carried through unvalidated; it is checked only once
    /// figures exist.
    pub fn resolve(
        &self,
        rows: usize,
        columns: usize,
    ) -> std::result::Result<ResolvedOptions, ConfigError> {
        let names = match &self.outputs {
            Some(outputs) => outputs.names(),
            None => generated_names(columns),
        };
        let num_outputs = names.len();
        if num_outputs == 0 {
            return Err(ConfigError::OutputCount);
        }

        let layout = self.layout.clone().unwrap_or_else(|| vec![num_outputs]);
        if let Some(index) = layout.iter().position(|&n| n == 0) {
            return Err(ConfigError::EmptyLayoutGroup { index });
        }
        let sum: usize = layout.iter().sum();
        if sum != num_outputs {
            return Err(ConfigError::LayoutSum {
                sum,
                outputs: num_outputs,
            });
        }

        let scale = match &self.scale {
            None => vec![1.0; num_outputs],
            Some(Scale::Uniform(s)) => vec![*s; num_outputs],
            Some(Scale::PerOutput(v)) if v.len() == 1 => vec![v[0]; num_outputs],
            Some(Scale::PerOutput(v)) if v.len() == num_outputs => v.clone(),
            Some(Scale::PerOutput(v)) => {
                return Err(ConfigError::ScaleLength {
                    got: v.len(),
                    outputs: num_outputs,
                });
            }
        };

        // Files shorter than `iters` are reported while stacking.
        let iters = match self.iters {
            None | Some(0) => rows,
            Some(n) => n,
        };

        let palette = match &self.colors {
            Some(colors) => Palette::new(colors.clone())?,
            None => Palette::default(),
        };

        Ok(ResolvedOptions {
            names,
            kind: self.kind.clone().unwrap_or_default(),
            layout,
            scale,
            iters,
            palette,
        })
    }
}

/// Plotting parameters with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub names: Vec<String>,
    pub kind: KindSpec,
    pub layout: Vec<usize>,
    pub scale: Vec<f64>,
    pub iters: usize,
    pub palette: Palette,
}

impl ResolvedOptions {
    pub fn num_outputs(&self) -> usize {
        self.names.len()
    }

    /// Output index ranges, one per figure, in layout order.
    pub fn groups(&self) -> Vec<std::ops::Range<usize>> {
        let mut start = 0;
        self.layout
            .iter()
            .map(|&len| {
                let range = start..start + len;
                start += len;
                range
            })
            .collect()
    }
}
