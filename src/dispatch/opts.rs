use crate::engine::passes::Passes;
use crate::foundation::error::{DebandError, DebandResult};

/// Where column-pass band detection looks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnExtent {
    /// Only the rows of the worker's own strip. A vertical band crossing a strip boundary is
    /// rebuilt as two shorter bands, so output depends on the thread count.
    #[default]
    Strip,
    /// The full height of the render window. Each worker still writes only its own rows;
    /// output is identical for every thread count.
    Window,
}

/// Per-session options.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebandOpts {
    /// Worker threads, and therefore strips per frame. Must be >= 1.
    pub threads: usize,
    /// Which scan axes run.
    pub passes: Passes,
    /// Column-pass detection extent.
    pub column_extent: ColumnExtent,
}

impl Default for DebandOpts {
    fn default() -> Self {
        Self {
            threads: 1,
            passes: Passes::Both,
            column_extent: ColumnExtent::Strip,
        }
    }
}

impl DebandOpts {
    pub fn validate(&self) -> DebandResult<()> {
        if self.threads == 0 {
            return Err(DebandError::validation("deband 'threads' must be >= 1"));
        }
        Ok(())
    }

    /// Parse and validate options from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> DebandResult<Self> {
        let opts: Self = serde_json::from_str(json)
            .map_err(|e| DebandError::validation(format!("invalid deband options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/opts.rs"]
mod tests;
