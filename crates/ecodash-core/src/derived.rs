use polars::prelude::DataFrame;

use crate::error::Result;

/// A derived table, or the explicit signal that nothing matched. An empty selection is not
/// an error.
#[derive(Debug, Clone)]
pub enum Derived {
    Rows(DataFrame),
    Empty { reason: String },
}

impl Derived {
    pub fn from_frame(df: DataFrame, reason: impl FnOnce() -> String) -> Self {
        if df.height() == 0 {
            Derived::Empty { reason: reason() }
        } else {
            Derived::Rows(df)
        }
    }

    pub fn empty(reason: impl Into<String>) -> Self {
        Derived::Empty {
            reason: reason.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Derived::Empty { .. })
    }

    pub fn height(&self) -> usize {
        match self {
            Derived::Rows(df) => df.height(),
            Derived::Empty { .. } => 0,
        }
    }

    pub fn rows(&self) -> Option<&DataFrame> {
        match self {
            Derived::Rows(df) => Some(df),
            Derived::Empty { .. } => None,
        }
    }

    pub fn into_rows(self) -> Option<DataFrame> {
        match self {
            Derived::Rows(df) => Some(df),
            Derived::Empty { .. } => None,
        }
    }

    pub fn empty_reason(&self) -> Option<&str> {
        match self {
            Derived::Rows(_) => None,
            Derived::Empty { reason } => Some(reason),
        }
    }

    pub fn map<F>(&self, f: F) -> Result<Derived>
    where
        F: FnOnce(&DataFrame) -> Result<DataFrame>,
    {
        match self {
            Derived::Rows(df) => {
                let output = f(df)?;
                Ok(Derived::from_frame(output, || {
                    "no rows remain after aggregation".to_string()
                }))
            }
            Derived::Empty { reason } => Ok(Derived::empty(reason.clone())),
        }
    }

    pub fn and_then<F>(&self, f: F) -> Result<Derived>
    where
        F: FnOnce(&DataFrame) -> Result<Derived>,
    {
        match self {
            Derived::Rows(df) => f(df),
            Derived::Empty { reason } => Ok(Derived::empty(reason.clone())),
        }
    }

    pub fn with_empty_reason(self, reason: impl Into<String>) -> Self {
        match self {
            Derived::Empty { .. } => Derived::empty(reason),
            rows => rows,
        }
    }
}
