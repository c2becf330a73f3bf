//! Imputation module for handling missing values.
//!
//! This module provides the statistical imputation strategies used by
//! cleaning:
//! - Mean imputation for `Age`
//! - Mode imputation for `Embarked`

mod statistical;

pub use statistical::{DEFAULT_EMBARKED, StatisticalImputer};
