//! Pipeline steps
//!
//! A step takes the context by value and hands it back, possibly modified.
//! Steps are the unit of composition for [`Discretizer`](super::Discretizer):
//! the engine runs them left to right and stops at the first failure.

use anyhow::Result;
use tracing::debug;

use super::context::DiscretizationContext;
use super::params::Parameters;
use super::stats::{distinct_count, optimal_bin_count};

/// A single transformation of the discretization context.
///
/// Steps must be thread-safe so one discretizer can serve several
/// attributes in parallel.
pub trait Step: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Apply the step.
    ///
    /// # Errors
    ///
    /// Any error aborts the pipeline; the engine turns it into a pass-through
    /// result.
    fn apply<'a>(&self, context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>>;
}

/// A step backed by a closure.
///
/// ```ignore
/// let step = FnStep::new("four-bins", |mut ctx| {
///     ctx.parameters.num_bins = Some(4);
///     Ok(ctx)
/// });
/// ```
pub struct FnStep<F> {
    name: String,
    func: F,
}

impl<F> FnStep<F>
where
    F: for<'a> Fn(DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Step for FnStep<F>
where
    F: for<'a> Fn(DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> {
        (self.func)(context)
    }
}

/// Overlay fixed parameters onto the context.
pub struct SetParameters(pub Parameters);

impl Step for SetParameters {
    fn name(&self) -> &str {
        "set-parameters"
    }

    fn apply<'a>(&self, mut context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> {
        debug!(parameters = ?self.0, "Setting parameters");
        context.parameters.merge(&self.0);
        Ok(context)
    }
}

/// Populate `numeric_values` from every row whose attribute value coerces.
///
/// Rows that do not coerce are left out of the values but stay in the
/// dataset untouched.
pub struct CoerceNumericValues;

impl Step for CoerceNumericValues {
    fn name(&self) -> &str {
        "coerce-numeric-values"
    }

    fn apply<'a>(&self, mut context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> {
        let values = context.dataset.numeric_values(&context.attribute_name);
        debug!(
            attribute = %context.attribute_name,
            coerced = values.len(),
            rows = context.dataset.rows.len(),
            "Coerced numeric values"
        );
        context.set_numeric_values(values);
        Ok(context)
    }
}

/// Store the Sturges bin count under `optimal_num_bins`.
pub struct OptimalBinCount;

impl Step for OptimalBinCount {
    fn name(&self) -> &str {
        "optimal-bin-count"
    }

    fn apply<'a>(&self, mut context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> {
        let n = context.numeric_values.len();
        let distinct = distinct_count(&context.numeric_values);
        let bins = optimal_bin_count(n, distinct);
        debug!(n, distinct, bins, "Computed optimal bin count");
        context.parameters.optimal_num_bins = Some(bins);
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::dataset::{AttributeType, DataRow, Dataset};

    fn dataset(values: &[f64]) -> Dataset {
        let mut ds = Dataset::new(None);
        ds.add_attribute("x", AttributeType::Numeric);
        for v in values {
            ds.push_row(DataRow::new("t").with("x", *v));
        }
        ds.push_row(DataRow::new("t").with("x", "n/a"));
        ds
    }

    #[test]
    fn test_coerce_step_sorts_and_skips_invalid() {
        let ds = dataset(&[3.0, 1.0, 2.0, 1.0]);
        let ctx = DiscretizationContext::new(&ds, "x", Parameters::new());
        let ctx = CoerceNumericValues.apply(ctx).unwrap();
        assert_eq!(ctx.numeric_values, vec![1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_optimal_bin_count_step() {
        let values: Vec<f64> = (1..=16).map(f64::from).collect();
        let ds = dataset(&values);
        let ctx = DiscretizationContext::new(&ds, "x", Parameters::new());
        let ctx = CoerceNumericValues.apply(ctx).unwrap();
        let ctx = OptimalBinCount.apply(ctx).unwrap();
        assert_eq!(ctx.parameters.optimal_num_bins, Some(5));
    }

    #[test]
    fn test_set_parameters_step_last_write_wins() {
        let ds = dataset(&[1.0]);
        let ctx = DiscretizationContext::new(&ds, "x", Parameters::new().with_num_bins(3));
        let ctx = SetParameters(Parameters::new().with_num_bins(4)).apply(ctx).unwrap();
        assert_eq!(ctx.parameters.num_bins, Some(4));
    }

    #[test]
    fn test_fn_step_runs_closure() {
        let ds = dataset(&[1.0]);
        let step = FnStep::new("tag", |mut ctx| {
            ctx.parameters.set("tag", "seen")?;
            Ok(ctx)
        });
        assert_eq!(step.name(), "tag");

        let ctx = step
            .apply(DiscretizationContext::new(&ds, "x", Parameters::new()))
            .unwrap();
        assert!(ctx.parameters.get("tag").is_some());
    }
}
