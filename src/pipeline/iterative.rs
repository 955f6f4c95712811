//! Generic iterative driver: strategies that compute all cut points at once

use anyhow::Result;
use tracing::debug;

use super::context::DiscretizationContext;
use super::steps::Step;

/// A strategy producing the full cut point set from global statistics.
pub trait IterativeBinningStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Compute cut points for the context's numeric values.
    ///
    /// Only called when there is at least one numeric value. The returned
    /// points need not be sorted.
    fn compute(&self, context: &DiscretizationContext<'_>) -> Result<Vec<f64>>;
}

/// Pipeline step running an [`IterativeBinningStrategy`].
pub struct IterativeBinning<S> {
    strategy: S,
    name: String,
}

impl<S: IterativeBinningStrategy> IterativeBinning<S> {
    pub fn new(strategy: S) -> Self {
        let name = format!("iterative-binning({})", strategy.name());
        Self { strategy, name }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Run the strategy and store its cut points, sorted and deduplicated.
    ///
    /// An empty value set leaves the context untouched. Strategy errors are
    /// propagated to the caller.
    pub fn execute<'a>(&self, mut context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> {
        if context.numeric_values.is_empty() {
            debug!(strategy = self.strategy.name(), "No numeric values, skipping strategy");
            return Ok(context);
        }

        let cut_points = self.strategy.compute(&context)?;
        context.set_cut_points(cut_points);
        debug!(
            strategy = self.strategy.name(),
            cut_points = context.cut_points.len(),
            "Iterative binning complete"
        );
        Ok(context)
    }
}

impl<S: IterativeBinningStrategy> Step for IterativeBinning<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply<'a>(&self, context: DiscretizationContext<'a>) -> Result<DiscretizationContext<'a>> {
        self.execute(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::dataset::{AttributeType, DataRow, Dataset};
    use crate::pipeline::params::Parameters;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        points: Vec<f64>,
        calls: AtomicUsize,
    }

    impl IterativeBinningStrategy for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn compute(&self, _context: &DiscretizationContext<'_>) -> Result<Vec<f64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.points.clone())
        }
    }

    struct Failing;

    impl IterativeBinningStrategy for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn compute(&self, _context: &DiscretizationContext<'_>) -> Result<Vec<f64>> {
            anyhow::bail!("strategy exploded")
        }
    }

    fn dataset() -> Dataset {
        let mut ds = Dataset::new(None);
        ds.add_attribute("x", AttributeType::Numeric);
        ds.push_row(DataRow::new("t").with("x", 1.0));
        ds
    }

    #[test]
    fn test_driver_sorts_and_dedups_strategy_output() {
        let ds = dataset();
        let mut ctx = DiscretizationContext::new(&ds, "x", Parameters::new());
        ctx.set_numeric_values(vec![1.0, 2.0]);

        let driver = IterativeBinning::new(Fixed {
            points: vec![3.0, 1.0, 3.0],
            calls: AtomicUsize::new(0),
        });
        let ctx = driver.execute(ctx).unwrap();
        assert_eq!(ctx.cut_points, vec![1.0, 3.0]);
        assert_eq!(driver.name(), "iterative-binning(fixed)");
    }

    #[test]
    fn test_driver_skips_strategy_without_values() {
        let ds = dataset();
        let ctx = DiscretizationContext::new(&ds, "x", Parameters::new());
        let driver = IterativeBinning::new(Fixed {
            points: vec![1.0],
            calls: AtomicUsize::new(0),
        });
        let ctx = driver.execute(ctx).unwrap();
        assert!(ctx.cut_points.is_empty());
        assert_eq!(driver.strategy().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_driver_propagates_strategy_errors() {
        let ds = dataset();
        let mut ctx = DiscretizationContext::new(&ds, "x", Parameters::new());
        ctx.set_numeric_values(vec![1.0]);
        let err = IterativeBinning::new(Failing).execute(ctx).unwrap_err();
        assert!(err.to_string().contains("exploded"));
    }
}
