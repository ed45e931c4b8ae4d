//! Axis configuration, tick placement, and formatting.

use std::sync::Arc;

use crate::view::Range;

/// Number of ticks drawn along each axis.
pub const DEFAULT_TICK_COUNT: usize = 6;

/// Significant digits used by the default tick formatter.
pub const DEFAULT_PRECISION: usize = 4;

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// General numeric format with four significant digits.
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Default => format_general(value, DEFAULT_PRECISION),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

/// Axis configuration for one chart axis.
#[derive(Debug, Clone, Default)]
pub struct AxisConfig {
    title: Option<String>,
    tick_count: Option<usize>,
    formatter: AxisFormatter,
}

impl AxisConfig {
    /// Create a new axis configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the number of ticks.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = Some(count);
        self
    }

    /// Set the axis formatter.
    pub fn with_formatter(mut self, formatter: AxisFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Access the axis title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number of ticks to place along the axis.
    pub fn tick_count(&self) -> usize {
        self.tick_count.unwrap_or(DEFAULT_TICK_COUNT)
    }

    /// Access the formatter.
    pub fn formatter(&self) -> &AxisFormatter {
        &self.formatter
    }
}

/// Evenly spaced tick values from `range.min` to `range.max`, both included.
pub fn ticks(range: Range, count: usize) -> Vec<f64> {
    if !range.is_finite() || count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![range.min];
    }
    let step = range.span() / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                range.max
            } else {
                range.min + step * i as f64
            }
        })
        .collect()
}

/// Format a value with `precision` significant digits, choosing between fixed
/// and scientific notation and dropping trailing zeros.
///
/// Scientific notation is used when the decimal exponent is below -4 or not
/// less than `precision`.
pub fn format_general(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }
    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_uses_significant_digits() {
        assert_eq!(format_general(1.0, 4), "1");
        assert_eq!(format_general(3.14159, 4), "3.142");
        assert_eq!(format_general(-0.5, 4), "-0.5");
        assert_eq!(format_general(1234.4, 4), "1234");
        assert_eq!(format_general(0.0, 4), "0");
    }

    #[test]
    fn general_format_switches_to_scientific() {
        assert_eq!(format_general(12344.0, 4), "1.234e+04");
        assert_eq!(format_general(0.00001234, 4), "1.234e-05");
        assert_eq!(format_general(100000.0, 4), "1e+05");
    }

    #[test]
    fn ticks_include_both_ends() {
        let values = ticks(Range::new(0.0, 10.0), 6);
        assert_eq!(values, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert!(ticks(Range::new(0.0, f64::NAN), 6).is_empty());
    }

    #[test]
    fn custom_formatter_is_used() {
        let config = AxisConfig::new()
            .with_formatter(AxisFormatter::Custom(Arc::new(|value| format!("{value}s"))));
        assert_eq!(config.formatter().format(2.5), "2.5s");
        assert_eq!(config.tick_count(), DEFAULT_TICK_COUNT);
    }
}
