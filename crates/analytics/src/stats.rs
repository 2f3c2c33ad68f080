use core_types::PriceSeries;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Simple period-over-period returns. The first observation contributes no return.
///
/// Either every consecutive pair yields a return or the series is undefined: a zero
/// previous close or a ratio outside the `Decimal` range returns `None`.
pub(crate) fn simple_returns(series: &PriceSeries) -> Option<Vec<Decimal>> {
    series
        .observations()
        .windows(2)
        .map(|w| w[1].close.checked_div(w[0].close)?.checked_sub(Decimal::ONE))
        .collect()
}

/// Arithmetic mean, `None` for an empty slice or when the sum overflows.
pub(crate) fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(values.len()))
}

/// Sample standard deviation (n - 1 denominator).
///
/// Undefined below two values, and when the squared deviations overflow.
pub(crate) fn sample_std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        let dev = v.checked_sub(mean)?;
        acc.checked_add(dev.checked_mul(dev)?)
    })?;
    let variance = sum_sq.checked_div(Decimal::from(values.len() - 1))?;
    variance.sqrt()
}
