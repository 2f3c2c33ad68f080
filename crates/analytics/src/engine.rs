use crate::report::{DrawdownPoint, RiskMetrics, RiskProfile};
use crate::stats::{mean, sample_std_dev, simple_returns};
use core_types::PriceSeries;
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a reported figure to 2 dp, ties to even.
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// A stateless calculator for drawdown and annualized risk ratios over a price series.
///
/// The risk-free rate and the annualization factor are supplied at construction so the
/// same engine can be shared by every instrument in an update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskMetricsEngine {
    risk_free_rate: Decimal,
    periods_per_year: u32,
}

impl Default for RiskMetricsEngine {
    /// 4% annual risk-free rate over 252 trading days.
    fn default() -> Self {
        Self::new(Decimal::new(4, 2), 252)
    }
}

impl RiskMetricsEngine {
    /// # Arguments
    ///
    /// * `risk_free_rate` - Annualized fraction, e.g. `0.04`.
    /// * `periods_per_year` - Annualization constant, `252` for daily equity data.
    pub fn new(risk_free_rate: Decimal, periods_per_year: u32) -> Self {
        Self {
            risk_free_rate,
            periods_per_year,
        }
    }

    /// The main entry point: the drawdown curve plus Sharpe, Sortino and max drawdown.
    ///
    /// The series must already be in chronological order. This never fails; a series with
    /// fewer than two observations yields zero-valued ratios, as does a series whose returns
    /// fall outside the `Decimal` range. The drawdown curve is reported either way.
    pub fn compute_risk_profile(&self, series: &PriceSeries) -> RiskProfile {
        let drawdowns = Self::drawdown_curve(series);
        let max_drawdown_pct = Self::max_drawdown(&drawdowns);
        let zero_ratios = RiskMetrics {
            max_drawdown_pct,
            ..RiskMetrics::default()
        };

        let Some(returns) = simple_returns(series) else {
            tracing::warn!(
                observations = series.len(),
                "Return series undefined; reporting zero risk ratios."
            );
            return RiskProfile {
                drawdowns,
                metrics: zero_ratios,
            };
        };
        if returns.is_empty() {
            tracing::debug!(
                observations = series.len(),
                "Fewer than two prices; reporting zero risk ratios."
            );
            return RiskProfile {
                drawdowns,
                metrics: zero_ratios,
            };
        }

        let metrics = RiskMetrics {
            sharpe_ratio: self.sharpe_ratio(&returns),
            sortino_ratio: self.sortino_ratio(&returns),
            max_drawdown_pct,
        };

        RiskProfile { drawdowns, metrics }
    }

    /// Single forward pass keeping the running peak.
    ///
    /// Drawdowns are computed from the full-precision closes; only the resulting
    /// percentage is rounded.
    pub fn drawdown_curve(series: &PriceSeries) -> Vec<DrawdownPoint> {
        let Some(first) = series.observations().first() else {
            return Vec::new();
        };

        let mut peak = first.close;
        series
            .iter()
            .map(|obs| {
                if obs.close > peak {
                    peak = obs.close;
                }

                let drawdown_pct = if peak.is_zero() || obs.close >= peak {
                    Decimal::ZERO
                } else {
                    obs.close
                        .checked_sub(peak)
                        .and_then(|fall| fall.checked_div(peak))
                        .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
                        .map(round2)
                        .unwrap_or(Decimal::ZERO)
                };

                DrawdownPoint {
                    date: obs.date,
                    price: obs.close,
                    drawdown_pct,
                }
            })
            .collect()
    }

    /// The deepest point of the curve, or zero for an empty curve.
    pub fn max_drawdown(curve: &[DrawdownPoint]) -> Decimal {
        curve
            .iter()
            .map(|p| p.drawdown_pct)
            .min()
            .unwrap_or(Decimal::ZERO)
    }

    fn annualized_mean(&self, returns: &[Decimal]) -> Option<Decimal> {
        mean(returns)?.checked_mul(Decimal::from(self.periods_per_year))
    }

    fn annualized_std_dev(&self, returns: &[Decimal]) -> Option<Decimal> {
        let scale = Decimal::from(self.periods_per_year).sqrt()?;
        sample_std_dev(returns)?.checked_mul(scale)
    }

    /// Excess annualized return over annualized volatility.
    ///
    /// 0 when volatility is zero or undefined, including on overflow.
    fn sharpe_ratio(&self, returns: &[Decimal]) -> Decimal {
        let (Some(mean_return), Some(std_dev)) = (
            self.annualized_mean(returns),
            self.annualized_std_dev(returns),
        ) else {
            tracing::debug!(
                returns = returns.len(),
                "Volatility undefined; Sharpe ratio reported as 0."
            );
            return Decimal::ZERO;
        };

        let excess = mean_return.checked_sub(self.risk_free_rate);
        match excess.and_then(|e| e.checked_div(std_dev)) {
            Some(ratio) => round2(ratio),
            None => {
                tracing::debug!("Zero volatility; Sharpe ratio reported as 0.");
                Decimal::ZERO
            }
        }
    }

    /// Like Sharpe, but the denominator only sees returns strictly below zero.
    fn sortino_ratio(&self, returns: &[Decimal]) -> Decimal {
        let downside: Vec<Decimal> = returns
            .iter()
            .copied()
            .filter(|r| *r < Decimal::ZERO)
            .collect();

        let (Some(mean_return), Some(downside_std)) = (
            self.annualized_mean(returns),
            self.annualized_std_dev(&downside),
        ) else {
            tracing::debug!(
                downside_returns = downside.len(),
                "Downside deviation undefined; Sortino ratio reported as 0."
            );
            return Decimal::ZERO;
        };

        if downside_std <= Decimal::ZERO {
            tracing::debug!("Zero downside deviation; Sortino ratio reported as 0.");
            return Decimal::ZERO;
        }

        mean_return
            .checked_sub(self.risk_free_rate)
            .and_then(|e| e.checked_div(downside_std))
            .map(round2)
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use core_types::PriceObservation;
    use rust_decimal_macros::dec;

    fn series(prices: &[Decimal]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PriceObservation::new(start + Duration::days(i as i64), *p))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn drawdown_curve_follows_the_running_peak() {
        let profile = RiskMetricsEngine::default()
            .compute_risk_profile(&series(&[dec!(100), dec!(110), dec!(90), dec!(120)]));

        let curve: Vec<Decimal> = profile.drawdowns.iter().map(|p| p.drawdown_pct).collect();
        assert_eq!(curve, vec![dec!(0), dec!(0), dec!(-18.18), dec!(0)]);
        assert_eq!(profile.metrics.max_drawdown_pct, dec!(-18.18));
    }

    #[test]
    fn drawdown_points_carry_date_and_price() {
        let s = series(&[dec!(100.456), dec!(99)]);
        let curve = RiskMetricsEngine::drawdown_curve(&s);
        assert_eq!(curve[0].date, s.observations()[0].date);
        assert_eq!(curve[0].price, dec!(100.456));
        assert_eq!(curve[1].drawdown_pct, dec!(-1.45));
    }

    #[test]
    fn drawdown_is_never_positive_and_zero_at_new_highs() {
        let prices = [
            dec!(50), dec!(48), dec!(52), dec!(51.5), dec!(60), dec!(30), dec!(61), dec!(61),
        ];
        let curve = RiskMetricsEngine::drawdown_curve(&series(&prices));

        let mut running_max = Decimal::MIN;
        for (point, price) in curve.iter().zip(prices) {
            assert!(point.drawdown_pct <= Decimal::ZERO);
            running_max = running_max.max(price);
            if price == running_max {
                assert_eq!(point.drawdown_pct, Decimal::ZERO);
            }
        }

        let min = curve.iter().map(|p| p.drawdown_pct).min().unwrap();
        assert_eq!(RiskMetricsEngine::max_drawdown(&curve), min);
        assert_eq!(min, dec!(-50));
    }

    #[test]
    fn non_decreasing_series_has_no_drawdown() {
        let profile = RiskMetricsEngine::default()
            .compute_risk_profile(&series(&[dec!(10), dec!(10), dec!(11), dec!(12.5)]));
        assert_eq!(profile.metrics.max_drawdown_pct, Decimal::ZERO);
        assert!(profile.drawdowns.iter().all(|p| p.drawdown_pct.is_zero()));
    }

    #[test]
    fn empty_series_yields_zeroed_profile() {
        let profile = RiskMetricsEngine::default().compute_risk_profile(&PriceSeries::default());
        assert!(profile.drawdowns.is_empty());
        assert_eq!(profile.metrics, RiskMetrics::default());
    }

    #[test]
    fn single_point_yields_zero_ratios() {
        let profile = RiskMetricsEngine::default().compute_risk_profile(&series(&[dec!(42)]));
        assert_eq!(profile.drawdowns.len(), 1);
        assert_eq!(profile.metrics, RiskMetrics::default());
    }

    #[test]
    fn flat_prices_report_zero_ratios_instead_of_dividing_by_zero() {
        let profile = RiskMetricsEngine::default()
            .compute_risk_profile(&series(&[dec!(20), dec!(20), dec!(20), dec!(20)]));
        assert_eq!(profile.metrics.sharpe_ratio, Decimal::ZERO);
        assert_eq!(profile.metrics.sortino_ratio, Decimal::ZERO);
    }

    #[test]
    fn sharpe_is_annualized_and_net_of_the_risk_free_rate() {
        // Returns +10%, -10%: mean 0, sample sd sqrt(0.02), annualized over 252 periods.
        let profile = RiskMetricsEngine::new(dec!(0.04), 252)
            .compute_risk_profile(&series(&[dec!(100), dec!(110), dec!(99)]));
        assert_eq!(profile.metrics.sharpe_ratio, dec!(-0.02));
        // One downside return has no sample deviation.
        assert_eq!(profile.metrics.sortino_ratio, Decimal::ZERO);
    }

    #[test]
    fn sortino_uses_only_downside_returns() {
        // Returns -10%, +10%, -20%.
        let profile = RiskMetricsEngine::new(Decimal::ZERO, 1)
            .compute_risk_profile(&series(&[dec!(100), dec!(90), dec!(99), dec!(79.2)]));
        assert_eq!(profile.metrics.sharpe_ratio, dec!(-0.44));
        assert_eq!(profile.metrics.sortino_ratio, dec!(-0.94));
        assert_eq!(profile.metrics.max_drawdown_pct, dec!(-20.8));
    }

    #[test]
    fn sortino_is_zero_without_downside_returns() {
        let profile = RiskMetricsEngine::new(Decimal::ZERO, 252)
            .compute_risk_profile(&series(&[dec!(100), dec!(101), dec!(103), dec!(103)]));
        assert!(profile.metrics.sharpe_ratio > Decimal::ZERO);
        assert_eq!(profile.metrics.sortino_ratio, Decimal::ZERO);
    }

    #[test]
    fn extreme_price_swings_report_zero_ratios_without_panicking() {
        // Squared deviations of a 10^21 return exceed the Decimal range.
        let profile = RiskMetricsEngine::default().compute_risk_profile(&series(&[
            dec!(0.0000000001),
            dec!(100000000000),
            dec!(0.0000000001),
        ]));
        assert_eq!(profile.metrics.sharpe_ratio, Decimal::ZERO);
        assert_eq!(profile.metrics.sortino_ratio, Decimal::ZERO);
        assert_eq!(profile.metrics.max_drawdown_pct, dec!(-100));
    }

    #[test]
    fn unrepresentable_return_zeroes_ratios_but_keeps_drawdowns() {
        // The first ratio, 10^29, is beyond Decimal::MAX; the second pair alone would
        // otherwise produce a -50% return and a nonzero Sharpe.
        let profile = RiskMetricsEngine::default().compute_risk_profile(&series(&[
            dec!(0.0000000000000001),
            dec!(10000000000000),
            dec!(5000000000000),
        ]));
        assert_eq!(profile.metrics.sharpe_ratio, Decimal::ZERO);
        assert_eq!(profile.metrics.sortino_ratio, Decimal::ZERO);
        assert_eq!(profile.metrics.max_drawdown_pct, dec!(-50));
        assert_eq!(profile.drawdowns.len(), 3);
    }

    #[test]
    fn into_parts_splits_curve_and_metrics() {
        let (curve, metrics) = RiskMetricsEngine::default()
            .compute_risk_profile(&series(&[dec!(1), dec!(2)]))
            .into_parts();
        assert_eq!(curve.len(), 2);
        assert_eq!(metrics.max_drawdown_pct, Decimal::ZERO);
    }
}
