//! Fixed-multiplier yield projections and the advisory allocation split.
//!
//! Everything here is plain arithmetic on a collateral snapshot. The rates
//! are compiled-in constants, not market data, and the "prediction" is a
//! linear extrapolation.

/// Base lending APY, in percent.
pub const BASE_APY: f64 = 4.0;

/// Advertised speed multiplier applied to the base APY.
pub const SPEED_MULTIPLIER: f64 = 2.0;

/// Advertised boost multiplier applied on top of the speed multiplier.
pub const AI_BOOST: f64 = 1.5;

/// Display labels for the multipliers above.
pub const SPEED_MULTIPLIER_LABEL: &str = "2X";
pub const AI_BOOST_LABEL: &str = "+50%";

/// Horizon used by predictions when `days` is absent or unusable.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Advisory split: aave / compound / curve / uniswap.
pub const ALLOCATION_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];

/// Effective APY in percent: 4 * 2 * 1.5 = 12.
pub fn effective_apy() -> f64 {
    BASE_APY * SPEED_MULTIPLIER * AI_BOOST
}

/// Linear return projection for a collateral value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub principal: f64,
    pub base_apy: f64,
    pub effective_apy: f64,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub weekly_projection: f64,
    pub monthly_projection: f64,
    pub yearly_projection: f64,
}

impl Projection {
    pub fn for_collateral(collateral: f64) -> Self {
        let effective_apy = effective_apy();
        let yearly = collateral * (effective_apy / 100.0);
        let daily = yearly / 365.0;

        Self {
            principal: collateral,
            base_apy: BASE_APY,
            effective_apy,
            hourly_rate: daily / 24.0,
            daily_rate: daily,
            weekly_projection: daily * 7.0,
            monthly_projection: daily * 30.0,
            yearly_projection: yearly,
        }
    }

    /// Projected return over `days`.
    pub fn over_days(&self, days: u32) -> f64 {
        self.daily_rate * f64::from(days)
    }
}

/// Parse the `days` query parameter.
///
/// Only the leading integer is read, so `"7.5"` is 7 and `"10abc"` is 10.
/// Input with no leading digits, zero, negative values and values beyond
/// `u32` all fall back to [`DEFAULT_HORIZON_DAYS`]; this is never an error.
pub fn parse_horizon_days(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_HORIZON_DAYS;
    };

    let text = raw.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    match rest[..digits_end].parse::<u32>() {
        Ok(days) if days > 0 && !negative => days,
        _ => DEFAULT_HORIZON_DAYS,
    }
}

/// Advisory allocation of a collateral value across four venues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub aave: f64,
    pub compound: f64,
    pub curve: f64,
    pub uniswap: f64,
}

impl Allocation {
    /// Split `collateral` 40/30/20/10. The last bucket takes the remainder so
    /// that the buckets always add back up to `collateral`.
    pub fn split(collateral: f64) -> Self {
        let [aave_w, compound_w, curve_w, _] = ALLOCATION_WEIGHTS;
        let aave = collateral * aave_w;
        let compound = collateral * compound_w;
        let curve = collateral * curve_w;
        let uniswap = collateral - (aave + compound + curve);

        Self {
            aave,
            compound,
            curve,
            uniswap,
        }
    }

    pub fn total(&self) -> f64 {
        self.aave + self.compound + self.curve + self.uniswap
    }
}
