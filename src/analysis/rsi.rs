use std::fmt;

pub const RSI_PERIOD: usize = 14;

/// Reading reported when no RSI could be computed.
pub const RSI_NO_DATA: f64 = -1.0;

/// Relative Strength Index of the last close using Wilder smoothing.
///
/// Gains and losses are exponentially smoothed with `alpha = 1 / period`
/// starting from zero, so the leading bar contributes no change. At least
/// `period` closes are required; fewer yields `None`. A series without any
/// smoothed loss reads 100.
pub fn latest_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    if closes.iter().any(|close| !close.is_finite()) {
        return None;
    }

    let alpha = 1.0 / period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for change in closes.windows(2).map(|pair| pair[1] - pair[0]) {
        avg_gain = (1.0 - alpha) * avg_gain + alpha * change.max(0.0);
        avg_loss = (1.0 - alpha) * avg_loss + alpha * (-change).max(0.0);
    }

    let rsi = if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    };

    Some(rsi.clamp(0.0, 100.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiStatus {
    DataError,
    Overbought,
    Oversold,
    Neutral,
}

impl RsiStatus {
    pub fn classify(rsi: f64) -> Self {
        if rsi == RSI_NO_DATA || !rsi.is_finite() {
            RsiStatus::DataError
        } else if rsi >= 70.0 {
            RsiStatus::Overbought
        } else if rsi <= 30.0 {
            RsiStatus::Oversold
        } else {
            RsiStatus::Neutral
        }
    }
}

impl fmt::Display for RsiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RsiStatus::DataError => "DATA ERROR",
            RsiStatus::Overbought => "OVERBOUGHT",
            RsiStatus::Oversold => "OVERSOLD",
            RsiStatus::Neutral => "NEUTRAL",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_a_full_period_of_closes() {
        let short: Vec<f64> = (0..13).map(|i| 100.0 + i as f64).collect();
        assert_eq!(latest_rsi(&short, RSI_PERIOD), None);
        assert_eq!(latest_rsi(&[], RSI_PERIOD), None);

        let closes = [
            100.0, 101.0, 99.0, 102.0, 103.0, 101.0, 100.0, 104.0, 103.0, 105.0, 104.0, 102.0,
            106.0, 107.0,
        ];
        let rsi = latest_rsi(&closes, RSI_PERIOD).unwrap();
        assert!((rsi - 65.714_566_592_677_93).abs() < 1e-9, "{rsi}");
    }

    #[test]
    fn extremes_for_one_way_markets() {
        let rising: Vec<f64> = (0..20).map(|i| 50.0 + i as f64).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();

        assert_eq!(latest_rsi(&rising, RSI_PERIOD), Some(100.0));
        assert_eq!(latest_rsi(&falling, RSI_PERIOD), Some(0.0));
        assert_eq!(latest_rsi(&[10.0; 20], RSI_PERIOD), Some(100.0));
    }

    #[test]
    fn matches_hand_computed_smoothing() {
        // alpha 0.5 from zero: gains 0.5, 0.25, 1.125; losses 0, 0.5, 0.25
        let rsi = latest_rsi(&[1.0, 2.0, 1.0, 3.0], 2).unwrap();
        assert!((rsi - (100.0 - 100.0 / 5.5)).abs() < 1e-9, "{rsi}");
    }

    #[test]
    fn early_jump_is_damped_on_mixed_month() {
        let closes = [
            150.0, 158.0, 157.0, 155.0, 156.0, 153.0, 154.0, 152.0, 151.0, 153.0, 150.0, 149.0,
            151.0, 148.0, 150.0, 147.0, 149.0, 146.0, 150.0, 151.0, 152.0,
        ];

        let rsi = latest_rsi(&closes, RSI_PERIOD).unwrap();

        assert!((rsi - 53.257_190_173_353_94).abs() < 1e-9, "{rsi}");
        assert_eq!(RsiStatus::classify(rsi), RsiStatus::Neutral);
    }

    #[test]
    fn stays_within_bounds_on_noisy_series() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + ((i * 37) % 11) as f64 - 5.0)
            .collect();

        let rsi = latest_rsi(&closes, RSI_PERIOD).unwrap();
        assert!((0.0..=100.0).contains(&rsi), "{rsi}");
    }

    #[test]
    fn classifies_status_boundaries() {
        assert_eq!(RsiStatus::classify(RSI_NO_DATA), RsiStatus::DataError);
        assert_eq!(RsiStatus::classify(70.0), RsiStatus::Overbought);
        assert_eq!(RsiStatus::classify(30.0), RsiStatus::Oversold);
        assert_eq!(RsiStatus::classify(0.0), RsiStatus::Oversold);
        assert_eq!(RsiStatus::classify(50.0).to_string(), "NEUTRAL");
        assert_eq!(RsiStatus::DataError.to_string(), "DATA ERROR");
    }
}
