use crate::config::OrderConfig;

/// Turns dollar amounts and slider positions into share sizes. These only
/// propose a size; the engine still validates whatever comes out.
#[derive(Debug, Clone)]
pub struct OrderSizer {
    preset_cap: f64,
    slider_max: f64,
}

impl OrderSizer {
    pub fn new(config: &OrderConfig) -> Self {
        Self {
            preset_cap: config.preset_size_cap,
            slider_max: config.slider_max,
        }
    }

    /// Preset button (`+$1`, `+$20`, `+$100`): add at least one share worth
    /// `dollars` at `price`, rounded to 0.1 shares.
    pub fn top_up(&self, size: f64, dollars: f64, price: f64) -> f64 {
        if price <= 0.0 {
            return size;
        }
        let add = round_tenths(dollars / price).max(1.0);
        (size + add).clamp(0.0, self.preset_cap)
    }

    /// Largest size the cash covers at `price`, rounded down to 0.1 shares
    pub fn max_affordable(&self, cash: f64, price: f64) -> f64 {
        if price <= 0.0 || cash <= 0.0 {
            return 0.0;
        }
        let size = (cash / price * 10.0).floor() / 10.0;
        // Quotient can round up across a tenth boundary
        if size * price > cash {
            ((size * 10.0).round() - 1.0).max(0.0) / 10.0
        } else {
            size
        }
    }

    pub fn slider(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, self.slider_max)
    }
}

impl Default for OrderSizer {
    fn default() -> Self {
        Self::new(&OrderConfig::default())
    }
}

fn round_tenths(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_up_presets() {
        let sizer = OrderSizer::default();

        // $20 at 62c = 32.26 shares -> 32.3
        assert!((sizer.top_up(50.0, 20.0, 0.62) - 82.3).abs() < 1e-9);
        // $1 at 62c is 1.6 shares
        assert!((sizer.top_up(0.0, 1.0, 0.62) - 1.6).abs() < 1e-9);
        // $1 at 99c rounds to 1.0, never below one share
        assert!((sizer.top_up(0.0, 1.0, 0.99) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_up_capped() {
        let sizer = OrderSizer::default();
        assert!((sizer.top_up(9_990.0, 100.0, 0.01) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_affordable() {
        let sizer = OrderSizer::default();
        // 1000 / 0.62 = 1612.903...
        assert!((sizer.max_affordable(1000.0, 0.62) - 1612.9).abs() < 1e-9);
        assert_eq!(sizer.max_affordable(0.0, 0.62), 0.0);
    }

    #[test]
    fn test_max_affordable_is_affordable() {
        let sizer = OrderSizer::default();
        for cents in 1..100 {
            let price = f64::from(cents) / 100.0;
            let size = sizer.max_affordable(969.0, price);
            assert!(size * price <= 969.0);
        }
    }

    #[test]
    fn test_slider_bounds() {
        let sizer = OrderSizer::default();
        assert_eq!(sizer.slider(-3.0), 0.0);
        assert_eq!(sizer.slider(750.0), 500.0);
        assert_eq!(sizer.slider(120.5), 120.5);
        assert_eq!(sizer.slider(f64::NAN), 0.0);
    }
}
