/// Grid-scale energy storage used by the dispatch loop.
///
/// `Battery` holds one state of charge in kWh and admits at most
/// `capacity_kwh * charge_rate` in or out per hour.
///
/// # Efficiency
/// `efficiency` only narrows how much input is admitted while charging
/// (`(capacity - curr) / efficiency`). The admitted amount is credited in full
/// and discharging applies no loss. Stored energy is capped at capacity.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Battery capacity in kilowatt-hours.
    pub capacity_kwh: f64,

    /// Fraction of capacity that can move in or out per hour.
    pub charge_rate: f64,

    /// Charging efficiency (0..1.0).
    pub efficiency: f64,

    /// Stored energy in kilowatt-hours, always within `[0, capacity_kwh]`.
    curr_energy_kwh: f64,
}

impl Battery {
    /// Creates a battery holding `energy_kwh`.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Battery capacity in kWh (>= 0, zero disables storage)
    /// * `energy_kwh` - Initial stored energy in kWh (0 to capacity)
    /// * `charge_rate` - Hourly rate limit as a fraction of capacity
    /// * `efficiency` - Charging efficiency (0..1.0)
    ///
    /// # Panics
    ///
    /// Panics if capacity or rate is negative, the initial energy is out of
    /// range, or efficiency is not in `(0, 1]`.
    pub fn new(capacity_kwh: f64, energy_kwh: f64, charge_rate: f64, efficiency: f64) -> Self {
        assert!(capacity_kwh >= 0.0);
        assert!((0.0..=capacity_kwh).contains(&energy_kwh));
        assert!(charge_rate >= 0.0);
        assert!(efficiency > 0.0 && efficiency <= 1.0);

        Self {
            capacity_kwh,
            charge_rate,
            efficiency,
            curr_energy_kwh: energy_kwh,
        }
    }

    /// Creates an empty battery.
    pub fn empty(capacity_kwh: f64, charge_rate: f64, efficiency: f64) -> Self {
        Self::new(capacity_kwh, 0.0, charge_rate, efficiency)
    }

    pub fn curr_energy_kwh(&self) -> f64 {
        self.curr_energy_kwh
    }

    fn rate_limit_kwh(&self) -> f64 {
        self.capacity_kwh * self.charge_rate
    }

    /// Largest input accepted this hour.
    pub fn max_charge(&self) -> f64 {
        ((self.capacity_kwh - self.curr_energy_kwh) / self.efficiency).min(self.rate_limit_kwh())
    }

    /// Largest output available this hour.
    pub fn max_discharge(&self) -> f64 {
        self.curr_energy_kwh.min(self.rate_limit_kwh())
    }

    /// Charges up to `desired_kwh` and returns the amount admitted.
    pub fn try_charge(&mut self, desired_kwh: f64) -> f64 {
        debug_assert!(desired_kwh >= 0.0);
        let allowed = self.max_charge().min(desired_kwh).max(0.0);
        self.curr_energy_kwh = (self.curr_energy_kwh + allowed).min(self.capacity_kwh);
        allowed
    }

    /// Discharges up to `desired_kwh` and returns the amount delivered.
    pub fn try_discharge(&mut self, desired_kwh: f64) -> f64 {
        debug_assert!(desired_kwh >= 0.0);
        let allowed = self.max_discharge().min(desired_kwh).max(0.0);
        self.curr_energy_kwh = (self.curr_energy_kwh - allowed).max(0.0);
        allowed
    }
}
