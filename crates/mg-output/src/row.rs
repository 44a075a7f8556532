//! Plain data row types written by output backends.

/// One crop's state on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRow<'a> {
    pub crop_id: u16,
    pub crop:    &'a str,
    pub day:     u32,
    pub biomass: f64,
    pub height:  f64,
    /// `false` from the day the crop ran out of resources.
    pub alive:   bool,
}

/// The environment every crop saw on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionsRow {
    pub day:          u32,
    pub sol_of_year:  f64,
    pub hour:         f64,
    pub solar:        f64,
    pub temperature:  f64,
    pub dust_opacity: f64,
}

/// One crop's soil sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilRow<'a> {
    pub crop_id:    u16,
    pub crop:       &'a str,
    pub ph:         f64,
    pub nitrogen:   f64,
    pub phosphorus: f64,
    pub potassium:  f64,
}
