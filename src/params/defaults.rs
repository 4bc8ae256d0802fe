//! Built-in cost, emission and must-run curves for 2020-2050.

use super::interpolation::{InterpoRange, InterpolatedParam};

pub const START_YEAR: i32 = 2020;
pub const END_YEAR: i32 = 2050;

fn linear_segments(segments: &[(i32, i32, f64, f64)]) -> InterpolatedParam {
    InterpolatedParam::new(
        segments
            .iter()
            .map(|&(start, end, from, to)| InterpoRange::linear(start, end, from, to))
            .collect(),
    )
}

fn constant_segments(segments: &[(i32, i32, f64)]) -> InterpolatedParam {
    InterpolatedParam::new(
        segments
            .iter()
            .map(|&(start, end, value)| InterpoRange::constant(start, end, value))
            .collect(),
    )
}

fn flat(value: f64) -> InterpolatedParam {
    InterpolatedParam::constant(START_YEAR, END_YEAR, value)
}

/// Coal capacity that must run every hour, shrinking as plants are decommissioned (kW).
pub fn coal_must_run() -> InterpolatedParam {
    constant_segments(&[
        (2020, 2020, 2440.0),
        (2021, 2021, 2380.0),
        (2022, 2022, 1620.0),
        (2023, 2023, 1500.0),
        (2024, 2039, 1440.0),
        (2040, 2044, 960.0),
        (2045, 2048, 480.0),
        (2049, 2050, 0.0),
    ])
}

pub fn solar_capex() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 3912.0, 3274.0),
        (2025, 2030, 3274.0, 2669.0),
        (2030, 2035, 2669.0, 2368.0),
        (2035, 2040, 2368.0, 2503.0),
        (2040, 2045, 2503.0, 2312.0),
        (2045, 2050, 2312.0, 2166.0),
    ])
}

pub fn solar_opex() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 62.0, 55.0),
        (2025, 2030, 55.0, 46.0),
        (2030, 2035, 46.0, 41.0),
        (2035, 2040, 41.0, 40.0),
        (2040, 2045, 40.0, 37.0),
        (2045, 2050, 37.0, 34.0),
    ])
}

pub fn solar_lifetime() -> InterpolatedParam {
    flat(25.0)
}

pub fn wind_capex() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 4600.0, 4240.0),
        (2025, 2030, 4240.0, 4000.0),
        (2030, 2035, 4000.0, 3860.0),
        (2035, 2040, 3860.0, 3760.0),
        (2040, 2045, 3760.0, 3660.0),
        (2045, 2050, 3600.0, 3600.0),
    ])
}

pub fn wind_opex() -> InterpolatedParam {
    InterpolatedParam::new(vec![
        InterpoRange::linear(2020, 2025, 92.0, 84.0),
        InterpoRange::linear(2025, 2040, 84.0, 72.0),
        InterpoRange::constant(2040, 2050, 72.0),
    ])
}

pub fn wind_lifetime() -> InterpolatedParam {
    flat(25.0)
}

/// Storage capex per kWh.
pub fn storage_capex() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 1004.0, 652.6),
        (2025, 2030, 652.6, 471.9),
        (2030, 2035, 471.9, 371.5),
        (2035, 2040, 371.5, 321.3),
        (2040, 2045, 321.3, 281.1),
        (2045, 2050, 281.1, 261.0),
    ])
}

pub fn storage_opex() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 15.6, 12.8),
        (2025, 2030, 12.8, 10.8),
        (2030, 2035, 10.8, 9.6),
        (2035, 2040, 9.6, 8.8),
        (2040, 2045, 8.8, 8.4),
        (2045, 2050, 8.4, 8.0),
    ])
}

pub fn storage_lifetime() -> InterpolatedParam {
    constant_segments(&[(2020, 2029, 15.0), (2030, 2050, 20.0)])
}

/// Combined-cycle gas turbine.
pub fn gas_capex() -> InterpolatedParam {
    flat(3785.0)
}

pub fn gas_opex() -> InterpolatedParam {
    flat(164.0)
}

pub fn gas_lifetime() -> InterpolatedParam {
    flat(35.0)
}

// Existing coal fleet is only run down, never built.
pub fn coal_capex() -> InterpolatedParam {
    flat(0.0)
}

pub fn coal_opex() -> InterpolatedParam {
    flat(0.0)
}

pub fn coal_lifetime() -> InterpolatedParam {
    flat(40.0)
}

// 2025-2030 ends at 1206, kept as published.
pub fn co2_price() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 167.0, 185.0),
        (2025, 2030, 185.0, 1206.0),
        (2030, 2035, 206.0, 226.0),
        (2035, 2040, 226.0, 248.0),
        (2040, 2045, 248.0, 269.0),
        (2045, 2050, 269.0, 291.0),
    ])
}

pub fn sox_price() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 85381.0, 100868.0),
        (2025, 2030, 100868.0, 119164.0),
        (2030, 2035, 119164.0, 139086.0),
        (2035, 2040, 139086.0, 162337.0),
        (2040, 2045, 162337.0, 189476.0),
        (2045, 2050, 189476.0, 221151.0),
    ])
}

pub fn nox_price() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 118208.0, 139650.0),
        (2025, 2030, 139650.0, 164980.0),
        (2030, 2035, 164980.0, 192561.0),
        (2035, 2040, 192561.0, 224752.0),
        (2040, 2045, 224752.0, 262325.0),
        (2045, 2050, 262325.0, 306179.0),
    ])
}

pub fn pmx_price() -> InterpolatedParam {
    linear_segments(&[
        (2020, 2025, 270760.0, 319873.0),
        (2025, 2030, 319873.0, 377894.0),
        (2030, 2035, 377894.0, 441068.0),
        (2035, 2040, 441068.0, 514803.0),
        (2040, 2045, 514803.0, 600865.0),
        (2045, 2050, 600865.0, 701314.0),
    ])
}
