use std::ops::RangeInclusive;

/// Trimmed character count accepted for `name`.
pub const NAME_LEN: RangeInclusive<usize> = 2..=100;
/// Trimmed character count accepted for `address`.
pub const ADDRESS_LEN: RangeInclusive<usize> = 5..=200;

pub const LAT_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LNG_RANGE: RangeInclusive<f64> = -180.0..=180.0;

// 可选字段截断上限（按字符计）
pub const HOURS_MAX: usize = 120;
pub const CONTACT_MAX: usize = 120;
pub const NOTES_MAX: usize = 300;
