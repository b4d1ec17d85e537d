//! Deterministic math via `libm` (not platform libc).
//!
//! Transcendental functions are the one place where identical inputs can
//! produce different bits on different platforms; routing them through
//! `libm` keeps generation bit-exact everywhere.

/// Deterministic sine (f64).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine (f64).
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}

/// Deterministic square root (f64).
#[inline]
pub fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Deterministic power (f64).
#[inline]
pub fn det_pow(x: f64, y: f64) -> f64 {
    libm::pow(x, y)
}

/// Deterministic sine (f32).
#[inline]
pub fn det_sinf(x: f32) -> f32 {
    libm::sinf(x)
}

/// Deterministic cosine (f32).
#[inline]
pub fn det_cosf(x: f32) -> f32 {
    libm::cosf(x)
}

/// Deterministic arccosine (f32).
#[inline]
pub fn det_acosf(x: f32) -> f32 {
    libm::acosf(x)
}

/// Deterministic cube root (f32).
#[inline]
pub fn det_cbrtf(x: f32) -> f32 {
    libm::cbrtf(x)
}

/// Deterministic power (f32).
#[inline]
pub fn det_powf(x: f32, y: f32) -> f32 {
    libm::powf(x, y)
}
